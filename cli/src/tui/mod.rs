pub mod app;
pub mod ui;

use std::io::{self, Stdout};
use std::sync::Arc;

use anyhow::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use log::{error, info};
use ratatui::{backend::CrosstermBackend, Terminal};
use tasklist_core::{Command, Outcome, TaskClient};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::tui::app::App;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(client: Arc<dyn TaskClient>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(client, tx);
    let res = run_app(&mut terminal, &mut app, rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("TUI stopped: {:?}", err);
        println!("{:?}", err);
    }

    Ok(())
}

async fn run_app(terminal: &mut Tui, app: &mut App, mut outcomes: UnboundedReceiver<Outcome>) -> Result<()> {
    let mut events = EventStream::new();
    app.dispatch(Command::Load);
    info!("TUI started");

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        tokio::select! {
            Some(outcome) = outcomes.recv() => app.handle_outcome(outcome),
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        return Ok(());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
        }
    }
}
