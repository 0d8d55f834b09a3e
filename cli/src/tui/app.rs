use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::debug;
use ratatui::widgets::TableState;
use tasklist_core::view::execute;
use tasklist_core::{Command, Direction, FormField, Outcome, Task, TaskClient, TaskListView};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Form,
    ConfirmDelete,
}

pub struct App {
    pub view: TaskListView,
    pub state: TableState,
    pub input_mode: InputMode,
    pub focus: FormField,
    pub in_flight: usize,
    client: Arc<dyn TaskClient>,
    outcomes: UnboundedSender<Outcome>,
}

impl App {
    pub fn new(client: Arc<dyn TaskClient>, outcomes: UnboundedSender<Outcome>) -> App {
        App {
            view: TaskListView::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            focus: FormField::Name,
            in_flight: 0,
            client,
            outcomes,
        }
    }

    /// Runs a command on its own task; the outcome comes back through the
    /// channel, so the UI keeps drawing while the request is out.
    pub fn dispatch(&mut self, command: Command) {
        debug!("Dispatching {:?}", command);
        self.in_flight += 1;
        let client = Arc::clone(&self.client);
        let outcomes = self.outcomes.clone();
        tokio::spawn(async move {
            let outcome = execute(client.as_ref(), command).await;
            // The receiver is gone only when the UI is shutting down.
            let _ = outcomes.send(outcome);
        });
    }

    pub fn handle_outcome(&mut self, outcome: Outcome) {
        self.in_flight = self.in_flight.saturating_sub(1);
        if let Some(next) = self.view.apply(outcome) {
            self.dispatch(next);
        }
        self.clamp_selection();
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight > 0
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.state.selected().and_then(|i| self.view.tasks().get(i))
    }

    pub fn submit_label(&self) -> &'static str {
        if self.view.is_editing() {
            "Save changes"
        } else {
            "Add task"
        }
    }

    /// Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return true;
        }

        match self.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') => return true,
                KeyCode::Down | KeyCode::Char('j') => self.next(),
                KeyCode::Up | KeyCode::Char('k') => self.previous(),
                KeyCode::Char('J') => self.move_selected(Direction::Down),
                KeyCode::Char('K') => self.move_selected(Direction::Up),
                KeyCode::Char('a') | KeyCode::Char('n') => self.start_new_task(),
                KeyCode::Char('e') | KeyCode::Enter => self.edit_selected(),
                KeyCode::Char('i') => self.enter_form(),
                KeyCode::Char('d') | KeyCode::Delete => self.ask_delete(),
                KeyCode::Char('r') => self.dispatch(Command::Load),
                KeyCode::Esc => self.view.cancel(),
                _ => {}
            },
            InputMode::Form => match key.code {
                KeyCode::Enter => self.submit(),
                KeyCode::Esc => self.input_mode = InputMode::Normal,
                KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
                KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
                KeyCode::Backspace => self.view.form_mut().pop_char(self.focus),
                KeyCode::Char(c) => self.view.form_mut().push_char(self.focus, c),
                _ => {}
            },
            InputMode::ConfirmDelete => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => {
                    if let Some(command) = self.view.confirm_delete() {
                        self.dispatch(command);
                    }
                    self.input_mode = InputMode::Normal;
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                    self.view.dismiss_delete();
                    self.input_mode = InputMode::Normal;
                }
                _ => {}
            },
        }
        false
    }

    pub fn next(&mut self) {
        let len = self.view.tasks().len();
        if len == 0 {
            return;
        }

        let i = match self.state.selected() {
            Some(i) if i + 1 < len => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.view.tasks().len();
        if len == 0 {
            return;
        }

        let i = match self.state.selected() {
            Some(0) | None => len - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn start_new_task(&mut self) {
        self.view.cancel();
        self.enter_form();
    }

    fn enter_form(&mut self) {
        self.input_mode = InputMode::Form;
        self.focus = FormField::Name;
    }

    fn edit_selected(&mut self) {
        if let Some(task) = self.selected_task().cloned() {
            self.view.begin_edit(&task);
            self.enter_form();
        }
    }

    fn ask_delete(&mut self) {
        if let Some(id) = self.selected_task().map(|t| t.id.clone()) {
            self.view.request_delete(id);
            self.input_mode = InputMode::ConfirmDelete;
        }
    }

    fn move_selected(&mut self, direction: Direction) {
        let Some(id) = self.selected_task().map(|t| t.id.clone()) else {
            return;
        };
        let command = self.view.reorder(id, direction);
        self.dispatch(command);

        // Follow the task to its new slot; the reload confirms it.
        match direction {
            Direction::Up => self.previous_without_wrap(),
            Direction::Down => self.next_without_wrap(),
        }
    }

    fn submit(&mut self) {
        // An invalid form stays open with the message in the status line.
        if let Some(command) = self.view.submit() {
            self.dispatch(command);
            self.input_mode = InputMode::Normal;
        }
    }

    fn next_without_wrap(&mut self) {
        if let Some(i) = self.state.selected() {
            if i + 1 < self.view.tasks().len() {
                self.state.select(Some(i + 1));
            }
        }
    }

    fn previous_without_wrap(&mut self) {
        if let Some(i) = self.state.selected() {
            self.state.select(Some(i.saturating_sub(1)));
        }
    }

    fn clamp_selection(&mut self) {
        let len = self.view.tasks().len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            None => self.state.select(Some(0)),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            Some(_) => {}
        }
    }
}
