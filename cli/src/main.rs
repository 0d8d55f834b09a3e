mod list;
mod logging;
mod settings;
mod tui;

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use log::{info, warn};
use tasklist_core::{
    parse_task_args, Direction, FormField, HttpTaskClient, ParsedInput, TaskClient, TaskId, TaskListView,
};

#[derive(Parser)]
#[command(name = "tasklist")]
#[command(about = "Terminal client for a remote task list", long_about = None)]
struct Cli {
    /// Backend origin, e.g. https://tasks.example.com
    #[arg(long, global = true, env = "TASKLIST_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// List all tasks
    List,
    /// Add a new task (usage: add Pay rent cost:1.200,50 due:2024-03-01)
    Add {
        /// Task name followed by cost:<amount> and due:<date>; words like 10:30 stay in the name
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Edit a task; fields left out keep their value (usage: edit 3 cost:1.300,00)
    Edit {
        id: String,
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a task
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Move a task one slot up or down
    Move { id: String, direction: Direction },
    /// Open the Terminal User Interface
    Tui,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Err(e) = logging::setup_logging() {
        eprintln!("Warning: logging disabled: {:#}", e);
    }

    let config = settings::resolve_config(cli.api_url.as_deref())?;
    info!("Using task backend at {}", config.base_url());
    let client = HttpTaskClient::new(&config);

    match cli.command.unwrap_or(Commands::Tui) {
        Commands::List => {
            let view = loaded_view(&client).await?;
            list::print_tasks(view.tasks());
        }
        Commands::Add { args } => {
            let parsed = parse_task_args(&args)?;
            if parsed.name.is_empty() {
                bail!("Task name is required.");
            }

            let mut view = TaskListView::new();
            fill_form(&mut view, &parsed);
            submit(&mut view, &client).await?;
            println!("Task added: {}", parsed.name);
        }
        Commands::Edit { id, args } => {
            let parsed = parse_task_args(&args)?;
            let mut view = loaded_view(&client).await?;
            let id = TaskId::new(id);
            let task = view
                .task(&id)
                .cloned()
                .ok_or_else(|| anyhow!("Task with ID {} not found", id))?;

            view.begin_edit(&task);
            fill_form(&mut view, &parsed);
            submit(&mut view, &client).await?;

            match view.task(&id) {
                Some(updated) => println!(
                    "Task updated: {} ({}, due {})",
                    updated.name,
                    tasklist_core::format_brl(updated.cost),
                    updated.due_date
                ),
                None => println!("Task updated: {}", id),
            }
        }
        Commands::Delete { id, yes } => {
            let id = TaskId::new(id);
            let mut view = TaskListView::new();
            view.request_delete(id.clone());

            if !yes && !confirm(&format!("Do you really want to delete task {}?", id))? {
                view.dismiss_delete();
                println!("Cancelled.");
                return Ok(());
            }

            if let Some(command) = view.confirm_delete() {
                view.perform(&client, command).await;
            }
            check(&view)?;
            println!("Task deleted: {}", id);
        }
        Commands::Move { id, direction } => {
            let mut view = TaskListView::new();
            let command = view.reorder(TaskId::new(id), direction);
            view.perform(&client, command).await;
            check(&view)?;
            list::print_tasks(view.tasks());
        }
        Commands::Tui => {
            tui::run(Arc::new(client)).await?;
        }
    }
    Ok(())
}

async fn loaded_view(client: &dyn TaskClient) -> Result<TaskListView> {
    let mut view = TaskListView::new();
    let command = view.load();
    view.perform(client, command).await;
    check(&view)?;
    Ok(view)
}

/// Copies the given fields into the form. CLI amounts are taken as typed
/// (`300` is R$ 300,00), not through the keystroke mask.
fn fill_form(view: &mut TaskListView, parsed: &ParsedInput) {
    let form = view.form_mut();
    if !parsed.name.is_empty() {
        form.set(FormField::Name, &parsed.name);
    }
    if let Some(cost) = parsed.metadata.get("cost") {
        form.cost = cost.clone();
    }
    if let Some(due) = parsed.metadata.get("due") {
        form.set(FormField::DueDate, due);
    }
}

async fn submit(view: &mut TaskListView, client: &dyn TaskClient) -> Result<()> {
    let Some(command) = view.submit() else {
        return check(view);
    };
    view.perform(client, command).await;
    check(view)
}

fn check(view: &TaskListView) -> Result<()> {
    match view.last_error() {
        Some(message) => bail!("{}", message),
        None => Ok(()),
    }
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{} [y/N] ", prompt);
    io::stdout().flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    let confirmed = matches!(answer.trim().to_lowercase().as_str(), "y" | "yes");
    if !confirmed {
        warn!("Delete not confirmed");
    }
    Ok(confirmed)
}
