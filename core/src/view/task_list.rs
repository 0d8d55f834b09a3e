use log::{debug, warn};

use crate::client::TaskClient;
use crate::error::NetworkError;
use crate::model::{Direction, NewTask, Task, TaskId};
use crate::view::form::TaskForm;

pub const LOAD_FAILED: &str = "Failed to load tasks. Try again later.";
pub const SAVE_FAILED: &str = "Failed to save the task. Try again.";
pub const DELETE_FAILED: &str = "Failed to delete the task. Try again.";
pub const MOVE_FAILED: &str = "Failed to move the task. Try again.";

#[derive(Debug, Clone, PartialEq)]
pub enum EditMode {
    Creating,
    Editing(TaskId),
}

/// A backend call the view wants made.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load,
    Create(NewTask),
    Update(TaskId, NewTask),
    Delete(TaskId),
    Reorder(TaskId, Direction),
}

/// What came back from running a [`Command`].
#[derive(Debug)]
pub enum Outcome {
    Loaded(Result<Vec<Task>, NetworkError>),
    Saved {
        updated: Option<TaskId>,
        result: Result<(), NetworkError>,
    },
    Deleted {
        id: TaskId,
        result: Result<(), NetworkError>,
    },
    Moved(Result<(), NetworkError>),
}

pub async fn execute<C: TaskClient + ?Sized>(client: &C, command: Command) -> Outcome {
    debug!("Executing {:?}", command);
    match command {
        Command::Load => Outcome::Loaded(client.list().await),
        Command::Create(task) => Outcome::Saved {
            updated: None,
            result: client.create(&task).await,
        },
        Command::Update(id, task) => {
            let result = client.update(&id, &task).await;
            Outcome::Saved {
                updated: Some(id),
                result,
            }
        }
        Command::Delete(id) => {
            let result = client.delete(&id).await;
            Outcome::Deleted { id, result }
        }
        Command::Reorder(id, direction) => Outcome::Moved(client.reorder(&id, direction).await),
    }
}

/// State behind the task list screen.
///
/// The view never talks to the network itself. User actions return
/// [`Command`]s; whoever runs them feeds the [`Outcome`] back through
/// [`TaskListView::apply`], which may ask for a follow-up reload. The task
/// collection is only ever replaced by a successful reload.
#[derive(Debug, Clone)]
pub struct TaskListView {
    tasks: Vec<Task>,
    form: TaskForm,
    mode: EditMode,
    last_error: Option<String>,
    pending_delete: Option<TaskId>,
}

impl Default for TaskListView {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskListView {
    pub fn new() -> Self {
        Self {
            tasks: Vec::new(),
            form: TaskForm::default(),
            mode: EditMode::Creating,
            last_error: None,
            pending_delete: None,
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    pub fn form(&self) -> &TaskForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TaskForm {
        &mut self.form
    }

    pub fn mode(&self) -> &EditMode {
        &self.mode
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.mode, EditMode::Editing(_))
    }

    pub fn editing_id(&self) -> Option<&TaskId> {
        match &self.mode {
            EditMode::Editing(id) => Some(id),
            EditMode::Creating => None,
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn pending_delete(&self) -> Option<&TaskId> {
        self.pending_delete.as_ref()
    }

    pub fn load(&self) -> Command {
        Command::Load
    }

    /// Validates the form and asks for a create or an update. Nothing is sent
    /// when the form is incomplete; the problem lands in `last_error`.
    pub fn submit(&mut self) -> Option<Command> {
        let task = match self.form.to_new_task() {
            Ok(task) => task,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return None;
            }
        };

        Some(match &self.mode {
            EditMode::Editing(id) => Command::Update(id.clone(), task),
            EditMode::Creating => Command::Create(task),
        })
    }

    pub fn begin_edit(&mut self, task: &Task) {
        self.form = TaskForm::from_task(task);
        self.mode = EditMode::Editing(task.id.clone());
    }

    /// Back to an empty form for a new task.
    pub fn cancel(&mut self) {
        self.form.clear();
        self.mode = EditMode::Creating;
    }

    pub fn request_delete(&mut self, id: TaskId) {
        self.pending_delete = Some(id);
    }

    pub fn confirm_delete(&mut self) -> Option<Command> {
        self.pending_delete.take().map(Command::Delete)
    }

    pub fn dismiss_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn reorder(&self, id: TaskId, direction: Direction) -> Command {
        Command::Reorder(id, direction)
    }

    /// Folds a finished call into the view. Returns the reload to run after
    /// a successful mutation.
    pub fn apply(&mut self, outcome: Outcome) -> Option<Command> {
        match outcome {
            Outcome::Loaded(Ok(tasks)) => {
                debug!("Loaded {} tasks", tasks.len());
                self.tasks = tasks;
                self.last_error = None;
                None
            }
            Outcome::Loaded(Err(e)) => self.fail(LOAD_FAILED, e),
            Outcome::Saved { updated, result: Ok(()) } => {
                // Leave the form alone if the user already moved on to another task.
                let still_current = match (&self.mode, &updated) {
                    (EditMode::Creating, None) => true,
                    (EditMode::Editing(current), Some(saved)) => current == saved,
                    _ => false,
                };
                if still_current {
                    self.cancel();
                }
                Some(Command::Load)
            }
            Outcome::Saved { result: Err(e), .. } => self.fail(SAVE_FAILED, e),
            Outcome::Deleted { id, result: Ok(()) } => {
                if self.editing_id() == Some(&id) {
                    self.cancel();
                }
                Some(Command::Load)
            }
            Outcome::Deleted { result: Err(e), .. } => self.fail(DELETE_FAILED, e),
            Outcome::Moved(Ok(())) => Some(Command::Load),
            Outcome::Moved(Err(e)) => self.fail(MOVE_FAILED, e),
        }
    }

    /// Runs a command, and every reload it triggers, to completion.
    pub async fn perform<C: TaskClient + ?Sized>(&mut self, client: &C, command: Command) {
        let mut next = Some(command);
        while let Some(command) = next {
            let outcome = execute(client, command).await;
            next = self.apply(outcome);
        }
    }

    fn fail(&mut self, message: &str, error: NetworkError) -> Option<Command> {
        warn!("{} ({})", message, error);
        self.last_error = Some(message.to_string());
        None
    }
}
