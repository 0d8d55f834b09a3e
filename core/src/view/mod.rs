pub mod form;
pub mod task_list;

#[cfg(test)]
mod task_list_test;

pub use form::{FormField, TaskForm};
pub use task_list::{execute, Command, EditMode, Outcome, TaskListView};
