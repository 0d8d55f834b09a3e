pub mod cost;
pub mod task;

pub use cost::Cost;
pub use task::{Direction, NewTask, Task, TaskId, HIGHLIGHT_THRESHOLD};
