use async_trait::async_trait;

use crate::error::NetworkError;
use crate::model::{Direction, NewTask, Task, TaskId};

/// The five calls the task backend understands.
///
/// No implementation retries; the first failure goes straight back to the
/// caller.
#[async_trait]
pub trait TaskClient: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, NetworkError>;
    async fn create(&self, task: &NewTask) -> Result<(), NetworkError>;
    async fn update(&self, id: &TaskId, task: &NewTask) -> Result<(), NetworkError>;
    async fn delete(&self, id: &TaskId) -> Result<(), NetworkError>;
    async fn reorder(&self, id: &TaskId, direction: Direction) -> Result<(), NetworkError>;
}
