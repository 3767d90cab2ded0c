//! Authenticated transport to the Browser Use API.
//!
//! [`TasksApi`] is the seam between the task logic (poller, lifecycle
//! operations, dispatcher) and the wire: production code uses
//! [`ApiGateway`], tests substitute a fake.

pub mod gateway;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Error;
use crate::task::types::Task;

pub use gateway::ApiGateway;

/// The remote task registry, as consumed by this client.
#[async_trait]
pub trait TasksApi: Send + Sync {
    /// `POST /tasks` - submit a creation payload, returning the raw response.
    async fn create_task(&self, payload: Value) -> Result<Value, Error>;

    /// `GET /tasks/{id}` - fetch one task.
    async fn get_task(&self, task_id: &str) -> Result<Task, Error>;

    /// `GET /tasks` - fetch the full task collection.
    async fn list_tasks(&self) -> Result<Vec<Task>, Error>;

    /// `PATCH /tasks/{id}` - partially update a task.
    async fn update_task(&self, task_id: &str, body: Value) -> Result<Task, Error>;
}
