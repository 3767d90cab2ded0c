//! Lifecycle operations on existing tasks: get, list, stop, update.
//!
//! These are thin passthroughs over the gateway; the only logic is local
//! argument validation and the client-side filter/limit applied to listings.

use serde_json::{json, Map, Value};

use crate::api::TasksApi;
use crate::error::{Error, ValidationError};
use crate::task::types::{StopOutcome, Task, TaskStatus};

/// Default cap on listed tasks when `return_all` is off.
pub const DEFAULT_LIST_LIMIT: u64 = 50;

/// Status filter for [`list_tasks`]. `All` disables filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Running,
    Finished,
    Stopped,
}

impl StatusFilter {
    fn matches(&self, status: &TaskStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Running => *status == TaskStatus::Running,
            StatusFilter::Finished => *status == TaskStatus::Finished,
            StatusFilter::Stopped => *status == TaskStatus::Stopped,
        }
    }
}

/// Options for [`list_tasks`].
#[derive(Debug, Clone)]
pub struct ListOptions {
    /// Keep only tasks in this status.
    pub status: StatusFilter,
    /// Maximum number of tasks returned (ignored when `return_all` is set).
    pub limit: u64,
    /// Return the whole collection regardless of `limit`.
    pub return_all: bool,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            status: StatusFilter::All,
            limit: DEFAULT_LIST_LIMIT,
            return_all: false,
        }
    }
}

/// Fields accepted by [`update_task`]. Only explicitly set fields are sent.
#[derive(Debug, Clone, Default)]
pub struct UpdateFields {
    /// New task description.
    pub description: Option<String>,
    /// New task status (the service accepts `running` and `stopped`).
    pub status: Option<TaskStatus>,
}

impl UpdateFields {
    pub fn is_empty(&self) -> bool {
        self.description.is_none() && self.status.is_none()
    }
}

fn require_task_id(task_id: &str) -> Result<&str, ValidationError> {
    let trimmed = task_id.trim();
    if trimmed.is_empty() {
        Err(ValidationError::BlankTaskId)
    } else {
        Ok(trimmed)
    }
}

/// Fetch a single task by ID.
pub async fn get_task<A: TasksApi + ?Sized>(api: &A, task_id: &str) -> Result<Task, Error> {
    let task_id = require_task_id(task_id)?;
    api.get_task(task_id).await
}

/// Fetch the task collection, filter by status, and truncate to the limit.
///
/// The remote service returns the full collection; both the filter and the
/// limit are applied client-side over that result set.
pub async fn list_tasks<A: TasksApi + ?Sized>(
    api: &A,
    options: &ListOptions,
) -> Result<Vec<Task>, Error> {
    if !options.return_all && options.limit < 1 {
        return Err(ValidationError::InvalidLimit(options.limit).into());
    }

    let mut tasks = api.list_tasks().await?;
    if options.status != StatusFilter::All {
        tasks.retain(|task| options.status.matches(&task.status));
    }
    if !options.return_all {
        tasks.truncate(options.limit as usize);
    }
    Ok(tasks)
}

/// Stop a running task by patching its status, wrapping the response with a
/// success marker.
pub async fn stop_task<A: TasksApi + ?Sized>(api: &A, task_id: &str) -> Result<StopOutcome, Error> {
    let task_id = require_task_id(task_id)?;
    let task = api
        .update_task(task_id, json!({ "status": "stopped" }))
        .await?;
    tracing::info!(task_id, "task stopped");
    Ok(StopOutcome {
        success: true,
        message: "Task stopped successfully".to_string(),
        task,
    })
}

/// Partially update a task. Only the fields set in `fields` are sent.
pub async fn update_task<A: TasksApi + ?Sized>(
    api: &A,
    task_id: &str,
    fields: &UpdateFields,
) -> Result<Task, Error> {
    let task_id = require_task_id(task_id)?;
    if fields.is_empty() {
        return Err(ValidationError::EmptyUpdate.into());
    }

    let mut body = Map::new();
    if let Some(description) = &fields.description {
        body.insert("task".to_string(), json!(description));
    }
    if let Some(status) = &fields.status {
        body.insert("status".to_string(), json!(status.as_str()));
    }
    api.update_task(task_id, Value::Object(body)).await
}
