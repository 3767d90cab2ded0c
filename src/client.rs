//! Caller-facing client and batch dispatcher.
//!
//! [`TaskClient`] owns a [`TasksApi`] transport and exposes one method per
//! operation the service supports. [`TaskClient::run_batch`] processes a
//! sequence of operations with optional per-item failure isolation: a failed
//! item is captured as an error value in its slot instead of aborting the
//! rest.

use serde::Serialize;

use crate::api::{ApiGateway, TasksApi};
use crate::config::Config;
use crate::error::Error;
use crate::task::ops::{self, ListOptions, UpdateFields};
use crate::task::poller;
use crate::task::request::TaskRequest;
use crate::task::types::{ResultEnvelope, StopOutcome, Task};

/// One operation against the task registry.
#[derive(Debug, Clone)]
pub enum Operation {
    /// Submit a task and poll it to completion.
    Execute(TaskRequest),
    /// Retrieve one task.
    Get { task_id: String },
    /// List tasks with a client-side filter and limit.
    List(ListOptions),
    /// Stop a running task.
    Stop { task_id: String },
    /// Partially update a task.
    Update {
        task_id: String,
        fields: UpdateFields,
    },
}

/// The result of a single dispatched operation.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    Envelope(Box<ResultEnvelope>),
    Task(Box<Task>),
    Tasks(Vec<Task>),
    Stopped(Box<StopOutcome>),
}

/// One slot of a batch result: the operation's output, or its captured error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum BatchItem {
    Output(OperationOutput),
    Failed { error: String },
}

/// Client for the Browser Use task API.
pub struct TaskClient<A: TasksApi = ApiGateway> {
    api: A,
}

impl TaskClient<ApiGateway> {
    /// Build a client over an authenticated gateway.
    pub fn new(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            api: ApiGateway::new(config)?,
        })
    }
}

impl<A: TasksApi> TaskClient<A> {
    /// Build a client over a custom transport (used in tests).
    pub fn with_api(api: A) -> Self {
        Self { api }
    }

    /// Submit a task and poll until it completes, stops, or times out.
    pub async fn execute_task(&self, request: &TaskRequest) -> Result<ResultEnvelope, Error> {
        poller::execute_task(&self.api, request).await
    }

    /// Retrieve one task by ID.
    pub async fn get_task(&self, task_id: &str) -> Result<Task, Error> {
        ops::get_task(&self.api, task_id).await
    }

    /// List tasks, filtered and truncated client-side.
    pub async fn list_tasks(&self, options: &ListOptions) -> Result<Vec<Task>, Error> {
        ops::list_tasks(&self.api, options).await
    }

    /// Stop a running task.
    pub async fn stop_task(&self, task_id: &str) -> Result<StopOutcome, Error> {
        ops::stop_task(&self.api, task_id).await
    }

    /// Partially update a task.
    pub async fn update_task(&self, task_id: &str, fields: &UpdateFields) -> Result<Task, Error> {
        ops::update_task(&self.api, task_id, fields).await
    }

    /// Dispatch a single operation.
    pub async fn run(&self, operation: &Operation) -> Result<OperationOutput, Error> {
        match operation {
            Operation::Execute(request) => Ok(OperationOutput::Envelope(Box::new(
                self.execute_task(request).await?,
            ))),
            Operation::Get { task_id } => {
                Ok(OperationOutput::Task(Box::new(self.get_task(task_id).await?)))
            }
            Operation::List(options) => {
                Ok(OperationOutput::Tasks(self.list_tasks(options).await?))
            }
            Operation::Stop { task_id } => Ok(OperationOutput::Stopped(Box::new(
                self.stop_task(task_id).await?,
            ))),
            Operation::Update { task_id, fields } => Ok(OperationOutput::Task(Box::new(
                self.update_task(task_id, fields).await?,
            ))),
        }
    }

    /// Run operations in order, one result slot per input.
    ///
    /// With `continue_on_error`, a failed item is recorded as
    /// [`BatchItem::Failed`] and processing moves on; otherwise the first
    /// failure aborts the batch. Items share no state: each carries its own
    /// task ID, timer, and polling loop.
    pub async fn run_batch(
        &self,
        operations: &[Operation],
        continue_on_error: bool,
    ) -> Result<Vec<BatchItem>, Error> {
        let mut results = Vec::with_capacity(operations.len());
        for (index, operation) in operations.iter().enumerate() {
            match self.run(operation).await {
                Ok(output) => results.push(BatchItem::Output(output)),
                Err(err) if continue_on_error => {
                    tracing::warn!(item = index, error = %err, "batch item failed, continuing");
                    results.push(BatchItem::Failed {
                        error: err.to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
        Ok(results)
    }
}
