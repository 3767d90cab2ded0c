//! Task submission and completion polling.
//!
//! The state machine: a successful creation call moves to polling; polling
//! repeats until the service reports `finished` or `stopped`, or the
//! request's wall-clock budget elapses. `finished` is terminal regardless of
//! the agent's own success flag - a completed-but-unsuccessful run is still a
//! successful poll, with the distinction surfaced in `agent_message`.
//! `stopped` is reported as a failure. On timeout, one final status query
//! captures the freshest snapshot and the envelope carries a warning instead
//! of an agent message.

use std::time::Duration;

use serde_json::Value;

use crate::api::TasksApi;
use crate::error::Error;
use crate::task::request::TaskRequest;
use crate::task::types::{ResultEnvelope, TaskStatus};

/// Minimum pause between status queries. The service rate-limits polling on
/// its side; this just keeps the loop from spinning. Always capped by the
/// remaining budget, so polling still terminates within `timeout_seconds`
/// plus the final snapshot round-trip.
pub(crate) const POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Submit a task and poll until a terminal state or timeout.
pub async fn execute_task<A: TasksApi + ?Sized>(
    api: &A,
    request: &TaskRequest,
) -> Result<ResultEnvelope, Error> {
    let payload = request.to_payload()?;
    let created = api.create_task(payload).await?;
    let task_id = created
        .get("id")
        .and_then(Value::as_str)
        .filter(|id| !id.is_empty())
        .ok_or(Error::MissingTaskId)?
        .to_string();

    tracing::info!(task_id = %task_id, "task created, polling for completion");

    let budget = Duration::from_secs(request.timeout_seconds);
    let started = tokio::time::Instant::now();
    let mut last_status: Option<TaskStatus> = None;

    while started.elapsed() < budget {
        let task = api.get_task(&task_id).await?;

        if last_status.as_ref() != Some(&task.status) {
            tracing::debug!(task_id = %task_id, status = %task.status, "task status changed");
            last_status = Some(task.status.clone());
        }

        match task.status {
            TaskStatus::Finished => {
                let agent_message = if task.is_success == Some(true) {
                    "AI agent successfully completed the task"
                } else {
                    "AI agent was unable to fully complete the task"
                };
                return Ok(ResultEnvelope {
                    cloud_url: task.cloud_url(),
                    agent_message: Some(agent_message.to_string()),
                    warning: None,
                    task,
                });
            }
            TaskStatus::Stopped => {
                return Err(Error::TaskStopped {
                    detail: task.stop_detail(),
                });
            }
            _ => {}
        }

        let remaining = budget.saturating_sub(started.elapsed());
        if remaining.is_zero() {
            break;
        }
        tokio::time::sleep(POLL_INTERVAL.min(remaining)).await;
    }

    // Budget elapsed without a terminal state: take one last snapshot so the
    // caller sees the freshest data, not a stale mid-loop read.
    let task = api.get_task(&task_id).await?;
    tracing::warn!(
        task_id = %task_id,
        timeout_seconds = request.timeout_seconds,
        "task did not reach a terminal state within the timeout budget"
    );
    Ok(ResultEnvelope {
        cloud_url: task.cloud_url(),
        agent_message: None,
        warning: Some(format!(
            "The task did not complete within {} seconds but may still be running on the server",
            request.timeout_seconds
        )),
        task,
    })
}
