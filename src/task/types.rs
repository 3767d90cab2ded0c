//! Remote task representation and result envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Base URL of the cloud console, used to derive session links.
pub const CLOUD_CONSOLE_URL: &str = "https://cloud.browser-use.com";

/// Status of a remote task.
///
/// Only `finished` and `stopped` are terminal; anything else the service
/// reports (including statuses added after this client was written) is
/// treated as non-terminal and keeps the polling loop going.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Running,
    Finished,
    Stopped,
    #[serde(untagged)]
    Other(String),
}

impl TaskStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TaskStatus::Finished | TaskStatus::Stopped)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TaskStatus::Running => "running",
            TaskStatus::Finished => "finished",
            TaskStatus::Stopped => "stopped",
            TaskStatus::Other(status) => status,
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task as reported by the remote service.
///
/// The service owns this entity; the client only observes it. Fields beyond
/// the ones modeled here are preserved in `extra` so nothing the service
/// returns is dropped from results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,

    pub status: TaskStatus,

    /// Whether the agent considered the run successful. Absent until the
    /// task finishes (and sometimes even then).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_success: Option<bool>,

    /// Browser session this task ran in, when the service reports one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    /// Agent output (extracted data or final message).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Value>,

    /// Service-reported error detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,

    /// Any additional fields the service returned.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Task {
    /// Link to the live agent view in the cloud console, when a session
    /// exists.
    pub fn cloud_url(&self) -> Option<String> {
        self.session_id
            .as_ref()
            .map(|session_id| format!("{CLOUD_CONSOLE_URL}/agent/{session_id}"))
    }

    /// Human-readable detail for a stopped task: the service's error text,
    /// falling back to its output, falling back to a generic message.
    pub fn stop_detail(&self) -> String {
        self.error
            .as_ref()
            .or(self.output.as_ref())
            .map(value_text)
            .unwrap_or_else(|| "Task execution was halted".to_string())
    }
}

/// Render a JSON value as plain text without quoting strings.
fn value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// The value handed back to the caller after `execute_task`.
///
/// Carries the full final task snapshot plus derived fields. `agent_message`
/// is set when the task finished; `warning` is set instead when the timeout
/// elapsed first.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEnvelope {
    #[serde(flatten)]
    pub task: Task,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_message: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Result of a stop operation: a success marker wrapped around the updated
/// task returned by the service.
#[derive(Debug, Clone, Serialize)]
pub struct StopOutcome {
    pub success: bool,
    pub message: String,

    #[serde(flatten)]
    pub task: Task,
}
