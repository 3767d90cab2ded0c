//! HTTP gateway: authentication, timeouts, and error mapping.
//!
//! Every request carries the API key header and a fixed 30-second timeout.
//! That timeout is per round-trip and deliberately much smaller than a task's
//! polling budget, so one slow request fails fast while the outer loop keeps
//! going. Failure mapping is total: every transport or HTTP outcome lands in
//! exactly one [`ApiErrorKind`] with guidance text a user can act on.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Method;
use serde_json::Value;

use super::TasksApi;
use crate::config::Config;
use crate::error::{ApiError, ApiErrorKind, Error};
use crate::task::types::Task;

/// Fixed per-request timeout.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Header the service authenticates with.
const AUTH_HEADER: &str = "X-Browser-Use-API-Key";

/// Authenticated JSON transport to the Browser Use API.
pub struct ApiGateway {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ApiGateway {
    /// Build a gateway from client configuration.
    pub fn new(config: &Config) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| ApiError {
                kind: ApiErrorKind::UnknownTransport,
                http_status: None,
                message: format!("Failed to initialize the HTTP client: {err}"),
            })?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        })
    }

    /// Issue one authenticated JSON call and decode the response body.
    async fn call(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %path, "calling Browser Use API");

        let mut request = self
            .http
            .request(method, &url)
            .header(AUTH_HEADER, &self.api_key);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            response.json::<Value>().await.map_err(transport_error)
        } else {
            let body_text = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), %url, "API request failed");
            Err(http_error(status.as_u16(), &body_text))
        }
    }
}

#[async_trait]
impl TasksApi for ApiGateway {
    async fn create_task(&self, payload: Value) -> Result<Value, Error> {
        Ok(self.call(Method::POST, "/tasks", Some(&payload)).await?)
    }

    async fn get_task(&self, task_id: &str) -> Result<Task, Error> {
        let value = self
            .call(Method::GET, &format!("/tasks/{task_id}"), None)
            .await?;
        Ok(parse_task(value)?)
    }

    async fn list_tasks(&self) -> Result<Vec<Task>, Error> {
        let value = self.call(Method::GET, "/tasks", None).await?;
        serde_json::from_value(value)
            .map_err(|err| unexpected_payload(err).into())
    }

    async fn update_task(&self, task_id: &str, body: Value) -> Result<Task, Error> {
        let value = self
            .call(Method::PATCH, &format!("/tasks/{task_id}"), Some(&body))
            .await?;
        Ok(parse_task(value)?)
    }
}

fn parse_task(value: Value) -> Result<Task, ApiError> {
    serde_json::from_value(value).map_err(unexpected_payload)
}

fn unexpected_payload(err: serde_json::Error) -> ApiError {
    ApiError {
        kind: ApiErrorKind::UnknownTransport,
        http_status: None,
        message: format!(
            "The Browser Use API returned an unexpected payload: {err}. Try again or contact support if the issue persists."
        ),
    }
}

/// Map a reqwest failure (no HTTP status available) to the error taxonomy.
fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError {
            kind: ApiErrorKind::TimedOut,
            http_status: None,
            message: "The request to the Browser Use API timed out. Check your network connection and try again.".to_string(),
        }
    } else if err.is_connect() {
        ApiError {
            kind: ApiErrorKind::ConnectionRefused,
            http_status: None,
            message: "Connection to the Browser Use API could not be established. Verify the service is available and try again.".to_string(),
        }
    } else {
        ApiError {
            kind: ApiErrorKind::UnknownTransport,
            http_status: None,
            message: format!(
                "An unexpected issue occurred: {err}. Try again or contact support if the issue persists."
            ),
        }
    }
}

/// Map a non-success HTTP status plus response body to the error taxonomy.
fn http_error(status: u16, body: &str) -> ApiError {
    let detail = extract_error_message(body);
    let (kind, message) = match status {
        400 => (
            ApiErrorKind::BadRequest,
            format!("The request could not be processed: {detail}. Check your parameters and try again."),
        ),
        401 => (
            ApiErrorKind::Unauthorized,
            "Authentication was not successful. Verify that your API key is correct.".to_string(),
        ),
        404 => (
            ApiErrorKind::NotFound,
            format!("The requested resource could not be found: {detail}. Verify the resource exists."),
        ),
        422 => (ApiErrorKind::ValidationFailed, validation_failed_message(&detail)),
        429 => (
            ApiErrorKind::RateLimited,
            "Rate limit exceeded or too many concurrent sessions. Try again later.".to_string(),
        ),
        500 => (
            ApiErrorKind::ServerError,
            format!("The Browser Use API encountered a server issue: {detail}. Try again later or contact support if the issue persists."),
        ),
        other => (
            ApiErrorKind::UnknownHttp,
            format!("The API request was not successful (status {other}): {detail}. Check your configuration and try again."),
        ),
    };
    ApiError {
        kind,
        http_status: Some(status),
        message,
    }
}

/// 422 messages get a targeted hint based on what failed.
fn validation_failed_message(detail: &str) -> String {
    let mut message = format!("The request parameters could not be validated: {detail}");
    let lowered = detail.to_lowercase();
    if lowered.contains("schema") {
        message.push_str(
            "\n\nTip: Check your JSON schema format. Properties should be objects like {\"type\": \"string\"}, not just \"string\".",
        );
    } else if lowered.contains("structured") {
        message.push_str("\n\nTip: Ensure your structured output schema is valid JSON Schema format.");
    } else {
        message.push_str("\n\nTip: Check your task description, URLs, and schema format.");
    }
    message
}

/// Pull a human-readable message out of a failed response body.
///
/// Tries, in order: `message`, `error`, `detail`, `details`, a joined
/// `errors` array, then the whole body. An empty or non-JSON body falls back
/// to its raw text, then to a generic placeholder.
fn extract_error_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        let trimmed = body.trim();
        return if trimmed.is_empty() {
            "Unknown error".to_string()
        } else {
            trimmed.to_string()
        };
    };

    if let Value::Object(map) = &value {
        for field in ["message", "error", "detail", "details"] {
            match map.get(field) {
                Some(Value::String(text)) if !text.is_empty() => return text.clone(),
                Some(Value::Null) | None => {}
                Some(other) => return other.to_string(),
            }
        }
        if let Some(Value::Array(errors)) = map.get("errors") {
            if !errors.is_empty() {
                return errors
                    .iter()
                    .map(|entry| match entry {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
            }
        }
    }
    value.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_prefers_message_field() {
        let body = json!({ "message": "task too long", "error": "other" }).to_string();
        assert_eq!(extract_error_message(&body), "task too long");
    }

    #[test]
    fn extract_falls_through_named_fields() {
        let body = json!({ "detail": "no such task" }).to_string();
        assert_eq!(extract_error_message(&body), "no such task");

        let body = json!({ "details": "bad field" }).to_string();
        assert_eq!(extract_error_message(&body), "bad field");
    }

    #[test]
    fn extract_joins_errors_array() {
        let body = json!({ "errors": ["first", "second"] }).to_string();
        assert_eq!(extract_error_message(&body), "first, second");
    }

    #[test]
    fn extract_serializes_unrecognized_objects() {
        let body = json!({ "code": 17 }).to_string();
        assert_eq!(extract_error_message(&body), r#"{"code":17}"#);
    }

    #[test]
    fn extract_handles_non_json_and_empty_bodies() {
        assert_eq!(extract_error_message("<html>gateway error</html>"), "<html>gateway error</html>");
        assert_eq!(extract_error_message(""), "Unknown error");
        assert_eq!(extract_error_message("   "), "Unknown error");
    }

    #[test]
    fn status_mapping_is_total() {
        for (status, kind) in [
            (400, ApiErrorKind::BadRequest),
            (401, ApiErrorKind::Unauthorized),
            (404, ApiErrorKind::NotFound),
            (422, ApiErrorKind::ValidationFailed),
            (429, ApiErrorKind::RateLimited),
            (500, ApiErrorKind::ServerError),
            (418, ApiErrorKind::UnknownHttp),
            (503, ApiErrorKind::UnknownHttp),
        ] {
            let err = http_error(status, "{}");
            assert_eq!(err.kind, kind, "status {status}");
            assert_eq!(err.http_status, Some(status));
            assert!(!err.message.is_empty());
        }
    }

    #[test]
    fn unprocessable_schema_message_gets_schema_hint() {
        let body = json!({ "message": "invalid schema property" }).to_string();
        let err = http_error(422, &body);
        assert!(err.message.contains("invalid schema property"));
        assert!(err.message.contains("Properties should be objects"));
    }

    #[test]
    fn unprocessable_structured_message_gets_structured_hint() {
        let body = json!({ "message": "structured output rejected" }).to_string();
        let err = http_error(422, &body);
        assert!(err.message.contains("valid JSON Schema format"));
    }

    #[test]
    fn unprocessable_other_message_gets_generic_hint() {
        let body = json!({ "message": "task description required" }).to_string();
        let err = http_error(422, &body);
        assert!(err.message.contains("Check your task description, URLs, and schema format"));
    }

    #[test]
    fn unauthorized_message_does_not_leak_body() {
        let body = json!({ "message": "token abc123 rejected" }).to_string();
        let err = http_error(401, &body);
        assert_eq!(err.kind, ApiErrorKind::Unauthorized);
        assert!(!err.message.contains("abc123"));
    }
}
