//! Crate-wide error taxonomy.
//!
//! Three families of failure:
//! - [`ValidationError`] - raised locally before any network call; never
//!   retried and never sent to the remote service.
//! - [`ApiError`] - a transport or HTTP failure mapped to a fixed set of
//!   kinds, each carrying user-actionable guidance text.
//! - Task-level failures: the service reported the task as stopped, or the
//!   creation response was missing a task ID.

use thiserror::Error;

/// Local validation failures, one variant per violated field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("The task description cannot be empty. Provide a description of what you want the AI agent to do.")]
    EmptyDescription,

    #[error("The task description exceeds the maximum length of 20,000 characters. Shorten your description.")]
    DescriptionTooLong,

    #[error("The starting URL {0:?} has an invalid format. Provide a valid URL starting with http:// or https://.")]
    InvalidStartUrl(String),

    #[error("The timeout must be between 10 and 3600 seconds, got {0}. Adjust the timeout value.")]
    TimeoutOutOfRange(u64),

    #[error("The output schema must be a JSON object or an array of example objects. Check your JSON syntax.")]
    SchemaNotObjectOrArray,

    #[error("The output schema array cannot be empty. Provide at least one example object to define the structure.")]
    EmptyExampleArray,

    #[error("The output schema array items must be objects. Example: [{{\"name\": \"string\", \"age\": \"number\"}}]")]
    ExampleItemNotObject,

    #[error("The output schema has an unknown type {0:?}. Valid types are: object, array, string, number, boolean, null")]
    UnknownSchemaType(String),

    #[error("An object schema must have a \"properties\" field. Define the object structure.")]
    ObjectWithoutProperties,

    #[error("An array schema must have an \"items\" field. Define the array item structure.")]
    ArrayWithoutItems,

    #[error("A task ID is required for this operation. Provide a valid task ID.")]
    BlankTaskId,

    #[error("No fields to update were provided. Set at least one of description or status.")]
    EmptyUpdate,

    #[error("The limit must be at least 1, got {0}.")]
    InvalidLimit(u64),
}

/// Classification of a failed API call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// HTTP 400
    BadRequest,
    /// HTTP 401
    Unauthorized,
    /// HTTP 404
    NotFound,
    /// HTTP 422
    ValidationFailed,
    /// HTTP 429
    RateLimited,
    /// HTTP 500
    ServerError,
    /// Any other HTTP status
    UnknownHttp,
    /// Connection could not be established
    ConnectionRefused,
    /// The 30s request timeout elapsed
    TimedOut,
    /// Any other transport failure
    UnknownTransport,
}

/// A transport or HTTP failure from the Browser Use API.
///
/// `message` is already guidance prose suitable for showing to a user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub http_status: Option<u16>,
    pub message: String,
}

/// Top-level error type returned by all client operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    /// The service reported the task as stopped before it finished.
    #[error("The task was stopped: {detail}. Check the task configuration and try again.")]
    TaskStopped { detail: String },

    /// The creation response did not contain a task ID.
    #[error("The Browser Use API returned an unexpected response without a task ID. Try again or contact support if the issue persists.")]
    MissingTaskId,
}
