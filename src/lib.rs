//! # Browser Use client
//!
//! A client-side orchestration wrapper for the Browser Use cloud API.
//!
//! This library provides:
//! - Task submission with local validation and structured-output schema
//!   normalization
//! - A bounded polling loop that waits for task completion
//! - Lifecycle operations: get, list, stop, and update tasks
//!
//! ## Architecture
//!
//! A task submission flows through four stages:
//! 1. [`task::request::TaskRequest`] is validated and assembled into the
//!    creation payload (normalizing the output schema if one was requested)
//! 2. [`api::ApiGateway`] issues the authenticated creation call
//! 3. [`task::poller`] polls the task status until it is terminal or the
//!    timeout budget elapses
//! 4. The caller receives a [`task::types::ResultEnvelope`] with the final
//!    task snapshot and derived fields
//!
//! Lifecycle operations skip the poller and call the gateway directly.
//!
//! ## Example
//!
//! ```rust,ignore
//! use browser_use_client::{Config, TaskClient, task::request::TaskRequest};
//!
//! let config = Config::from_env()?;
//! let client = TaskClient::new(&config)?;
//! let envelope = client
//!     .execute_task(&TaskRequest::new("Find the top story on Hacker News"))
//!     .await?;
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod schema;
pub mod task;

pub use client::TaskClient;
pub use config::Config;
pub use error::Error;
