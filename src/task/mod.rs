//! Task domain: requests, polling, lifecycle operations, and result types.

pub mod ops;
pub mod poller;
pub mod request;
pub mod types;
