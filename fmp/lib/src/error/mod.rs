//! Layered error types for the FMP client.
//!
//! The error hierarchy is structured for actionable diagnostics:
//! - [`ApiError`] - Top-level error type returned by endpoint calls and dispatch
//! - [`ClientError`] - Transport, retry exhaustion and cancellation errors
//! - [`ValidationError`] - Parameter marshalling and body decoding errors
//! - [`ConfigError`] - Client construction errors

mod api_error;
mod client_error;
mod config_error;
mod validation_error;

pub use api_error::ApiError;
pub use client_error::ClientError;
pub use config_error::ConfigError;
pub use validation_error::ValidationError;
