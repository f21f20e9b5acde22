//! FMP Library - typed client for the Financial Modeling Prep REST API
//!
//! Every endpoint is a typed async method on [`Client`] taking a parameter
//! struct and returning a [`RawResponse`] with the body fully buffered.
//! [`Client::dispatch`] reaches the same endpoints from a runtime identifier
//! (the endpoint path) and a loosely typed [`ParameterBag`].
//!
//! Underneath, every call goes through one transport that:
//!
//! - appends the API key (`apikey` query parameter by default)
//! - retries idempotent requests at a fixed interval ([`RetryConfig`])
//! - honours cancellation and deadlines from a [`CallContext`]
//! - logs each attempt verbatim when debug mode is on
//!
//! ## Examples
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use fmp_lib::{CallContext, Client, ClientConfig, ParameterBag, RetryConfig};
//! use fmp_lib::operations::{Period, StatementParams};
//!
//! # async fn run() -> Result<(), fmp_lib::ApiError> {
//! let client = Client::new(
//!     ClientConfig::new("my-api-key").with_retry(RetryConfig::new(3, Duration::from_secs(2))),
//! )?;
//! let ctx = CallContext::background().with_timeout(Duration::from_secs(30));
//!
//! // Typed call.
//! let params = StatementParams {
//!     symbol: "AAPL".into(),
//!     period: Some(Period::FiscalYear),
//!     limit: Some(1),
//! };
//! let statements: Vec<serde_json::Value> =
//!     client.balance_sheet_statement(&ctx, &params).await?.json()?;
//!
//! // Same call by identifier.
//! let mut bag = ParameterBag::new();
//! bag.insert("symbol".into(), "AAPL".into());
//! bag.insert("period".into(), "FY".into());
//! bag.insert("limit".into(), 1.into());
//! let response = client.dispatch(&ctx, "/balance-sheet-statement", &bag).await?;
//! assert!(response.is_success());
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;
pub mod config;
pub mod context;
pub mod description;
pub mod dispatch;
pub mod error;
pub mod method;
pub mod operations;
pub mod response;
pub mod transport;

pub use auth::ApiKeyLocation;
pub use client::Client;
pub use config::ClientConfig;
pub use context::CallContext;
pub use dispatch::ParameterBag;
pub use error::{ApiError, ClientError, ConfigError, ValidationError};
pub use method::RestMethod;
pub use operations::{EndpointParameters, OperationId};
pub use response::RawResponse;
pub use transport::{RetryConfig, RetryEligibility};
