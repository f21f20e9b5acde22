//! Generic dispatch by operation identifier.
//!
//! Lets callers that only know an identifier at runtime (a CLI, a job
//! queue, a config file) invoke any endpoint with a loosely typed parameter
//! bag. The bag goes through the same typed parameters as a direct call.

use std::collections::HashMap;

use serde_json::Value;
use tracing::instrument;

use crate::client::Client;
use crate::context::CallContext;
use crate::error::{ApiError, ValidationError};
use crate::operations::{EndpointParameters, OperationId};
use crate::response::RawResponse;

/// Loosely typed parameters keyed by wire name.
pub type ParameterBag = HashMap<String, Value>;

impl Client {
    /// Invokes the operation named `operation` with parameters from `params`.
    ///
    /// The bag is encoded to JSON and decoded into the operation's parameter
    /// struct, so missing fields default and unknown fields are ignored. No
    /// request is sent unless every step up to the call succeeds.
    ///
    /// ## Errors
    ///
    /// - [`ValidationError::Encode`] if the bag cannot be serialized
    /// - [`ApiError::UnknownOperation`] if `operation` is not a known path
    /// - [`ValidationError::Decode`] if a value has the wrong type
    /// - any error of the typed call itself
    ///
    /// ## Examples
    ///
    /// ```rust,no_run
    /// use fmp_lib::{CallContext, Client, ClientConfig, ParameterBag};
    ///
    /// # async fn run() -> Result<(), fmp_lib::ApiError> {
    /// let client = Client::new(ClientConfig::new("my-api-key"))?;
    /// let mut params = ParameterBag::new();
    /// params.insert("symbol".into(), "AAPL".into());
    /// params.insert("period".into(), "FY".into());
    /// params.insert("limit".into(), 1.into());
    ///
    /// let response = client
    ///     .dispatch(&CallContext::background(), "/balance-sheet-statement", &params)
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(name = "fmp_dispatch", skip(self, ctx, params))]
    pub async fn dispatch(
        &self,
        ctx: &CallContext,
        operation: &str,
        params: &ParameterBag,
    ) -> Result<RawResponse, ApiError> {
        let encoded = serde_json::to_value(params).map_err(ValidationError::Encode)?;
        let operation: OperationId = operation.parse()?;
        self.dispatch_value(ctx, operation, encoded).await
    }

    /// Invokes `operation` with parameters given as a JSON value.
    ///
    /// ## Errors
    ///
    /// [`ValidationError::Decode`] if `params` does not fit, otherwise any
    /// error of the typed call.
    pub async fn dispatch_value(
        &self,
        ctx: &CallContext,
        operation: OperationId,
        params: Value,
    ) -> Result<RawResponse, ApiError> {
        let typed = EndpointParameters::decode(operation, params)?;
        self.call(ctx, &typed).await
    }
}
