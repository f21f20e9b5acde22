//! Uniform raw response returned by every endpoint call.

use std::io::Read;

use bytes::{Buf, Bytes};
use reqwest::header::HeaderMap;
use reqwest::{StatusCode, Version};
use serde::de::DeserializeOwned;

use crate::error::ValidationError;

/// Status, headers and a fully materialized body.
///
/// The body is read off the network before the response is handed back, so
/// it can be inspected any number of times: [`reader`](Self::reader) returns
/// a fresh cursor on every call and [`body`](Self::body) clones are cheap.
///
/// Non-2xx statuses are delivered as-is; classifying them is up to the caller.
///
/// The status line keeps the protocol version and the numeric code. The
/// server's reason phrase is not exposed by the HTTP stack, so
/// [`status_line`](Self::status_line) uses the canonical phrase for the code.
///
/// ## Examples
///
/// ```rust
/// use fmp_lib::RawResponse;
/// use reqwest::{header::HeaderMap, StatusCode};
///
/// let response = RawResponse::new(StatusCode::OK, HeaderMap::new(), r#"[{"symbol":"AAPL"}]"#);
/// let rows: Vec<serde_json::Value> = response.json().unwrap();
/// assert_eq!(rows[0]["symbol"], "AAPL");
///
/// // The body is still there.
/// assert_eq!(response.text(), r#"[{"symbol":"AAPL"}]"#);
/// ```
#[derive(Debug, Clone)]
pub struct RawResponse {
    status: StatusCode,
    version: Version,
    headers: HeaderMap,
    body: Bytes,
}

impl RawResponse {
    /// Creates an HTTP/1.1 response from its parts.
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            version: Version::HTTP_11,
            headers,
            body: body.into(),
        }
    }

    /// Sets the protocol version the response arrived with.
    #[must_use]
    pub fn with_version(mut self, version: Version) -> Self {
        self.version = version;
        self
    }

    /// Returns the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the protocol version.
    pub fn version(&self) -> Version {
        self.version
    }

    /// Returns the status line, e.g. `HTTP/1.1 404 Not Found`.
    pub fn status_line(&self) -> String {
        match self.status.canonical_reason() {
            Some(reason) => format!("{:?} {} {}", self.version, self.status.as_u16(), reason),
            None => format!("{:?} {}", self.version, self.status.as_u16()),
        }
    }

    /// Returns `true` for 2xx statuses.
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the number of body bytes actually received.
    pub fn content_length(&self) -> u64 {
        self.body.len() as u64
    }

    /// Returns the body bytes.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Returns a new reader positioned at the start of the body.
    pub fn reader(&self) -> impl Read + Send + 'static {
        self.body.clone().reader()
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Decodes the body as JSON.
    ///
    /// ## Errors
    ///
    /// Returns [`ValidationError::JsonParse`] if the body does not decode
    /// into `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ValidationError> {
        serde_json::from_slice(&self.body).map_err(ValidationError::JsonParse)
    }

    /// Splits the response into its parts.
    pub fn into_parts(self) -> (StatusCode, HeaderMap, Bytes) {
        (self.status, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::{HeaderValue, CONTENT_TYPE};

    fn sample() -> RawResponse {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        RawResponse::new(StatusCode::OK, headers, r#"[{"symbol":"AAPL","price":1.5}]"#)
    }

    #[test]
    fn test_reader_is_repeatable() {
        let response = sample();

        let mut first = String::new();
        response.reader().read_to_string(&mut first).unwrap();
        let mut second = String::new();
        response.reader().read_to_string(&mut second).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.len() as u64, response.content_length());
    }

    #[test]
    fn test_json_then_text() {
        let response = sample();
        let rows: Vec<serde_json::Value> = response.json().unwrap();
        assert_eq!(rows.len(), 1);
        assert!(response.text().contains("AAPL"));
    }

    #[test]
    fn test_json_error_keeps_body() {
        let response = RawResponse::new(StatusCode::OK, HeaderMap::new(), "not json");
        let err = response.json::<Vec<serde_json::Value>>().unwrap_err();
        assert!(matches!(err, ValidationError::JsonParse(_)));
        assert_eq!(response.text(), "not json");
    }

    #[test]
    fn test_non_success_is_not_an_error() {
        let response = RawResponse::new(StatusCode::TOO_MANY_REQUESTS, HeaderMap::new(), "slow down");
        assert!(!response.is_success());
        assert_eq!(response.status().as_u16(), 429);
    }

    #[test]
    fn test_status_line() {
        let response = RawResponse::new(StatusCode::NOT_FOUND, HeaderMap::new(), "");
        assert_eq!(response.status_line(), "HTTP/1.1 404 Not Found");

        let response = RawResponse::new(StatusCode::OK, HeaderMap::new(), "")
            .with_version(Version::HTTP_2);
        assert_eq!(response.version(), Version::HTTP_2);
        assert_eq!(response.status_line(), "HTTP/2.0 200 OK");

        let unusual = StatusCode::from_u16(599).unwrap();
        let response = RawResponse::new(unusual, HeaderMap::new(), "");
        assert_eq!(response.status_line(), "HTTP/1.1 599");
    }

    #[test]
    fn test_headers_preserved() {
        let response = sample();
        assert_eq!(response.headers()[CONTENT_TYPE], "application/json");
        let (status, headers, body) = response.into_parts();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers.len(), 1);
        assert!(!body.is_empty());
    }
}
