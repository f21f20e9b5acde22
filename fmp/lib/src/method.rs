//! HTTP method types for FMP operations.

use strum::{Display, EnumIter, EnumString};

/// HTTP methods an operation can be bound to.
///
/// Every FMP operation is a `GET` today; the other methods exist so that retry
/// eligibility is decided from the method itself rather than assumed.
///
/// ## Examples
///
/// ```rust
/// use fmp_lib::RestMethod;
///
/// let method = RestMethod::Get;
/// assert!(method.is_idempotent());
///
/// let parsed: RestMethod = "POST".parse().unwrap();
/// assert!(!parsed.is_idempotent());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource.
    Get,
    /// HTTP POST - Create a resource or trigger an action.
    Post,
    /// HTTP PUT - Replace a resource entirely.
    Put,
    /// HTTP PATCH - Partially update a resource.
    Patch,
    /// HTTP DELETE - Remove a resource.
    Delete,
    /// HTTP HEAD - Retrieve headers only.
    Head,
    /// HTTP OPTIONS - Query supported methods.
    Options,
}

impl RestMethod {
    /// Returns `true` if repeating the request has the same effect as
    /// sending it once. Only idempotent requests are retried.
    pub fn is_idempotent(&self) -> bool {
        !matches!(self, Self::Post | Self::Patch)
    }

    /// Converts to the equivalent `reqwest::Method`.
    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Put => reqwest::Method::PUT,
            Self::Patch => reqwest::Method::PATCH,
            Self::Delete => reqwest::Method::DELETE,
            Self::Head => reqwest::Method::HEAD,
            Self::Options => reqwest::Method::OPTIONS,
        }
    }

    /// Maps a `reqwest::Method` back to a `RestMethod`.
    ///
    /// Returns `None` for methods this client never issues (e.g. `TRACE`,
    /// `CONNECT`, extension methods).
    pub fn from_reqwest(method: &reqwest::Method) -> Option<Self> {
        match *method {
            reqwest::Method::GET => Some(Self::Get),
            reqwest::Method::POST => Some(Self::Post),
            reqwest::Method::PUT => Some(Self::Put),
            reqwest::Method::PATCH => Some(Self::Patch),
            reqwest::Method::DELETE => Some(Self::Delete),
            reqwest::Method::HEAD => Some(Self::Head),
            reqwest::Method::OPTIONS => Some(Self::Options),
            _ => None,
        }
    }
}

impl From<RestMethod> for reqwest::Method {
    fn from(method: RestMethod) -> Self {
        method.to_reqwest()
    }
}
