//! Embedded OpenAPI description of the FMP stable API.
//!
//! Only the parts the client consumes are modelled: the server list (for the
//! default base URL) and each path's GET operation with its query
//! parameters. Unknown keys are ignored.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ConfigError;

const EMBEDDED: &str = include_str!("../openapi.yaml");

/// Parsed API description.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiDescription {
    /// OpenAPI version string.
    pub openapi: String,
    /// API metadata.
    pub info: ApiInfo,
    /// Servers in preference order.
    #[serde(default)]
    pub servers: Vec<Server>,
    /// Path templates keyed by path.
    #[serde(default)]
    pub paths: BTreeMap<String, PathItem>,
}

/// The `info` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiInfo {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// A server entry.
#[derive(Debug, Clone, Deserialize)]
pub struct Server {
    /// Base URL that paths are appended to.
    pub url: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Operations available on one path. The client only issues GETs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathItem {
    #[serde(default)]
    pub get: Option<OperationSpec>,
}

/// A single documented operation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationSpec {
    /// Unique operation name.
    pub operation_id: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub parameters: Vec<ParameterSpec>,
}

impl OperationSpec {
    /// Iterates over the parameters the server requires.
    pub fn required_parameters(&self) -> impl Iterator<Item = &ParameterSpec> {
        self.parameters.iter().filter(|p| p.required)
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Query,
    Path,
    Header,
    Cookie,
}

/// A documented parameter.
#[derive(Debug, Clone, Deserialize)]
pub struct ParameterSpec {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub schema: Option<SchemaSpec>,
}

/// The subset of a JSON schema used for parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchemaSpec {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(rename = "enum", default)]
    pub values: Vec<String>,
}

impl ApiDescription {
    /// Parses the description compiled into the crate.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::Description`] if the embedded document is not
    /// valid.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_yaml(EMBEDDED)
    }

    /// Parses a description from YAML (JSON is valid YAML too).
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::Description`] on malformed input.
    pub fn from_yaml(source: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(source)?)
    }

    /// Returns the URL of the first server.
    ///
    /// ## Errors
    ///
    /// Returns [`ConfigError::NoServers`] when the server list is empty.
    pub fn default_server_url(&self) -> Result<&str, ConfigError> {
        self.servers
            .first()
            .map(|server| server.url.as_str())
            .ok_or(ConfigError::NoServers)
    }

    /// Looks up the GET operation documented for `path`.
    pub fn operation(&self, path: &str) -> Option<&OperationSpec> {
        self.paths.get(path).and_then(|item| item.get.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_parses() {
        let description = ApiDescription::embedded().unwrap();
        assert!(description.openapi.starts_with('3'));
        assert!(!description.paths.is_empty());
    }

    #[test]
    fn test_default_server_is_stable_api() {
        let description = ApiDescription::embedded().unwrap();
        assert_eq!(
            description.default_server_url().unwrap(),
            "https://financialmodelingprep.com/stable"
        );
    }

    #[test]
    fn test_operation_lookup() {
        let description = ApiDescription::embedded().unwrap();
        let profile = description.operation("/profile").unwrap();
        assert_eq!(profile.operation_id, "ProfileGet");
        let required: Vec<&str> = profile
            .required_parameters()
            .map(|p| p.name.as_str())
            .collect();
        assert_eq!(required, ["symbol"]);
        assert!(description.operation("/nope").is_none());
    }

    #[test]
    fn test_no_servers() {
        let yaml = "openapi: 3.0.3\ninfo:\n  title: t\n  version: '1'\npaths: {}\n";
        let description = ApiDescription::from_yaml(yaml).unwrap();
        assert!(matches!(
            description.default_server_url(),
            Err(ConfigError::NoServers)
        ));
    }

    #[test]
    fn test_malformed_description() {
        let err = ApiDescription::from_yaml("openapi: [").unwrap_err();
        assert!(matches!(err, ConfigError::Description(_)));
    }
}
