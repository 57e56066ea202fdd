//! Typed application configuration.
//!
//! The configuration is built once at process startup (see the resolver in
//! the store crate), validated, and never mutated afterwards. Components
//! receive it by reference or take clones of the sections they need; there
//! is no ambient configuration lookup anywhere in the workspace.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use url::Url;

use crate::error::ConfigError;

// ============================================================================
// Defaults
// ============================================================================

/// Default trigger period in minutes.
pub const DEFAULT_PERIOD_MINUTES: u64 = 60;

fn default_base_url() -> String {
    "https://api.example.com".to_string()
}

fn default_sheet_name() -> String {
    "Records".to_string()
}

fn default_full_refresh_range() -> String {
    "A2:Z1000".to_string()
}

fn default_incremental_refresh_range() -> String {
    "A2".to_string()
}

fn default_trigger_name() -> String {
    "sync".to_string()
}

// ============================================================================
// Configuration Types
// ============================================================================

/// Full application configuration.
///
/// Constructed once at startup from compiled-in defaults plus external
/// property scopes, then validated. Accessors hand out copies so the
/// resolved configuration is never mutated behind a caller's back.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote API settings.
    pub api: ApiConfig,
    /// Sheet target settings.
    pub sheet: SheetConfig,
    /// Handler name the recurring trigger is bound to.
    pub trigger_name: String,
}

/// Remote API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are appended to.
    pub base_url: String,
    /// Bearer token. Never defaulted to a real value; the external
    /// property scopes must supply it.
    pub api_key: String,
    /// Named endpoint paths, fetched in document order.
    pub endpoints: Endpoints,
}

/// Sheet target settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Name of the target sheet within the workbook.
    pub sheet_name: String,
    /// Range cleared and written on a full refresh.
    pub full_refresh_range: String,
    /// Write origin for an incremental refresh (no clearing).
    pub incremental_refresh_range: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            sheet: SheetConfig::default(),
            trigger_name: default_trigger_name(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            endpoints: Endpoints::default(),
        }
    }
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            sheet_name: default_sheet_name(),
            full_refresh_range: default_full_refresh_range(),
            incremental_refresh_range: default_incremental_refresh_range(),
        }
    }
}

// ============================================================================
// Endpoints
// ============================================================================

/// One named endpoint path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    /// Logical endpoint name.
    pub name: String,
    /// Relative URL path, appended to the API base URL.
    pub path: String,
}

/// Ordered endpoint list.
///
/// Serialized as a JSON object mapping names to paths; the document order
/// of that object is preserved and is the fetch order of a sync run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoints(Vec<Endpoint>);

impl Endpoints {
    /// Creates an endpoint list from `(name, path)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(name, path)| Endpoint {
                    name: name.into(),
                    path: path.into(),
                })
                .collect(),
        )
    }

    /// Iterates endpoints in configured order.
    pub fn iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.0.iter()
    }

    /// Number of configured endpoints.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true when no endpoints are configured.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Looks up a path by endpoint name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.path.as_str())
    }
}

impl<'a> IntoIterator for &'a Endpoints {
    type Item = &'a Endpoint;
    type IntoIter = std::slice::Iter<'a, Endpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Serialize for Endpoints {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for endpoint in &self.0 {
            map.serialize_entry(&endpoint.name, &endpoint.path)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Endpoints {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EndpointsVisitor;

        impl<'de> Visitor<'de> for EndpointsVisitor {
            type Value = Endpoints;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a JSON object mapping endpoint names to paths")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut endpoints = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, path)) = access.next_entry::<String, String>()? {
                    endpoints.push(Endpoint { name, path });
                }
                Ok(Endpoints(endpoints))
            }
        }

        deserializer.deserialize_map(EndpointsVisitor)
    }
}

// ============================================================================
// Validation & Views
// ============================================================================

impl Config {
    /// Validates the resolved configuration.
    ///
    /// Returns the first violation found, naming the offending field.
    /// An empty endpoint list is valid; a sync run over it fetches
    /// nothing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match Url::parse(&self.api.base_url) {
            Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
            Ok(url) => {
                return Err(ConfigError::InvalidApiUrl {
                    url: self.api.base_url.clone(),
                    reason: format!("unsupported scheme {:?}", url.scheme()),
                });
            }
            Err(e) => {
                return Err(ConfigError::InvalidApiUrl {
                    url: self.api.base_url.clone(),
                    reason: e.to_string(),
                });
            }
        }

        if self.api.api_key.is_empty() {
            return Err(ConfigError::MissingField("api.api_key"));
        }

        for endpoint in &self.api.endpoints {
            if endpoint.path.is_empty() {
                return Err(ConfigError::InvalidEndpoint {
                    name: endpoint.name.clone(),
                    path: endpoint.path.clone(),
                    reason: "path is empty",
                });
            }
            if !endpoint.path.starts_with('/') {
                return Err(ConfigError::InvalidEndpoint {
                    name: endpoint.name.clone(),
                    path: endpoint.path.clone(),
                    reason: "path must start with '/'",
                });
            }
        }

        if self.sheet.sheet_name.is_empty() {
            return Err(ConfigError::MissingField("sheet.sheet_name"));
        }
        if self.sheet.full_refresh_range.is_empty() {
            return Err(ConfigError::MissingField("sheet.full_refresh_range"));
        }
        if self.sheet.incremental_refresh_range.is_empty() {
            return Err(ConfigError::MissingField("sheet.incremental_refresh_range"));
        }
        if self.trigger_name.is_empty() {
            return Err(ConfigError::MissingField("trigger_name"));
        }

        Ok(())
    }

    /// Read-only copy of the API settings.
    pub fn api_config(&self) -> ApiConfig {
        self.api.clone()
    }

    /// Read-only copy of the sheet settings.
    pub fn sheet_ranges(&self) -> SheetConfig {
        self.sheet.clone()
    }

    /// Handler name the recurring trigger is bound to.
    pub fn trigger_name(&self) -> &str {
        &self.trigger_name
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Config {
        Config {
            api: ApiConfig {
                base_url: "https://api.example.com".to_string(),
                api_key: "secret".to_string(),
                endpoints: Endpoints::from_pairs([("pets", "/pets"), ("owners", "/owners")]),
            },
            ..Config::default()
        }
    }

    #[test]
    fn valid_config_passes() {
        valid_config().validate().unwrap();
    }

    #[test]
    fn default_config_fails_on_empty_api_key() {
        let err = Config::default().validate().unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("api.api_key")));
    }

    #[test]
    fn rejects_non_http_scheme() {
        let mut config = valid_config();
        config.api.base_url = "ftp://api.example.com".to_string();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidApiUrl { .. }));
    }

    #[test]
    fn rejects_unparseable_url() {
        let mut config = valid_config();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidApiUrl { .. })
        ));
    }

    #[test]
    fn rejects_endpoint_path_without_leading_slash() {
        let mut config = valid_config();
        config.api.endpoints = Endpoints::from_pairs([("pets", "pets")]);
        let err = config.validate().unwrap_err();
        match err {
            ConfigError::InvalidEndpoint { name, path, .. } => {
                assert_eq!(name, "pets");
                assert_eq!(path, "pets");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_endpoints_is_valid() {
        let mut config = valid_config();
        config.api.endpoints = Endpoints::default();
        config.validate().unwrap();
    }

    #[test]
    fn endpoints_preserve_document_order() {
        let json = r#"{"zebras": "/zebras", "apes": "/apes", "mice": "/mice"}"#;
        let endpoints: Endpoints = serde_json::from_str(json).unwrap();
        let names: Vec<&str> = endpoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["zebras", "apes", "mice"]);
    }

    #[test]
    fn endpoints_roundtrip_through_json() {
        let endpoints = Endpoints::from_pairs([("pets", "/pets"), ("owners", "/owners")]);
        let json = serde_json::to_string(&endpoints).unwrap();
        let back: Endpoints = serde_json::from_str(&json).unwrap();
        assert_eq!(back, endpoints);
    }

    #[test]
    fn views_return_copies() {
        let config = valid_config();
        let api = config.api_config();
        assert_eq!(api.base_url, config.api.base_url);
        assert_eq!(config.api.endpoints.get("pets"), Some("/pets"));
        assert_eq!(config.trigger_name(), "sync");
    }
}
