//! Configuration resolution.
//!
//! The resolver is the only place configuration is constructed. It runs
//! once at process startup; everything downstream receives the resolved
//! [`Config`] by reference and the object is never mutated again.

use std::path::PathBuf;
use tracing::{debug, info};

use sheetsync_core::Config;

use crate::error::StoreError;
use crate::merge::{deep_merge, translate};
use crate::properties::{load_scope, PropertyScope};

/// Builds the application configuration from defaults plus the two
/// property scopes.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    script_path: PathBuf,
    user_path: PathBuf,
}

impl ConfigResolver {
    /// Resolver over the default scope paths.
    pub fn new() -> Self {
        Self {
            script_path: PropertyScope::Script.default_path(),
            user_path: PropertyScope::User.default_path(),
        }
    }

    /// Resolver over explicit scope paths.
    pub fn with_paths(script_path: impl Into<PathBuf>, user_path: impl Into<PathBuf>) -> Self {
        Self {
            script_path: script_path.into(),
            user_path: user_path.into(),
        }
    }

    /// Path of the given scope's properties file.
    pub fn scope_path(&self, scope: PropertyScope) -> &std::path::Path {
        match scope {
            PropertyScope::Script => &self.script_path,
            PropertyScope::User => &self.user_path,
        }
    }

    /// Resolves and validates the configuration.
    ///
    /// Scopes are flattened script-first so user values win on identical
    /// keys, translated onto the config shape, deep-merged over the
    /// compiled-in defaults, and validated. Any failure here aborts
    /// startup.
    pub async fn resolve(&self) -> Result<Config, StoreError> {
        let mut flat = load_scope(&self.script_path).await?;
        let user = load_scope(&self.user_path).await?;
        debug!(
            script = flat.len(),
            user = user.len(),
            "Loaded property scopes"
        );
        flat.extend(user);

        let overrides = translate(&flat)?;

        let mut merged = serde_json::to_value(Config::default())?;
        deep_merge(&mut merged, overrides);

        let config: Config = serde_json::from_value(merged)?;
        config.validate().map_err(StoreError::Config)?;

        info!(
            endpoints = config.api.endpoints.len(),
            sheet = %config.sheet.sheet_name,
            "Configuration resolved"
        );
        Ok(config)
    }
}

impl Default for ConfigResolver {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::save_json;
    use crate::properties::Properties;
    use sheetsync_core::ConfigError;
    use tempfile::TempDir;

    async fn write_scope(dir: &TempDir, name: &str, pairs: &[(&str, &str)]) -> PathBuf {
        let path = dir.path().join(name);
        let properties: Properties = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        save_json(&path, &properties).await.unwrap();
        path
    }

    #[tokio::test]
    async fn overrides_win_and_defaults_survive() {
        let dir = TempDir::new().unwrap();
        let script = write_scope(
            &dir,
            "script.json",
            &[
                ("API_URL", "https://records.test"),
                ("API_KEY", "s3cret"),
                ("ENDPOINTS", r#"{"pets": "/pets", "owners": "/owners"}"#),
            ],
        )
        .await;
        let user = dir.path().join("user.json");

        let config = ConfigResolver::with_paths(&script, &user)
            .resolve()
            .await
            .unwrap();

        assert_eq!(config.api.base_url, "https://records.test");
        assert_eq!(config.api.api_key, "s3cret");
        // Untouched fields keep their compiled-in defaults.
        assert_eq!(config.sheet.sheet_name, "Records");
        assert_eq!(config.trigger_name, "sync");
        let names: Vec<&str> = config.api.endpoints.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["pets", "owners"]);
    }

    #[tokio::test]
    async fn user_scope_wins_over_script_scope() {
        let dir = TempDir::new().unwrap();
        let script = write_scope(
            &dir,
            "script.json",
            &[
                ("API_KEY", "script-key"),
                ("ENDPOINTS", r#"{"pets": "/pets"}"#),
                ("SHEET_NAME", "FromScript"),
            ],
        )
        .await;
        let user = write_scope(&dir, "user.json", &[("API_KEY", "user-key")]).await;

        let config = ConfigResolver::with_paths(&script, &user)
            .resolve()
            .await
            .unwrap();

        assert_eq!(config.api.api_key, "user-key");
        // Keys only the script scope sets still apply.
        assert_eq!(config.sheet.sheet_name, "FromScript");
    }

    #[tokio::test]
    async fn resolution_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let script = write_scope(
            &dir,
            "script.json",
            &[("API_KEY", "k"), ("ENDPOINTS", r#"{"a": "/a"}"#)],
        )
        .await;
        let user = dir.path().join("user.json");

        let resolver = ConfigResolver::with_paths(&script, &user);
        let first = serde_json::to_value(resolver.resolve().await.unwrap()).unwrap();
        let second = serde_json::to_value(resolver.resolve().await.unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn missing_api_key_fails_resolution() {
        let dir = TempDir::new().unwrap();
        let script = write_scope(&dir, "script.json", &[("API_URL", "https://x.test")]).await;
        let user = dir.path().join("user.json");

        let err = ConfigResolver::with_paths(&script, &user)
            .resolve()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Config(ConfigError::MissingField("api.api_key"))
        ));
    }

    #[tokio::test]
    async fn malformed_endpoints_fails_resolution() {
        let dir = TempDir::new().unwrap();
        let script = write_scope(
            &dir,
            "script.json",
            &[("API_KEY", "k"), ("ENDPOINTS", "{oops")],
        )
        .await;
        let user = dir.path().join("user.json");

        let err = ConfigResolver::with_paths(&script, &user)
            .resolve()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Config(ConfigError::MalformedProperty { .. })
        ));
    }

    #[tokio::test]
    async fn bad_endpoint_path_fails_resolution() {
        let dir = TempDir::new().unwrap();
        let script = write_scope(
            &dir,
            "script.json",
            &[("API_KEY", "k"), ("ENDPOINTS", r#"{"pets": "pets"}"#)],
        )
        .await;
        let user = dir.path().join("user.json");

        let err = ConfigResolver::with_paths(&script, &user)
            .resolve()
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Config(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[tokio::test]
    async fn empty_scopes_fail_only_on_validation() {
        let dir = TempDir::new().unwrap();
        // No scope files at all: merge succeeds, validation rejects the
        // empty default API key.
        let err = ConfigResolver::with_paths(
            dir.path().join("script.json"),
            dir.path().join("user.json"),
        )
        .resolve()
        .await
        .unwrap_err();
        assert!(err.is_config());
    }
}
