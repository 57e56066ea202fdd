//! External property scopes.
//!
//! Overrides reach the application as flat string→string properties in
//! two scopes: a **script scope** shared by everyone using the
//! installation (a properties file next to the workbook/project) and a
//! **user scope** under the user's config directory. Both scopes are
//! flattened into one map before translation, script first, so a user
//! value wins on identical keys.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;
use crate::persistence::{
    default_script_properties_path, default_user_properties_path, load_json, save_json,
};

// ============================================================================
// Recognized Keys
// ============================================================================

/// Base URL of the remote API.
pub const KEY_API_URL: &str = "API_URL";
/// Bearer token for the remote API.
pub const KEY_API_KEY: &str = "API_KEY";
/// JSON object literal mapping endpoint names to paths.
pub const KEY_ENDPOINTS: &str = "ENDPOINTS";
/// Target sheet name.
pub const KEY_SHEET_NAME: &str = "SHEET_NAME";
/// Range cleared and written on a full refresh.
pub const KEY_FULL_REFRESH_RANGE: &str = "FULL_REFRESH_RANGE";
/// Write origin for incremental refreshes.
pub const KEY_INCREMENTAL_REFRESH_RANGE: &str = "INCREMENTAL_REFRESH_RANGE";
/// Handler name for the recurring trigger.
pub const KEY_TRIGGER_NAME: &str = "TRIGGER_NAME";

/// Every key the translation layer recognizes.
pub const RECOGNIZED_KEYS: &[&str] = &[
    KEY_API_URL,
    KEY_API_KEY,
    KEY_ENDPOINTS,
    KEY_SHEET_NAME,
    KEY_FULL_REFRESH_RANGE,
    KEY_INCREMENTAL_REFRESH_RANGE,
    KEY_TRIGGER_NAME,
];

// ============================================================================
// Scopes
// ============================================================================

/// Flat property map for one scope.
pub type Properties = HashMap<String, String>;

/// Which scope a property lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyScope {
    /// Installation-level scope, shared by every user.
    Script,
    /// Per-user scope; wins over the script scope on identical keys.
    User,
}

impl PropertyScope {
    /// Default file path of this scope.
    pub fn default_path(self) -> PathBuf {
        match self {
            PropertyScope::Script => default_script_properties_path(),
            PropertyScope::User => default_user_properties_path(),
        }
    }
}

impl std::fmt::Display for PropertyScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyScope::Script => write!(f, "script"),
            PropertyScope::User => write!(f, "user"),
        }
    }
}

// ============================================================================
// Scope I/O
// ============================================================================

/// Loads one scope's properties. A missing file is an empty scope.
pub async fn load_scope(path: &Path) -> Result<Properties, StoreError> {
    if !path.exists() {
        debug!(path = %path.display(), "Property scope not found, treating as empty");
        return Ok(Properties::new());
    }
    load_json(path).await
}

/// Writes one property into a scope file, creating the file as needed.
pub async fn set_property(path: &Path, key: &str, value: &str) -> Result<(), StoreError> {
    let mut properties = load_scope(path).await?;
    properties.insert(key.to_string(), value.to_string());
    save_json(path, &properties).await
}
