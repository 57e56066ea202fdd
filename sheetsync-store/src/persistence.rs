//! File persistence helpers.
//!
//! JSON files are written atomically (temp file + rename) and, on Unix,
//! with owner-only permissions: the property scopes hold the API key.

use serde::{de::DeserializeOwned, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::StoreError;

// ============================================================================
// Default Paths
// ============================================================================

/// Returns the per-user configuration directory.
///
/// - Linux: `~/.config/sheetsync`
/// - macOS: `~/Library/Application Support/sheetsync`
/// - Windows: `%APPDATA%\sheetsync`
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|c| c.join("sheetsync"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Default path of the user-scope properties file.
pub fn default_user_properties_path() -> PathBuf {
    default_config_dir().join("properties.json")
}

/// Default path of the script-scope (installation-level) properties
/// file, resolved relative to the working directory.
pub fn default_script_properties_path() -> PathBuf {
    PathBuf::from("sheetsync.properties.json")
}

/// Default path of the trigger registry.
pub fn default_triggers_path() -> PathBuf {
    default_config_dir().join("triggers.json")
}

// ============================================================================
// Security: File Permissions
// ============================================================================

/// Sets owner-only permissions (0o600) on Unix systems.
#[cfg(unix)]
async fn set_restrictive_permissions(path: &Path) -> Result<(), StoreError> {
    use std::os::unix::fs::PermissionsExt;

    let metadata = tokio::fs::metadata(path).await?;
    let mut perms = metadata.permissions();
    perms.set_mode(0o600);
    tokio::fs::set_permissions(path, perms).await?;

    debug!(path = %path.display(), mode = "0600", "Set restrictive permissions");
    Ok(())
}

/// No-op for non-Unix systems.
#[cfg(not(unix))]
async fn set_restrictive_permissions(_path: &Path) -> Result<(), StoreError> {
    Ok(())
}

// ============================================================================
// File Operations
// ============================================================================

/// Saves data to a JSON file with secure permissions.
///
/// Creates parent directories if they don't exist and writes atomically
/// via a temp file and rename.
pub async fn save_json<T: Serialize>(path: &Path, data: &T) -> Result<(), StoreError> {
    debug!(path = %path.display(), "Saving JSON file");

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string_pretty(data)?;

    let temp_path = path.with_extension("json.tmp");
    tokio::fs::write(&temp_path, &json).await?;
    tokio::fs::rename(&temp_path, path).await?;

    set_restrictive_permissions(path).await?;
    Ok(())
}

/// Loads data from a JSON file.
pub async fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    debug!(path = %path.display(), "Loading JSON file");
    let content = tokio::fs::read_to_string(path).await?;
    let data = serde_json::from_str(&content)?;
    Ok(data)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn default_paths_are_nonempty() {
        assert!(!default_config_dir().as_os_str().is_empty());
        assert!(default_user_properties_path().ends_with("properties.json"));
        assert!(default_triggers_path().ends_with("triggers.json"));
    }

    #[tokio::test]
    async fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");

        let data = json!({"key": "value", "n": 7});
        save_json(&path, &data).await.unwrap();
        let loaded: serde_json::Value = load_json(&path).await.unwrap();
        assert_eq!(loaded, data);
    }

    #[tokio::test]
    async fn save_creates_parent_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("deeply").join("nested").join("data.json");
        save_json(&path, &json!({})).await.unwrap();
        assert!(path.exists());
    }

    #[tokio::test]
    async fn load_nonexistent_file_errors() {
        let result: Result<serde_json::Value, _> =
            load_json(Path::new("/nonexistent/data.json")).await;
        assert!(matches!(result, Err(StoreError::Io(_))));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn saved_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.json");
        save_json(&path, &json!({"API_KEY": "hunter2"})).await.unwrap();

        let metadata = tokio::fs::metadata(&path).await.unwrap();
        assert_eq!(metadata.permissions().mode() & 0o777, 0o600);
    }
}
