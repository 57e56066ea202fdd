//! Persisted recurring-trigger registry.
//!
//! Triggers are scheduler entries identified by the handler name they
//! invoke. The registry keeps at most one entry per handler by deleting
//! existing entries before creating a replacement. Delete-then-create is
//! not atomic; a crash in between leaves no trigger, and the next
//! successful sync run re-creates it via [`TriggerRegistry::ensure`].

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info};

use sheetsync_core::config::DEFAULT_PERIOD_MINUTES;
use sheetsync_core::{CoreError, TriggerHost};

use crate::error::StoreError;
use crate::persistence::{default_triggers_path, load_json, save_json};

// ============================================================================
// Trigger
// ============================================================================

/// One recurring trigger bound to a handler name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trigger {
    /// Handler the trigger invokes.
    pub handler: String,
    /// Firing period in minutes.
    pub period_minutes: u64,
    /// When the trigger was registered.
    pub created_at: DateTime<Utc>,
}

impl Trigger {
    /// Next due time, given when the trigger last fired.
    ///
    /// A trigger that has never fired is due one period after creation.
    pub fn next_due(&self, last_fired: Option<DateTime<Utc>>) -> DateTime<Utc> {
        let base = last_fired.unwrap_or(self.created_at);
        base + Duration::minutes(i64::try_from(self.period_minutes).unwrap_or(i64::MAX))
    }
}

// ============================================================================
// Trigger Registry
// ============================================================================

/// Registry of recurring triggers, persisted as a JSON list.
#[derive(Debug, Clone)]
pub struct TriggerRegistry {
    path: PathBuf,
}

impl TriggerRegistry {
    /// Registry at the default path.
    pub fn new() -> Self {
        Self {
            path: default_triggers_path(),
        }
    }

    /// Registry at an explicit path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All registered triggers. A missing registry file is empty.
    pub async fn list(&self) -> Result<Vec<Trigger>, StoreError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        load_json(&self.path).await
    }

    /// Guarantees one trigger exists for `handler`.
    ///
    /// Idempotent: when an entry for `handler` already exists this is a
    /// no-op, otherwise one is created at the default hourly period.
    pub async fn ensure(&self, handler: &str) -> Result<(), StoreError> {
        let mut triggers = self.list().await?;
        if triggers.iter().any(|t| t.handler == handler) {
            debug!(handler, "Trigger already registered");
            return Ok(());
        }
        triggers.push(Trigger {
            handler: handler.to_string(),
            period_minutes: DEFAULT_PERIOD_MINUTES,
            created_at: Utc::now(),
        });
        self.save(&triggers).await?;
        info!(handler, period_minutes = DEFAULT_PERIOD_MINUTES, "Created recurring trigger");
        Ok(())
    }

    /// Reconfigures the trigger for `handler`.
    ///
    /// Existing entries for the handler are deleted first. When
    /// `enabled` is false that is the whole operation; otherwise exactly
    /// one new entry is created at `period_minutes`.
    pub async fn configure(
        &self,
        handler: &str,
        period_minutes: u64,
        enabled: bool,
    ) -> Result<(), StoreError> {
        let mut triggers = self.list().await?;
        triggers.retain(|t| t.handler != handler);
        if enabled {
            triggers.push(Trigger {
                handler: handler.to_string(),
                period_minutes,
                created_at: Utc::now(),
            });
            info!(handler, period_minutes, "Reconfigured recurring trigger");
        } else {
            info!(handler, "Disabled recurring trigger");
        }
        self.save(&triggers).await
    }

    /// Deletes every trigger bound to `handler`, returning how many
    /// were removed.
    pub async fn remove_all(&self, handler: &str) -> Result<usize, StoreError> {
        let mut triggers = self.list().await?;
        let before = triggers.len();
        triggers.retain(|t| t.handler != handler);
        let removed = before - triggers.len();
        if removed > 0 {
            self.save(&triggers).await?;
        }
        Ok(removed)
    }

    async fn save(&self, triggers: &[Trigger]) -> Result<(), StoreError> {
        save_json(&self.path, &triggers).await
    }
}

impl Default for TriggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerHost for TriggerRegistry {
    async fn ensure(&mut self, handler: &str) -> Result<(), CoreError> {
        TriggerRegistry::ensure(self, handler)
            .await
            .map_err(|e| CoreError::Scheduler(e.to_string()))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn registry(dir: &TempDir) -> TriggerRegistry {
        TriggerRegistry::with_path(dir.path().join("triggers.json"))
    }

    #[tokio::test]
    async fn empty_registry_lists_nothing() {
        let dir = TempDir::new().unwrap();
        assert!(registry(&dir).list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn ensure_twice_registers_exactly_one_trigger() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        registry.ensure("sync").await.unwrap();
        registry.ensure("sync").await.unwrap();

        let triggers = registry.list().await.unwrap();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].handler, "sync");
        assert_eq!(triggers[0].period_minutes, DEFAULT_PERIOD_MINUTES);
    }

    #[tokio::test]
    async fn ensure_leaves_other_handlers_alone() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        registry.ensure("sync").await.unwrap();
        registry.ensure("cleanup").await.unwrap();

        assert_eq!(registry.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn configure_replaces_the_existing_trigger() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        registry.ensure("sync").await.unwrap();
        registry.configure("sync", 15, true).await.unwrap();

        let triggers = registry.list().await.unwrap();
        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].period_minutes, 15);
    }

    #[tokio::test]
    async fn configure_disabled_removes_without_creating() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        registry.ensure("sync").await.unwrap();
        registry.configure("sync", 15, false).await.unwrap();

        assert!(registry.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn remove_all_reports_removed_count() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&dir);

        registry.ensure("sync").await.unwrap();
        assert_eq!(registry.remove_all("sync").await.unwrap(), 1);
        assert_eq!(registry.remove_all("sync").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn registry_roundtrips_through_disk() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("triggers.json");

        TriggerRegistry::with_path(&path).ensure("sync").await.unwrap();
        let reloaded = TriggerRegistry::with_path(&path).list().await.unwrap();
        assert_eq!(reloaded.len(), 1);
    }

    #[test]
    fn next_due_uses_creation_time_until_first_firing() {
        let created = Utc::now();
        let trigger = Trigger {
            handler: "sync".to_string(),
            period_minutes: 60,
            created_at: created,
        };
        assert_eq!(trigger.next_due(None), created + Duration::minutes(60));

        let fired = created + Duration::minutes(90);
        assert_eq!(
            trigger.next_due(Some(fired)),
            fired + Duration::minutes(60)
        );
    }
}
