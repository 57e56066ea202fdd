//! External key translation and value-level deep merge.

use serde_json::{json, Value};
use tracing::warn;

use sheetsync_core::ConfigError;

use crate::properties::{
    Properties, KEY_API_KEY, KEY_API_URL, KEY_ENDPOINTS, KEY_FULL_REFRESH_RANGE,
    KEY_INCREMENTAL_REFRESH_RANGE, KEY_SHEET_NAME, KEY_TRIGGER_NAME,
};

/// Translates recognized external keys into a config-shaped JSON value.
///
/// The mapping is an exhaustive match; unrecognized keys are skipped
/// with a warning rather than rejected (lenient mode). `ENDPOINTS` must
/// hold a JSON object literal.
pub fn translate(properties: &Properties) -> Result<Value, ConfigError> {
    let mut overrides = json!({});
    for (key, value) in properties {
        let patch = match key.as_str() {
            KEY_API_URL => json!({"api": {"base_url": value}}),
            KEY_API_KEY => json!({"api": {"api_key": value}}),
            KEY_ENDPOINTS => {
                let endpoints: Value = serde_json::from_str(value).map_err(|e| {
                    ConfigError::MalformedProperty {
                        key: KEY_ENDPOINTS,
                        reason: e.to_string(),
                    }
                })?;
                if !endpoints.is_object() {
                    return Err(ConfigError::MalformedProperty {
                        key: KEY_ENDPOINTS,
                        reason: "expected a JSON object literal".to_string(),
                    });
                }
                json!({"api": {"endpoints": endpoints}})
            }
            KEY_SHEET_NAME => json!({"sheet": {"sheet_name": value}}),
            KEY_FULL_REFRESH_RANGE => json!({"sheet": {"full_refresh_range": value}}),
            KEY_INCREMENTAL_REFRESH_RANGE => {
                json!({"sheet": {"incremental_refresh_range": value}})
            }
            KEY_TRIGGER_NAME => json!({"trigger_name": value}),
            unknown => {
                warn!(key = unknown, "Ignoring unrecognized property key");
                continue;
            }
        };
        deep_merge(&mut overrides, patch);
    }
    Ok(overrides)
}

/// Merges `overlay` onto `base`.
///
/// Where both sides hold a non-array object the merge recurses;
/// otherwise the overlay value replaces the base value. Null overlay
/// values are skipped, so absent keys never erase defaults.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, value) in overlay_map {
                if value.is_null() {
                    continue;
                }
                match base_map.get_mut(&key) {
                    Some(slot) if slot.is_object() && value.is_object() => {
                        deep_merge(slot, value);
                    }
                    Some(slot) => *slot = value,
                    None => {
                        base_map.insert(key, value);
                    }
                }
            }
        }
        (base, overlay) => {
            if !overlay.is_null() {
                *base = overlay;
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
