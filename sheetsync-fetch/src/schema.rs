//! Response shape validation.

use serde_json::Value;

use crate::error::FetchError;

/// Asserts `value` is a JSON object containing every key in `required`.
///
/// Presence check only: the values under the keys are not inspected.
/// Fails naming the first absent key.
pub fn require_keys(value: &Value, required: &[&str]) -> Result<(), FetchError> {
    let Some(object) = value.as_object() else {
        return Err(FetchError::SchemaNotObject);
    };
    for key in required {
        if !object.contains_key(*key) {
            return Err(FetchError::SchemaMissingKey((*key).to_string()));
        }
    }
    Ok(())
}
