//! Catalog fingerprinting
//!
//! A fingerprint is a SHA-256 digest of the catalog's definitions. Schedules
//! are not invalidated when the catalog is reloaded, so logging the
//! fingerprint alongside every generated schedule is how two schedules can be
//! attributed to the same catalog value.

use crate::domain::{ImmunizeError, Result, VaccineDefinition};
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

/// Calculate the SHA-256 fingerprint of a definition set
///
/// Uses canonical JSON serialization so the digest does not depend on map
/// key ordering. Definition order is significant: the same definitions in a
/// different order are a different catalog document.
///
/// # Returns
///
/// A hex-encoded SHA-256 digest (64 characters).
pub fn fingerprint_definitions(definitions: &[VaccineDefinition]) -> Result<String> {
    let value = serde_json::to_value(definitions)
        .map_err(|e| ImmunizeError::Serialization(e.to_string()))?;
    let normalized = normalize_json(&value);

    let data_str = serde_json::to_string(&normalized)
        .map_err(|e| ImmunizeError::Serialization(e.to_string()))?;

    let mut hasher = Sha256::new();
    hasher.update(data_str.as_bytes());
    let result = hasher.finalize();

    Ok(format!("{result:x}"))
}

/// Recursively sort object keys
fn normalize_json(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), normalize_json(v)))
                .collect();
            Value::Object(sorted.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.iter().map(normalize_json).collect()),
        _ => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dose(id: &str, days: i64) -> VaccineDefinition {
        VaccineDefinition::builder()
            .vaccine_id(id)
            .name(id)
            .dose_number(1)
            .age_days(days)
            .build()
            .unwrap()
    }

    #[test]
    fn test_fingerprint_deterministic() {
        let defs = vec![dose("hepb", 0), dose("bcg", 28)];
        let first = fingerprint_definitions(&defs).unwrap();
        let second = fingerprint_definitions(&defs).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = fingerprint_definitions(&[dose("hepb", 0)]).unwrap();
        let b = fingerprint_definitions(&[dose("hepb", 1)]).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_empty() {
        let digest = fingerprint_definitions(&[]).unwrap();
        assert_eq!(digest.len(), 64);
    }

    #[test]
    fn test_normalize_json_sorts_keys() {
        let value = serde_json::json!({"b": 1, "a": {"d": 2, "c": 3}});
        let rendered = serde_json::to_string(&normalize_json(&value)).unwrap();
        assert_eq!(rendered, r#"{"a":{"c":3,"d":2},"b":1}"#);
    }
}
