//! Guard-rail validation of persisted snapshots.
//!
//! The crate ships a JSON Schema for the versioned snapshot envelope under
//! `schema/catalog_snapshot.schema.json`. The helpers here compile that
//! schema and report every violation in a snapshot value, so tests can keep
//! the writer and the published contract in sync and tooling can inspect a
//! slot without loading it into a store.

use anyhow::{Context, Result, anyhow};
use jsonschema::JSONSchema;
use serde_json::Value;

/// Bundled schema source for the snapshot envelope.
pub const SNAPSHOT_SCHEMA_JSON: &str = include_str!("../schema/catalog_snapshot.schema.json");

/// Validate a snapshot value against the bundled schema.
///
/// Returns the full list of violations rather than stopping at the first,
/// so a mismatch between writer and schema surfaces completely in one run.
/// An empty list means the snapshot conforms.
pub fn validate_snapshot_value(instance: &Value) -> Result<Vec<String>> {
    let schema: Value =
        serde_json::from_str(SNAPSHOT_SCHEMA_JSON).context("parsing bundled snapshot schema")?;
    let compiled = JSONSchema::compile(&schema)
        .map_err(|err| anyhow!("compiling bundled snapshot schema: {err}"))?;

    let violations = match compiled.validate(instance) {
        Ok(()) => Vec::new(),
        Err(errors) => errors
            .map(|err| format!("{}: {err}", err.instance_path))
            .collect(),
    };
    Ok(violations)
}

/// Validate raw slot contents expected to hold the versioned envelope.
pub fn validate_snapshot_str(contents: &str) -> Result<Vec<String>> {
    let value: Value =
        serde_json::from_str(contents).context("snapshot contents are not valid JSON")?;
    validate_snapshot_value(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bundled_schema_compiles() {
        let empty = json!({"schema_version": "catalog_snapshot_v1", "products": []});
        assert!(validate_snapshot_value(&empty).unwrap().is_empty());
    }

    #[test]
    fn variation_less_product_is_flagged() {
        let snapshot = json!({
            "schema_version": "catalog_snapshot_v1",
            "products": [{
                "id": "p-1",
                "name": "Camisa",
                "variations": [],
                "createdAt": "2024-03-01T12:00:00Z",
                "updatedAt": "2024-03-01T12:00:00Z"
            }]
        });
        let violations = validate_snapshot_value(&snapshot).unwrap();
        assert!(!violations.is_empty());
        assert!(violations.iter().any(|v| v.contains("/products/0/variations")));
    }

    #[test]
    fn negative_numbers_are_flagged() {
        let snapshot = json!({
            "schema_version": "catalog_snapshot_v1",
            "products": [{
                "id": "p-1",
                "name": "Camisa",
                "variations": [{
                    "id": "v-1",
                    "color": "Azul",
                    "stockQuantity": -2,
                    "price": -1.5
                }],
                "createdAt": "2024-03-01T12:00:00Z",
                "updatedAt": "2024-03-01T12:00:00Z"
            }]
        });
        let violations = validate_snapshot_value(&snapshot).unwrap();
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn wrong_version_constant_is_flagged() {
        let snapshot = json!({"schema_version": "catalog_snapshot_v2", "products": []});
        assert!(!validate_snapshot_value(&snapshot).unwrap().is_empty());
    }

    #[test]
    fn non_json_contents_are_an_error_not_a_violation_list() {
        assert!(validate_snapshot_str("{nope").is_err());
    }
}
