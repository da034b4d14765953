//! Serializable representation of the persisted catalog.
//!
//! The types mirror the slot's wire shape: camelCase field names, ISO-8601
//! timestamps, prices and stock counts as plain JSON numbers. `parse_snapshot`
//! accepts both the versioned envelope written by current builds and the
//! unversioned legacy array shape, so existing slots keep loading after an
//! upgrade.

use crate::catalog::identity::{ProductId, VariationId};
use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Version key stamped into every snapshot envelope this crate writes.
pub const SNAPSHOT_SCHEMA_VERSION: &str = "catalog_snapshot_v1";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// One color/stock/price combination belonging to a product.
///
/// The id defaults to blank on deserialization because the legacy edit
/// dialog appended variations without one; hydration assigns a fresh id
/// before the record enters the store.
pub struct ProductVariation {
    #[serde(default)]
    pub id: VariationId,
    pub color: String,
    pub stock_quantity: u32,
    pub price: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// A catalog record: name plus an ordered, never-empty list of variations.
///
/// `created_at` is set once at creation; `updated_at` is refreshed on every
/// successful edit. Insertion order of `variations` is display order.
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub variations: Vec<ProductVariation>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Cheapest price across variations, used as the product's sort key.
    ///
    /// `None` only for a variation-less record, which the store never admits;
    /// callers treat it as sorting last.
    pub fn min_price(&self) -> Option<f64> {
        self.variations
            .iter()
            .map(|v| v.price)
            .min_by(|a, b| a.total_cmp(b))
    }

    /// Smallest stock count across variations, the `stock` sort key.
    pub fn min_stock(&self) -> Option<u32> {
        self.variations.iter().map(|v| v.stock_quantity).min()
    }

    /// Assign fresh ids to variations that arrived without one.
    pub fn fill_missing_variation_ids(&mut self) {
        for variation in &mut self.variations {
            if variation.id.is_blank() {
                variation.id = VariationId::generate();
            }
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
/// Versioned envelope around the persisted product list.
pub struct CatalogSnapshot {
    pub schema_version: String,
    pub products: Vec<Product>,
}

impl CatalogSnapshot {
    /// Wrap the current product list for persistence.
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            schema_version: SNAPSHOT_SCHEMA_VERSION.to_string(),
            products,
        }
    }
}

/// Parse slot contents into the product sequence.
///
/// Accepts the versioned envelope or the legacy bare array. Envelopes with a
/// malformed or unknown `schema_version` are rejected rather than half-read;
/// the store treats any parse failure as an empty catalog.
pub fn parse_snapshot(contents: &str) -> Result<Vec<Product>> {
    let trimmed = contents.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    let value: Value =
        serde_json::from_str(trimmed).context("slot contents are not valid JSON")?;

    let mut products = match value {
        Value::Array(_) => serde_json::from_value::<Vec<Product>>(value)
            .context("unable to parse legacy product array")?,
        Value::Object(_) => {
            let snapshot: CatalogSnapshot = serde_json::from_value(value)
                .context("unable to parse catalog snapshot envelope")?;
            validate_snapshot_version(&snapshot.schema_version)?;
            snapshot.products
        }
        _ => bail!("unsupported slot contents; expected object or array"),
    };

    for product in &mut products {
        product.fill_missing_variation_ids();
    }
    Ok(products)
}

/// Serialize the product list as a versioned snapshot envelope.
pub fn encode_snapshot(products: &[Product]) -> Result<String, serde_json::Error> {
    serde_json::to_string(&CatalogSnapshot::new(products.to_vec()))
}

fn validate_snapshot_version(schema_version: &str) -> Result<()> {
    if schema_version.is_empty() {
        bail!("schema_version must not be empty");
    }

    if !schema_version
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
    {
        bail!(
            "schema_version must match ^[A-Za-z0-9_.-]+$, got {}",
            schema_version
        );
    }

    if schema_version != SNAPSHOT_SCHEMA_VERSION {
        bail!(
            "schema_version '{}' is not readable by this build (expected '{}')",
            schema_version,
            SNAPSHOT_SCHEMA_VERSION
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_product() -> Product {
        Product {
            id: ProductId("p-1".to_string()),
            name: "Camisa".to_string(),
            variations: vec![ProductVariation {
                id: VariationId("v-1".to_string()),
                color: "Azul".to_string(),
                stock_quantity: 10,
                price: 49.90,
            }],
            created_at: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            updated_at: Utc.with_ymd_and_hms(2024, 3, 2, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn product_serializes_with_wire_field_names() {
        let json = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(json.get("name").and_then(Value::as_str), Some("Camisa"));
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
        let variation = &json["variations"][0];
        assert_eq!(variation.get("stockQuantity").and_then(Value::as_u64), Some(10));
        assert_eq!(variation.get("price").and_then(Value::as_f64), Some(49.90));
    }

    #[test]
    fn envelope_round_trips_losslessly() {
        let products = vec![sample_product()];
        let encoded = encode_snapshot(&products).unwrap();
        let reloaded = parse_snapshot(&encoded).unwrap();
        assert_eq!(reloaded, products);
    }

    #[test]
    fn legacy_array_shape_still_loads() {
        let legacy = r#"[{
            "id": "p-legacy",
            "name": "Tênis",
            "variations": [
                {"id": "v-1", "color": "Preto", "stockQuantity": 3, "price": 199.0}
            ],
            "createdAt": "2023-11-20T10:30:00.000Z",
            "updatedAt": "2023-11-21T08:00:00.000Z"
        }]"#;
        let products = parse_snapshot(legacy).unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id.0, "p-legacy");
        assert_eq!(products[0].variations[0].color, "Preto");
    }

    #[test]
    fn missing_variation_id_gets_generated_on_load() {
        let legacy = r#"[{
            "id": "p-legacy",
            "name": "Tênis",
            "variations": [
                {"color": "Branco", "stockQuantity": 1, "price": 10.0},
                {"id": "", "color": "Preto", "stockQuantity": 2, "price": 12.0}
            ],
            "createdAt": "2023-11-20T10:30:00Z",
            "updatedAt": "2023-11-21T08:00:00Z"
        }]"#;
        let products = parse_snapshot(legacy).unwrap();
        for variation in &products[0].variations {
            assert!(!variation.id.is_blank());
        }
        assert_ne!(products[0].variations[0].id, products[0].variations[1].id);
    }

    #[test]
    fn unknown_envelope_version_is_rejected() {
        let future = r#"{"schema_version": "catalog_snapshot_v9", "products": []}"#;
        assert!(parse_snapshot(future).is_err());

        let malformed = r#"{"schema_version": "not allowed!", "products": []}"#;
        assert!(parse_snapshot(malformed).is_err());
    }

    #[test]
    fn empty_and_garbage_inputs() {
        assert!(parse_snapshot("").unwrap().is_empty());
        assert!(parse_snapshot("   ").unwrap().is_empty());
        assert!(parse_snapshot("not json").is_err());
        assert!(parse_snapshot("42").is_err());
    }

    #[test]
    fn min_price_and_min_stock_pick_cheapest_variation() {
        let mut product = sample_product();
        product.variations.push(ProductVariation {
            id: VariationId("v-2".to_string()),
            color: "Verde".to_string(),
            stock_quantity: 2,
            price: 39.90,
        });
        assert_eq!(product.min_price(), Some(39.90));
        assert_eq!(product.min_stock(), Some(2));
    }
}
