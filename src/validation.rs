//! Pre-mutation validation of product payloads.
//!
//! One rule set serves both forms, parameterized by [`Strictness`]: the
//! create form refuses zero stock and near-zero prices, while the edit
//! dialog accepts any non-negative value. Violations are collected rather than
//! short-circuited, and every error carries the wire-format field path
//! (`variations[0].stockQuantity`) so a form can pin the message to the
//! exact row and field that failed.
//!
//! Drafts also own record construction: `into_product` stamps fresh ids and
//! timestamps for the create path, `apply_to` merges an edit over an
//! existing record while preserving its id and creation time.

use crate::catalog::identity::{ProductId, VariationId};
use crate::catalog::model::{Product, ProductVariation};
use chrono::Utc;

/// Which rule strictness applies to a payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strictness {
    /// Creation: stock must be positive, price strictly above 0.01.
    Create,
    /// Editing: stock and price only need to be non-negative.
    Edit,
}

/// Candidate variation as entered in a form row.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VariationDraft {
    pub color: String,
    pub stock_quantity: u32,
    pub price: f64,
}

/// Candidate product as entered in a form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductDraft {
    pub name: String,
    pub variations: Vec<VariationDraft>,
}

/// One field-scoped violation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    /// Wire-format path, e.g. `name` or `variations[2].price`.
    pub path: String,
    pub message: String,
}

/// Outcome of validating a draft: empty means the payload may be stored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    errors: Vec<FieldError>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// First message recorded against a field path, for inline display.
    pub fn message_for(&self, path: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|err| err.path == path)
            .map(|err| err.message.as_str())
    }

    fn push(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            path: path.into(),
            message: message.into(),
        });
    }
}

/// Check a draft against the rules for the given strictness.
///
/// Every violation is reported; one bad variation row never masks another.
pub fn validate_draft(draft: &ProductDraft, strictness: Strictness) -> ValidationReport {
    let mut report = ValidationReport::default();

    if draft.name.trim().is_empty() {
        report.push("name", "name must not be empty");
    }

    if draft.variations.is_empty() {
        report.push("variations", "add at least one variation");
    }

    for (index, variation) in draft.variations.iter().enumerate() {
        if variation.color.trim().is_empty() {
            report.push(
                format!("variations[{index}].color"),
                "color must not be empty",
            );
        }

        if strictness == Strictness::Create && variation.stock_quantity == 0 {
            report.push(
                format!("variations[{index}].stockQuantity"),
                "stock quantity must be greater than zero",
            );
        }

        let price_path = || format!("variations[{index}].price");
        if !variation.price.is_finite() {
            report.push(price_path(), "price must be a number");
        } else {
            match strictness {
                Strictness::Create if variation.price <= 0.01 => {
                    report.push(price_path(), "price must be greater than 0.01");
                }
                Strictness::Edit if variation.price < 0.0 => {
                    report.push(price_path(), "price must not be negative");
                }
                _ => {}
            }
        }
    }

    report
}

impl ProductDraft {
    /// Seed an edit form from a stored record.
    pub fn from_product(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            variations: product
                .variations
                .iter()
                .map(|v| VariationDraft {
                    color: v.color.clone(),
                    stock_quantity: v.stock_quantity,
                    price: v.price,
                })
                .collect(),
        }
    }

    /// Build a brand-new record from a validated draft.
    ///
    /// Assigns fresh ids to the product and every variation and stamps both
    /// timestamps with the same instant. Validation is the caller's step;
    /// construction does not re-check the rules.
    pub fn into_product(self) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId::generate(),
            name: self.name,
            variations: self.variations.into_iter().map(build_variation).collect(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge a validated edit over an existing record.
    ///
    /// The id and `created_at` of the original are preserved, `updated_at`
    /// is refreshed, and the variation list is replaced wholesale with
    /// fresh ids (form rows do not carry ids).
    pub fn apply_to(&self, existing: &Product) -> Product {
        Product {
            id: existing.id.clone(),
            name: self.name.clone(),
            variations: self
                .variations
                .iter()
                .cloned()
                .map(build_variation)
                .collect(),
            created_at: existing.created_at,
            updated_at: Utc::now(),
        }
    }
}

fn build_variation(draft: VariationDraft) -> ProductVariation {
    ProductVariation {
        id: VariationId::generate(),
        color: draft.color,
        stock_quantity: draft.stock_quantity,
        price: draft.price,
    }
}
