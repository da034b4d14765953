//! Product catalog wiring.
//!
//! This module owns the canonical product list and its persisted form:
//! serde models mirroring the slot's wire shape, opaque identifiers, and
//! the store every mutation passes through. Display surfaces consume the
//! list through `query::view`; forms go through `validation` before calling
//! into [`CatalogStore`].

pub mod identity;
pub mod model;
pub mod store;

pub use identity::{ProductId, VariationId};
pub use model::{
    CatalogSnapshot, Product, ProductVariation, SNAPSHOT_SCHEMA_VERSION, encode_snapshot,
    parse_snapshot,
};
pub use store::{CatalogStore, StoreError};
