//! Shared library for the stockroom catalog manager.
//!
//! The crate is the state-management core of a small product catalog
//! application. It owns three seams the UI layer builds on: the
//! [`CatalogStore`] as sole authority over the product list (every mutation
//! rewrites a full JSON snapshot into a [`storage::StorageSlot`]), the pure
//! query engine in [`query`] that derives filtered, sorted, paginated views,
//! and the [`validation`] pass forms run before handing a payload to the
//! store. Page markup, navigation, and notifications are external
//! collaborators; nothing here renders or blocks.

pub mod catalog;
pub mod query;
pub mod snapshot_validation;
pub mod storage;
pub mod validation;

pub use catalog::{
    CatalogSnapshot, CatalogStore, Product, ProductId, ProductVariation, SNAPSHOT_SCHEMA_VERSION,
    StoreError, VariationId, encode_snapshot, parse_snapshot,
};
pub use query::{
    Filters, PAGE_SIZE, PageView, SortKey, SortOrder, SortSpec, ViewState, view,
    view_with_page_size,
};
pub use snapshot_validation::{validate_snapshot_str, validate_snapshot_value};
pub use storage::{FileSlot, MemorySlot, SlotError, StorageSlot};
pub use validation::{
    FieldError, ProductDraft, Strictness, ValidationReport, VariationDraft, validate_draft,
};
