//! Sole authority over the persisted product list.
//!
//! Every mutation passes through the store and synchronously rewrites the
//! full snapshot in the backing slot. Readers get an immutable slice; there
//! is no mutation path around `add`/`update`/`remove`. Persistence failures
//! do not roll back the in-memory change: the session stays usable and the
//! caller surfaces the returned error as a non-fatal notification.

use crate::catalog::identity::ProductId;
use crate::catalog::model::{Product, encode_snapshot, parse_snapshot};
use crate::storage::{SlotError, StorageSlot};
use thiserror::Error;

/// Errors surfaced by catalog mutations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no product with id {id} in the catalog")]
    NotFound { id: ProductId },

    #[error("unable to encode the catalog snapshot")]
    Encode {
        #[source]
        source: serde_json::Error,
    },

    #[error("unable to persist the catalog snapshot")]
    Persist {
        #[source]
        source: SlotError,
    },
}

/// In-memory product list bound to the storage slot it mirrors.
pub struct CatalogStore<S: StorageSlot> {
    slot: S,
    items: Vec<Product>,
}

impl<S: StorageSlot> CatalogStore<S> {
    /// Hydrate a store from the slot.
    ///
    /// Never fails: an absent slot starts empty, and unreadable or
    /// unparsable contents degrade to an empty catalog with a logged
    /// warning instead of propagating an error to the caller.
    pub fn initialize(slot: S) -> Self {
        let items = match slot.read() {
            Ok(Some(contents)) => match parse_snapshot(&contents) {
                Ok(products) => products,
                Err(err) => {
                    log::warn!("discarding unreadable catalog snapshot: {err:#}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(err) => {
                log::warn!("unable to read the catalog slot, starting empty: {err}");
                Vec::new()
            }
        };
        Self { slot, items }
    }

    /// Append a product and persist.
    ///
    /// Append order is creation order, the default display order. The input
    /// id is trusted to be collision-free (128-bit random generation).
    pub fn add(&mut self, product: Product) -> Result<(), StoreError> {
        self.items.push(product);
        self.persist()
    }

    /// Replace the record with the same id, preserving its position.
    ///
    /// The caller hands in the merged record (id and `created_at` already
    /// carried over, `updated_at` refreshed). An id absent from the catalog
    /// is an error; nothing is mutated or persisted in that case.
    pub fn update(&mut self, product: Product) -> Result<(), StoreError> {
        let Some(index) = self.items.iter().position(|item| item.id == product.id) else {
            log::warn!("update for unknown product id {}", product.id);
            return Err(StoreError::NotFound { id: product.id });
        };
        self.items[index] = product;
        self.persist()
    }

    /// Drop the record with the given id and persist.
    ///
    /// Returns `false` without touching the slot when no record matched;
    /// the remaining items keep their order either way.
    pub fn remove(&mut self, id: &ProductId) -> Result<bool, StoreError> {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            return Ok(false);
        }
        self.persist()?;
        Ok(true)
    }

    /// Immutable view of the current product sequence.
    pub fn list(&self) -> &[Product] {
        &self.items
    }

    /// Look up a single record, e.g. to seed an edit dialog with a copy.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The backing slot, for callers that need to inspect persisted state.
    pub fn slot(&self) -> &S {
        &self.slot
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let encoded = encode_snapshot(&self.items)
            .map_err(|source| StoreError::Encode { source })?;
        self.slot
            .write(&encoded)
            .map_err(|source| StoreError::Persist { source })
    }
}
