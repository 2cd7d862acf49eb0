use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use super::domain::ComparableProduct;
use super::store::CompareStore;

/// Most products a compare set holds at once.
pub const MAX_COMPARE: usize = 3;

/// Item count at which adding a product opens the comparison modal.
const AUTO_OPEN_AT: usize = 2;

/// What an `add` call did; every outcome is a valid state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
    AtCapacity,
}

/// Bounded, deduplicated selection of products bound to one storage slot.
///
/// The in-memory items are authoritative. Every mutation writes the slot afterwards and
/// a failed write is logged rather than returned.
pub struct CompareSet<S> {
    store: Arc<S>,
    slot: String,
    items: Vec<ComparableProduct>,
    modal_visible: bool,
}

impl<S> CompareSet<S>
where
    S: CompareStore,
{
    /// Restore the set persisted under `slot`, or start empty when the slot is
    /// unreadable or malformed.
    pub fn restore(store: Arc<S>, slot: impl Into<String>) -> Self {
        let slot = slot.into();
        let items = match store.load(&slot) {
            Ok(items) => sanitize(items),
            Err(err) => {
                warn!(%slot, error = %err, "compare slot unreadable; starting empty");
                Vec::new()
            }
        };

        Self {
            store,
            slot,
            items,
            modal_visible: false,
        }
    }

    pub fn add(&mut self, product: ComparableProduct) -> AddOutcome {
        if self.items.len() >= MAX_COMPARE {
            debug!(slot = %self.slot, product_id = %product.id, "compare set full");
            return AddOutcome::AtCapacity;
        }
        if self.is_in_compare(&product.id) {
            return AddOutcome::AlreadyPresent;
        }

        self.items.push(product);
        if self.items.len() >= AUTO_OPEN_AT {
            self.modal_visible = true;
        }
        self.persist();
        AddOutcome::Added
    }

    /// Drop `product_id` from the set; unknown ids leave the items untouched.
    pub fn remove(&mut self, product_id: &str) {
        self.items.retain(|item| item.id != product_id);
        if self.items.len() < AUTO_OPEN_AT {
            self.modal_visible = false;
        }
        self.persist();
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.modal_visible = false;
        self.persist();
    }

    pub fn is_in_compare(&self, product_id: &str) -> bool {
        self.items.iter().any(|item| item.id == product_id)
    }

    pub fn can_add_more(&self) -> bool {
        self.items.len() < MAX_COMPARE
    }

    /// Explicit open/close; holds until the next add or remove recomputes it.
    pub fn set_modal_visible(&mut self, visible: bool) {
        self.modal_visible = visible;
    }

    pub fn modal_visible(&self) -> bool {
        self.modal_visible
    }

    pub fn items(&self) -> &[ComparableProduct] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn slot(&self) -> &str {
        &self.slot
    }

    fn persist(&self) {
        if let Err(err) = self.store.save(&self.slot, &self.items) {
            warn!(slot = %self.slot, error = %err, "failed to persist compare slot");
        }
    }
}

/// Enforce the dedup and capacity invariants on restored data, keeping first occurrences.
fn sanitize(items: Vec<ComparableProduct>) -> Vec<ComparableProduct> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.id.clone()))
        .take(MAX_COMPARE)
        .collect()
}
