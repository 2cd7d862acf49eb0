//! Product comparison: a bounded selection of up to three products per browser session,
//! persisted through a pluggable key-value slot.

mod domain;
pub mod router;
mod sessions;
mod set;
mod store;
mod table;

pub use domain::ComparableProduct;
pub use router::{compare_router, CompareApi};
pub use sessions::{CompareSessions, CompareView, SessionId};
pub use set::{AddOutcome, CompareSet, MAX_COMPARE};
pub use store::{CompareStore, JsonFileCompareStore, MemoryCompareStore, StoreError};
pub use table::{CompareBar, CompareRow, CompareTable};
