use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::ComparableProduct;
use super::set::{AddOutcome, CompareSet};
use super::store::CompareStore;
use super::table::CompareTable;

/// Identifier of one browser session; each session owns an independent compare set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn slot(&self) -> String {
        format!("compare:{}", self.0)
    }
}

struct SessionEntry<S> {
    set: CompareSet<S>,
    updated_at: Option<DateTime<Utc>>,
    last_seen: DateTime<Utc>,
}

impl<S> SessionEntry<S>
where
    S: CompareStore,
{
    fn restore(store: Arc<S>, session: &SessionId) -> Self {
        Self {
            set: CompareSet::restore(store, session.slot()),
            updated_at: None,
            last_seen: Utc::now(),
        }
    }
}

type SharedEntry<S> = Arc<Mutex<SessionEntry<S>>>;

/// Serializable snapshot of a session's compare set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareView {
    pub session_id: String,
    pub items: Vec<ComparableProduct>,
    pub count: usize,
    pub modal_visible: bool,
    pub can_add_more: bool,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Compare sets for many sessions sharing one store.
///
/// Sessions are restored lazily from slot `compare:<session>` and are never reconciled
/// with each other. Only mutations keep a session resident; reads of an unknown session
/// go straight to the store. Each session has its own lock, and the session map is never
/// locked while the store is touched.
pub struct CompareSessions<S> {
    store: Arc<S>,
    sessions: Mutex<HashMap<SessionId, SharedEntry<S>>>,
}

impl<S> CompareSessions<S>
where
    S: CompareStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    fn resident(&self, session: &SessionId) -> Option<SharedEntry<S>> {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(session)
            .cloned()
    }

    fn resident_or_restore(&self, session: &SessionId) -> SharedEntry<S> {
        if let Some(entry) = self.resident(session) {
            return entry;
        }

        let restored = Arc::new(Mutex::new(SessionEntry::restore(
            self.store.clone(),
            session,
        )));
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(session.clone())
            .or_insert(restored)
            .clone()
    }

    fn mutate<T>(&self, session: &SessionId, apply: impl FnOnce(&mut SessionEntry<S>) -> T) -> T {
        let entry = self.resident_or_restore(session);
        let mut guard = entry.lock().unwrap_or_else(PoisonError::into_inner);
        guard.last_seen = Utc::now();
        apply(&mut guard)
    }

    fn inspect<T>(&self, session: &SessionId, read: impl FnOnce(&SessionEntry<S>) -> T) -> T {
        match self.resident(session) {
            Some(entry) => {
                let guard = entry.lock().unwrap_or_else(PoisonError::into_inner);
                read(&guard)
            }
            None => read(&SessionEntry::restore(self.store.clone(), session)),
        }
    }

    fn snapshot(session: &SessionId, entry: &SessionEntry<S>) -> CompareView {
        CompareView {
            session_id: session.0.clone(),
            items: entry.set.items().to_vec(),
            count: entry.set.len(),
            modal_visible: entry.set.modal_visible(),
            can_add_more: entry.set.can_add_more(),
            updated_at: entry.updated_at,
        }
    }

    pub fn view(&self, session: &SessionId) -> CompareView {
        self.inspect(session, |entry| Self::snapshot(session, entry))
    }

    pub fn add(&self, session: &SessionId, product: ComparableProduct) -> (AddOutcome, CompareView) {
        self.mutate(session, |entry| {
            let outcome = entry.set.add(product);
            if outcome == AddOutcome::Added {
                entry.updated_at = Some(Utc::now());
            }
            (outcome, Self::snapshot(session, entry))
        })
    }

    pub fn remove(&self, session: &SessionId, product_id: &str) -> CompareView {
        self.mutate(session, |entry| {
            entry.set.remove(product_id);
            entry.updated_at = Some(Utc::now());
            Self::snapshot(session, entry)
        })
    }

    pub fn clear(&self, session: &SessionId) -> CompareView {
        self.mutate(session, |entry| {
            entry.set.clear();
            entry.updated_at = Some(Utc::now());
            Self::snapshot(session, entry)
        })
    }

    pub fn set_modal_visible(&self, session: &SessionId, visible: bool) -> CompareView {
        self.mutate(session, |entry| {
            entry.set.set_modal_visible(visible);
            Self::snapshot(session, entry)
        })
    }

    pub fn is_in_compare(&self, session: &SessionId, product_id: &str) -> bool {
        self.inspect(session, |entry| entry.set.is_in_compare(product_id))
    }

    pub fn table(&self, session: &SessionId) -> CompareTable {
        self.inspect(session, |entry| CompareTable::from_items(entry.set.items()))
    }

    /// Number of sessions currently held in memory.
    pub fn resident_count(&self) -> usize {
        self.sessions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Drop sessions untouched for longer than `max_idle`; returns how many were dropped.
    ///
    /// Items are already in the store, so an evicted session restores with the same
    /// items and a closed modal.
    pub fn evict_idle(&self, max_idle: Duration) -> usize {
        self.evict_untouched_since(Utc::now() - max_idle)
    }

    pub fn evict_untouched_since(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        // A session locked by an in-flight request is busy, not idle.
        sessions.retain(|_, entry| match entry.try_lock() {
            Ok(guard) => guard.last_seen >= cutoff,
            Err(_) => true,
        });
        let evicted = before - sessions.len();
        if evicted > 0 {
            debug!(evicted, remaining = sessions.len(), "evicted idle compare sessions");
        }
        evicted
    }
}
