use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::domain::ComparableProduct;

/// Durable key-value slot holding a compare set as a JSON array.
pub trait CompareStore: Send + Sync {
    /// Items stored under `slot`; an unused slot is an empty list.
    fn load(&self, slot: &str) -> Result<Vec<ComparableProduct>, StoreError>;
    fn save(&self, slot: &str, items: &[ComparableProduct]) -> Result<(), StoreError>;
}

/// Error enumeration for compare slot persistence.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("compare store unavailable: {0}")]
    Unavailable(String),
    #[error("compare slot io failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("compare slot holds malformed data: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Process-local store keeping each slot's raw JSON text.
#[derive(Debug, Default)]
pub struct MemoryCompareStore {
    slots: Mutex<HashMap<String, String>>,
}

impl MemoryCompareStore {
    /// Overwrite a slot with arbitrary text, bypassing serialization.
    pub fn put_raw(&self, slot: &str, raw: impl Into<String>) {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slot.to_string(), raw.into());
    }

    pub fn raw(&self, slot: &str) -> Option<String> {
        self.slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(slot)
            .cloned()
    }
}

impl CompareStore for MemoryCompareStore {
    fn load(&self, slot: &str) -> Result<Vec<ComparableProduct>, StoreError> {
        match self.raw(slot) {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    fn save(&self, slot: &str, items: &[ComparableProduct]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items)?;
        self.put_raw(slot, raw);
        Ok(())
    }
}

/// One `<slot>.json` file per slot inside a directory.
#[derive(Debug, Clone)]
pub struct JsonFileCompareStore {
    root: PathBuf,
}

impl JsonFileCompareStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File for `slot`. Bytes outside `[A-Za-z0-9_-]` are written as `%XX`, so distinct
    /// slots never share a file.
    pub fn slot_path(&self, slot: &str) -> PathBuf {
        let mut file_stem = String::with_capacity(slot.len());
        for byte in slot.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
                file_stem.push(char::from(byte));
            } else {
                file_stem.push_str(&format!("%{byte:02X}"));
            }
        }
        self.root.join(format!("{file_stem}.json"))
    }
}

impl CompareStore for JsonFileCompareStore {
    fn load(&self, slot: &str) -> Result<Vec<ComparableProduct>, StoreError> {
        let raw = match fs::read_to_string(self.slot_path(slot)) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, slot: &str, items: &[ComparableProduct]) -> Result<(), StoreError> {
        fs::create_dir_all(&self.root)?;
        let path = self.slot_path(slot);
        let staging = path.with_extension("json.tmp");
        fs::write(&staging, serde_json::to_vec(items)?)?;
        fs::rename(&staging, &path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kettle() -> ComparableProduct {
        ComparableProduct {
            id: "kettle".to_string(),
            name: "Stovetop Kettle".to_string(),
            price: 89.0,
            images: vec!["/img/kettle.jpg".to_string()],
            average_score: Some(8.4),
            purchase_url: None,
        }
    }

    #[test]
    fn memory_store_round_trips_and_defaults_to_empty() {
        let store = MemoryCompareStore::default();
        assert!(store.load("compare").expect("empty slot loads").is_empty());

        store.save("compare", &[kettle()]).expect("save succeeds");
        assert_eq!(store.load("compare").expect("slot loads"), vec![kettle()]);
        assert!(store
            .raw("compare")
            .expect("raw stored")
            .contains("\"averageScore\":8.4"));
    }

    #[test]
    fn memory_store_reports_malformed_slots() {
        let store = MemoryCompareStore::default();
        store.put_raw("compare", "{not json");
        assert!(matches!(
            store.load("compare"),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn file_store_persists_per_slot_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileCompareStore::new(dir.path().join("slots"));

        assert!(store.load("compare:abc").expect("missing file").is_empty());
        store.save("compare:abc", &[kettle()]).expect("save succeeds");

        let path = store.slot_path("compare:abc");
        assert_eq!(
            path.file_name().and_then(|name| name.to_str()),
            Some("compare%3Aabc.json")
        );
        assert!(path.exists());

        let reopened = JsonFileCompareStore::new(store.root().to_path_buf());
        assert_eq!(reopened.load("compare:abc").expect("reload"), vec![kettle()]);
    }

    #[test]
    fn file_store_keeps_similar_slots_apart() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileCompareStore::new(dir.path());

        assert_ne!(store.slot_path("compare:tab:1"), store.slot_path("compare:tab_1"));
        assert_ne!(store.slot_path("compare:a.b"), store.slot_path("compare:a_b"));

        store.save("compare:tab:1", &[kettle()]).expect("save succeeds");
        assert!(store.load("compare:tab_1").expect("other slot loads").is_empty());
        assert_eq!(store.load("compare:tab:1").expect("slot loads"), vec![kettle()]);
    }

    #[test]
    fn file_store_surfaces_corrupt_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = JsonFileCompareStore::new(dir.path());
        fs::write(store.slot_path("compare"), b"[{\"id\":").expect("write corrupt file");

        assert!(matches!(
            store.load("compare"),
            Err(StoreError::Malformed(_))
        ));
    }
}
