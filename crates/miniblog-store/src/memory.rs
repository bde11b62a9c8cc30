//! In-memory slot storage for tests and embedding.

use std::collections::HashMap;
use std::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::traits::SlotStorage;

/// `HashMap`-based slot storage.
///
/// All slots live behind a `RwLock`. Data is lost when the storage is
/// dropped.
pub struct InMemorySlotStorage {
    slots: RwLock<HashMap<String, String>>,
}

impl InMemorySlotStorage {
    /// Create storage with no slots set.
    pub fn new() -> Self {
        Self {
            slots: RwLock::new(HashMap::new()),
        }
    }

    /// Create storage with one slot already holding `value`.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self {
            slots: RwLock::new(slots),
        }
    }

    /// Number of slots currently set.
    pub fn len(&self) -> usize {
        self.slots.read().map(|s| s.len()).unwrap_or(0)
    }

    /// Returns `true` if no slot is set.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemorySlotStorage {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::LockPoisoned(e.to_string())
}

impl SlotStorage for InMemorySlotStorage {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        let slots = self.slots.read().map_err(poisoned)?;
        Ok(slots.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        let mut slots = self.slots.write().map_err(poisoned)?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        let mut slots = self.slots.write().map_err(poisoned)?;
        Ok(slots.remove(key).is_some())
    }
}

impl std::fmt::Debug for InMemorySlotStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemorySlotStorage")
            .field("slot_count", &self.len())
            .finish()
    }
}
