use crate::error::StoreResult;

/// Named key-value slots holding serialized text.
///
/// This is the durable medium underneath [`BlogStore`](crate::BlogStore),
/// the analogue of browser local storage. Implementations must satisfy:
/// - A value is read and written as one unit; there is no partial write.
/// - A read after a write to the same key observes that write.
/// - All I/O errors are propagated, never silently ignored.
pub trait SlotStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// Returns `Ok(None)` if the slot has never been written or was removed.
    fn read(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key`.
    fn write(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove the slot. Returns `true` if it existed.
    fn remove(&self, key: &str) -> StoreResult<bool>;

    /// Check whether the slot holds a value.
    fn contains(&self, key: &str) -> StoreResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

impl<T: SlotStorage + ?Sized> SlotStorage for std::sync::Arc<T> {
    fn read(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).write(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<bool> {
        (**self).remove(key)
    }
}
