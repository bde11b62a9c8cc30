/// Errors from blog store operations.
///
/// Lookups that find nothing are not errors; they return `None`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The slot holds data that is not a JSON array of blogs.
    #[error("corrupt data in slot {key}: {reason}")]
    Corrupt { key: String, reason: String },

    /// Serialization of the collection failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The slot key cannot be used by this backend.
    #[error("invalid slot key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// No further id can be assigned after the highest stored one.
    #[error("cannot assign id: {0}")]
    Ids(#[from] miniblog_types::TypeError),

    /// A thread panicked while holding a store lock.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),

    /// The store configuration is unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
