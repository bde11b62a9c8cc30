//! Persistence layer for the mini blog.
//!
//! A [`BlogStore`] owns the whole collection of posts and their comments,
//! serialized as one JSON array in a single named slot of a
//! [`SlotStorage`]. Every operation re-reads the slot, applies its change,
//! and writes the full collection back.
//!
//! # Storage Backends
//!
//! - [`InMemorySlotStorage`] -- `HashMap`-based slots for tests and embedding
//! - [`FileSlotStorage`] -- one JSON file per slot, replaced atomically
//!
//! # Rules
//!
//! 1. An unset or blank slot is seeded with three example posts on first read.
//! 2. New blog and comment ids are one more than the current maximum.
//! 3. Deleting a blog deletes its comments with it.
//! 4. Lookups that find nothing return `None`; only storage and data
//!    problems are errors.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod query;
pub mod seed;
pub mod store;
pub mod traits;

pub use config::{CorruptDataPolicy, StoreConfig, DEFAULT_SLOT_KEY};
pub use error::{StoreError, StoreResult};
pub use file::FileSlotStorage;
pub use memory::InMemorySlotStorage;
pub use query::{
    filter_by_category, group_by_category, search, snippet, BlogQuery, SearchScope, ALL_CATEGORIES,
    SNIPPET_LEN, UNCATEGORIZED,
};
pub use seed::{seed_blogs, SEED_JSON, SEED_LEN};
pub use store::{BlogStore, Deletion};
pub use traits::SlotStorage;
