//! Example posts written into an empty slot.

use miniblog_types::Blog;

use crate::error::{StoreError, StoreResult};

/// Source text of the seed collection. The slot receives the parsed records
/// re-serialized in compact form, not these bytes.
pub const SEED_JSON: &str = include_str!("seed.json");

/// Number of posts in the seed collection.
pub const SEED_LEN: usize = 3;

/// The fixed example posts, ids 1 to 3, each without comments.
pub fn seed_blogs() -> StoreResult<Vec<Blog>> {
    serde_json::from_str(SEED_JSON)
        .map_err(|e| StoreError::Serialization(format!("seed data: {e}")))
}
