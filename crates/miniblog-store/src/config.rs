use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Slot key used when none is configured.
pub const DEFAULT_SLOT_KEY: &str = "mini_blog_posts";

/// What to do when the slot holds data that does not parse.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CorruptDataPolicy {
    /// Return [`StoreError::Corrupt`] and leave the slot untouched.
    #[default]
    Fail,
    /// Log a warning, overwrite the slot with the seed posts, and continue.
    /// Whatever was in the slot is lost.
    Reseed,
}

/// Configuration for a [`BlogStore`](crate::BlogStore).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Name of the slot holding the serialized collection.
    pub slot_key: String,
    /// Handling of unparseable slot contents.
    pub on_corrupt: CorruptDataPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            on_corrupt: CorruptDataPolicy::default(),
        }
    }
}

impl StoreConfig {
    /// Check the configuration is usable.
    pub fn validate(&self) -> StoreResult<()> {
        if self.slot_key.trim().is_empty() {
            return Err(StoreError::Config("slot_key must not be empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = StoreConfig::default();
        assert_eq!(c.slot_key, "mini_blog_posts");
        assert_eq!(c.on_corrupt, CorruptDataPolicy::Fail);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn blank_slot_key_is_rejected() {
        let c = StoreConfig {
            slot_key: "  ".into(),
            ..StoreConfig::default()
        };
        assert!(matches!(c.validate(), Err(StoreError::Config(_))));
    }

    #[test]
    fn parses_from_toml_with_defaults() {
        let c: StoreConfig = toml::from_str(r#"on_corrupt = "reseed""#).unwrap();
        assert_eq!(c.on_corrupt, CorruptDataPolicy::Reseed);
        assert_eq!(c.slot_key, DEFAULT_SLOT_KEY);
    }

    #[test]
    fn rejects_unknown_policy() {
        let parsed: Result<StoreConfig, _> = toml::from_str(r#"on_corrupt = "ignore""#);
        assert!(parsed.is_err());
    }
}
