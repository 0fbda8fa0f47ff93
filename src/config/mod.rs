//! Table configuration.
//!
//! A table's shape is fixed at construction: how many slots it has and how
//! `add` treats an id that is already registered. `TableConfig` carries both
//! and can be loaded from JSON so firmware images can share one definition.

use serde::{Deserialize, Serialize};

pub mod error;

pub use error::ConfigError;

/// How `add` treats an id that already occupies a slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Refuse the second registration; the table is left unchanged.
    #[default]
    Reject,

    /// Store the duplicate. Lookups always resolve to the lowest index.
    FirstMatch,
}

/// Construction parameters for a `StateTable`.
///
/// # Example
///
/// ```rust
/// use statetable::config::{DuplicatePolicy, TableConfig};
///
/// let config = TableConfig::from_json(r#"{ "capacity": 4 }"#).unwrap();
/// assert_eq!(config.capacity, 4);
/// assert_eq!(config.duplicates, DuplicatePolicy::Reject);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    /// Number of slots, fixed for the table's lifetime
    pub capacity: usize,

    /// Policy for repeated ids
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

impl TableConfig {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicates(mut self, duplicates: DuplicatePolicy) -> Self {
        self.duplicates = duplicates;
        self
    }

    /// Parse a configuration from a JSON document.
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(input)?)
    }
}
