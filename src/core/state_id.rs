//! Identifiers for registered states.
//!
//! A state is named by a caller-chosen byte. Zero is reserved for empty
//! slots, so `StateId` can only hold non-zero values.

use crate::table::TableError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU8;

/// Non-zero 8-bit identifier naming one state.
///
/// # Example
///
/// ```rust
/// use statetable::core::StateId;
///
/// let setup = StateId::new(0x01).unwrap();
/// assert_eq!(setup.get(), 0x01);
/// assert!(StateId::new(0).is_none());
/// assert_eq!(setup.to_string(), "0x01");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StateId(NonZeroU8);

impl StateId {
    /// Wrap a raw byte, returning `None` for the reserved value 0.
    pub const fn new(raw: u8) -> Option<Self> {
        match NonZeroU8::new(raw) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Raw byte value.
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    #[doc(hidden)]
    pub const fn from_discriminant(raw: u8) -> Self {
        match Self::new(raw) {
            Some(id) => id,
            None => panic!("state id 0 is reserved for empty slots"),
        }
    }
}

impl From<NonZeroU8> for StateId {
    fn from(value: NonZeroU8) -> Self {
        Self(value)
    }
}

impl TryFrom<u8> for StateId {
    type Error = TableError;

    fn try_from(raw: u8) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or(TableError::ZeroStateId)
    }
}

impl From<StateId> for u8 {
    fn from(id: StateId) -> Self {
        id.get()
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.get())
    }
}

impl fmt::Debug for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "StateId({:#04x})", self.get())
    }
}
