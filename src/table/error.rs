//! Reasons a table operation did not apply.

use crate::core::StateId;
use thiserror::Error;

/// Errors returned by the `try_*` table operations.
///
/// None of these are fatal: every one means "the table was left unchanged".
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TableError {
    #[error("State id 0 is reserved for empty slots")]
    ZeroStateId,

    #[error("All {capacity} slots are occupied")]
    CapacityExhausted { capacity: usize },

    #[error("State {0} is already registered")]
    DuplicateState(StateId),

    #[error("State {0} is not registered")]
    UnknownState(StateId),

    #[error("Index {index} is out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },

    #[error("Slot {index} holds the active state and cannot be removed")]
    ActiveSlot { index: usize },
}
