//! Build errors for the table builder.

use crate::core::StateId;
use crate::table::TableError;
use thiserror::Error;

/// Errors that can occur when building a state table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("{states} states registered but capacity is {capacity}. Raise .capacity(n)")]
    TooManyStates { capacity: usize, states: usize },

    #[error("Initial state {0} was never registered. Call .state(id, callback) first")]
    UnknownInitialState(StateId),

    #[error(transparent)]
    Table(#[from] TableError),
}
