//! Builder API for ergonomic table construction.
//!
//! This module provides a fluent builder and the `state_ids!` macro for
//! declaring a table's states with minimal boilerplate.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::BuildError;
pub use machine::StateTableBuilder;
