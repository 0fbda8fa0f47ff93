//! The state table and its error type.
//!
//! `StateTable` is the whole runtime: registration, activation, removal,
//! per-tick dispatch and change notification. Every operation has a
//! `try_*` form returning `TableError` and a plain form returning the
//! `bool` / `Option` an embedded main loop usually wants.

mod error;
mod machine;

pub use error::TableError;
pub use machine::StateTable;
