//! Core value types shared by the table, builder and configuration.
//!
//! - `StateId`: non-zero byte naming a state
//! - `Slot`: one (id, callback) pairing at a fixed table position
//! - `Callback` / `ChangeHook`: the owned closures a table stores

mod slot;
mod state_id;

pub use slot::{Callback, ChangeHook, Slot};
pub use state_id::StateId;
