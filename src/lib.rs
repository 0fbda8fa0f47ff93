//! Statetable: a fixed-capacity state dispatcher for small targets
//!
//! A `StateTable` maps non-zero byte ids to zero-argument callbacks, tracks
//! which state is active, and runs that state's callback once per call to
//! `run()`. The embedding application owns the table and drives it from its
//! main loop; callbacks decide their own timing.
//!
//! # Core Concepts
//!
//! - **StateId**: Non-zero byte naming a state (0 marks an empty slot)
//! - **StateTable**: Fixed slots, one active state, optional change hook
//! - **Builder**: Declarative construction via `StateTableBuilder` and `state_ids!`
//! - **Config**: Capacity and duplicate policy, loadable from JSON
//!
//! # Example
//!
//! ```rust
//! use statetable::{state_ids, StateTable};
//! use std::cell::Cell;
//! use std::rc::Rc;
//!
//! state_ids! {
//!     enum Led {
//!         On = 0x01,
//!         Off = 0x02,
//!     }
//! }
//!
//! let lit = Rc::new(Cell::new(false));
//! let mut table = StateTable::new(2);
//!
//! let pin = Rc::clone(&lit);
//! table.add(Led::On, move || pin.set(true));
//! let pin = Rc::clone(&lit);
//! table.add(Led::Off, move || pin.set(false));
//!
//! table.set(Led::On);
//! table.run();
//! assert!(lit.get());
//!
//! table.set(Led::Off);
//! table.run();
//! assert!(!lit.get());
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod table;

// Re-export commonly used types
pub use builder::{BuildError, StateTableBuilder};
pub use config::{DuplicatePolicy, TableConfig};
pub use crate::core::StateId;
pub use table::{StateTable, TableError};
