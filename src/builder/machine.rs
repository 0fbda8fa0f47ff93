//! Builder for constructing state tables.

use crate::builder::error::BuildError;
use crate::config::{DuplicatePolicy, TableConfig};
use crate::core::{Callback, ChangeHook, StateId};
use crate::table::StateTable;

/// Builder for constructing state tables with a fluent API.
///
/// # Example
///
/// ```rust
/// use statetable::builder::StateTableBuilder;
/// use statetable::core::StateId;
///
/// let on = StateId::new(0x01).unwrap();
/// let off = StateId::new(0x02).unwrap();
///
/// let table = StateTableBuilder::new()
///     .state(on, || {})
///     .state(off, || {})
///     .initial(on)
///     .build()
///     .unwrap();
///
/// assert_eq!(table.capacity(), 2);
/// assert_eq!(table.get_current(), Some(on));
/// ```
#[derive(Default)]
pub struct StateTableBuilder {
    capacity: Option<usize>,
    duplicates: DuplicatePolicy,
    states: Vec<(StateId, Callback)>,
    initial: Option<StateId>,
    on_change: Option<ChangeHook>,
}

impl StateTableBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a loaded configuration.
    pub fn from_config(config: &TableConfig) -> Self {
        Self::new()
            .capacity(config.capacity)
            .duplicates(config.duplicates)
    }

    /// Fix the slot count. Defaults to the number of registered states.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    pub fn duplicates(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    /// Register a state. Slots are filled in call order.
    pub fn state<F>(mut self, id: impl Into<StateId>, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        self.states.push((id.into(), Box::new(callback)));
        self
    }

    /// State to activate once all states are registered.
    pub fn initial(mut self, id: impl Into<StateId>) -> Self {
        self.initial = Some(id.into());
        self
    }

    /// Change hook, installed before the initial state is activated.
    pub fn on_change<F>(mut self, hook: F) -> Self
    where
        F: FnMut(Option<StateId>, StateId) + 'static,
    {
        self.on_change = Some(Box::new(hook));
        self
    }

    /// Build the table.
    /// Returns an error if the states do not fit or cannot be activated.
    pub fn build(self) -> Result<StateTable, BuildError> {
        let states = self.states.len();
        let capacity = self.capacity.unwrap_or(states);
        if states > capacity {
            return Err(BuildError::TooManyStates { capacity, states });
        }

        if let Some(initial) = self.initial {
            if !self.states.iter().any(|(id, _)| *id == initial) {
                return Err(BuildError::UnknownInitialState(initial));
            }
        }

        let config = TableConfig::new(capacity).with_duplicates(self.duplicates);
        let mut table = StateTable::with_config(&config);
        for (id, callback) in self.states {
            table.try_add(id, callback)?;
        }

        if let Some(hook) = self.on_change {
            table.on_change(hook);
        }

        if let Some(initial) = self.initial {
            table.try_set(initial)?;
        }

        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn id(raw: u8) -> StateId {
        StateId::new(raw).unwrap()
    }

    #[test]
    fn capacity_defaults_to_state_count() {
        let table = StateTableBuilder::new()
            .state(id(1), || {})
            .state(id(2), || {})
            .build()
            .unwrap();

        assert_eq!(table.capacity(), 2);
        assert!(table.is_full());
        assert_eq!(table.get_current(), None);
    }

    #[test]
    fn explicit_capacity_leaves_room() {
        let mut table = StateTableBuilder::new()
            .capacity(4)
            .state(id(1), || {})
            .build()
            .unwrap();

        assert_eq!(table.capacity(), 4);
        assert!(table.add(id(2), || {}));
    }

    #[test]
    fn empty_builder_yields_zero_capacity_table() {
        let table = StateTableBuilder::new().build().unwrap();
        assert_eq!(table.capacity(), 0);
    }

    #[test]
    fn builder_rejects_overflow() {
        let result = StateTableBuilder::new()
            .capacity(1)
            .state(id(1), || {})
            .state(id(2), || {})
            .build();

        assert!(matches!(
            result,
            Err(BuildError::TooManyStates {
                capacity: 1,
                states: 2
            })
        ));
    }

    #[test]
    fn builder_rejects_unknown_initial() {
        let result = StateTableBuilder::new()
            .state(id(1), || {})
            .initial(id(7))
            .build();

        assert!(matches!(result, Err(BuildError::UnknownInitialState(s)) if s == id(7)));
    }

    #[test]
    fn builder_surfaces_duplicate_states() {
        let result = StateTableBuilder::new()
            .state(id(1), || {})
            .state(id(1), || {})
            .build();

        assert!(matches!(
            result,
            Err(BuildError::Table(TableError::DuplicateState(s))) if s == id(1)
        ));
    }

    #[test]
    fn first_match_builder_accepts_duplicates() {
        let table = StateTableBuilder::new()
            .duplicates(DuplicatePolicy::FirstMatch)
            .state(id(1), || {})
            .state(id(1), || {})
            .build()
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.index_of(id(1)), Some(0));
    }

    #[test]
    fn hook_observes_initial_activation() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);

        let table = StateTableBuilder::new()
            .state(id(1), || {})
            .on_change(move |prev, next| log.borrow_mut().push((prev, next)))
            .initial(id(1))
            .build()
            .unwrap();

        assert!(table.has_on_change());
        assert_eq!(*seen.borrow(), vec![(None, id(1))]);
    }

    #[test]
    fn from_config_carries_shape() {
        let config = TableConfig::new(3).with_duplicates(DuplicatePolicy::FirstMatch);
        let table = StateTableBuilder::from_config(&config).build().unwrap();

        assert_eq!(table.capacity(), 3);
        assert_eq!(table.duplicate_policy(), DuplicatePolicy::FirstMatch);
    }
}
