//! Fixed-capacity table dispatching the active state's callback.

use crate::config::{DuplicatePolicy, TableConfig};
use crate::core::{ChangeHook, Slot, StateId};
use crate::table::error::TableError;
use std::fmt;
use tracing::{debug, trace};

/// Table of (state id, callback) slots with one active state.
///
/// Slots are allocated once at construction and never grow. Lookups are
/// linear scans in slot order, so the lowest index always wins.
///
/// # Example
///
/// ```rust
/// use statetable::core::StateId;
/// use statetable::StateTable;
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let setup = StateId::new(0x01).unwrap();
/// let ticks = Rc::new(Cell::new(0));
///
/// let mut table = StateTable::new(2);
/// let counter = Rc::clone(&ticks);
/// assert!(table.add(setup, move || counter.set(counter.get() + 1)));
///
/// table.run(); // nothing active yet
/// assert_eq!(table.set(setup), Some(0));
/// table.run();
/// table.run();
///
/// assert_eq!(ticks.get(), 2);
/// assert_eq!(table.get_current(), Some(setup));
/// ```
pub struct StateTable {
    slots: Box<[Option<Slot>]>,
    current: Option<usize>,
    on_change: Option<ChangeHook>,
    duplicates: DuplicatePolicy,
}

impl StateTable {
    /// Create a table with `capacity` empty slots and the default policy.
    ///
    /// A capacity of 0 is allowed; every `add` on such a table fails.
    pub fn new(capacity: usize) -> Self {
        Self::with_config(&TableConfig::new(capacity))
    }

    /// Create a table from a configuration.
    pub fn with_config(config: &TableConfig) -> Self {
        debug!(
            capacity = config.capacity,
            duplicates = ?config.duplicates,
            "state table created"
        );

        Self {
            slots: std::iter::repeat_with(|| None)
                .take(config.capacity)
                .collect(),
            current: None,
            on_change: None,
            duplicates: config.duplicates,
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Lowest index holding `id`, if any.
    pub fn index_of(&self, id: impl Into<StateId>) -> Option<usize> {
        let id = id.into();
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|slot| slot.id() == id))
    }

    pub fn contains(&self, id: impl Into<StateId>) -> bool {
        self.index_of(id).is_some()
    }

    /// Registered ids in slot order, skipping empty slots.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.slots.iter().flatten().map(Slot::id)
    }

    fn free_index(&self) -> Option<usize> {
        self.slots.iter().position(Option::is_none)
    }

    /// Register `callback` under `id` in the lowest empty slot.
    ///
    /// Returns the slot index. Fails without touching the table when every
    /// slot is occupied, or when `id` is already present and the table
    /// rejects duplicates.
    pub fn try_add<F>(&mut self, id: impl Into<StateId>, callback: F) -> Result<usize, TableError>
    where
        F: FnMut() + 'static,
    {
        let id = id.into();

        if self.duplicates == DuplicatePolicy::Reject && self.contains(id) {
            debug!(state = %id, "add rejected: duplicate state");
            return Err(TableError::DuplicateState(id));
        }

        let Some(index) = self.free_index() else {
            debug!(state = %id, capacity = self.capacity(), "add rejected: table full");
            return Err(TableError::CapacityExhausted {
                capacity: self.capacity(),
            });
        };

        self.slots[index] = Some(Slot::new(id, callback));
        debug!(state = %id, index, "state added");
        Ok(index)
    }

    /// Register a state, reporting only whether it was stored.
    pub fn add<F>(&mut self, id: impl Into<StateId>, callback: F) -> bool
    where
        F: FnMut() + 'static,
    {
        self.try_add(id, callback).is_ok()
    }

    /// Make the lowest slot holding `id` the active one.
    ///
    /// The change hook, if any, is called with the previously active id
    /// before this returns. Selecting a state does not run its callback.
    pub fn try_set(&mut self, id: impl Into<StateId>) -> Result<usize, TableError> {
        let id = id.into();

        let Some(index) = self.index_of(id) else {
            debug!(state = %id, "set ignored: unknown state");
            return Err(TableError::UnknownState(id));
        };

        let previous = self.get_current();
        self.current = Some(index);
        debug!(
            from = ?previous,
            to = %id,
            index,
            "active state changed"
        );

        if let Some(hook) = self.on_change.as_mut() {
            hook(previous, id);
        }

        Ok(index)
    }

    /// Activate a state, returning its slot index or `None` if unknown.
    pub fn set(&mut self, id: impl Into<StateId>) -> Option<usize> {
        self.try_set(id).ok()
    }

    /// Id of the active state, or `None` when nothing is active.
    pub fn get_current(&self) -> Option<StateId> {
        self.current
            .and_then(|index| self.slots.get(index))
            .and_then(Option::as_ref)
            .map(Slot::id)
    }

    /// Slot index of the active state.
    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// Invoke the active state's callback once.
    ///
    /// Does nothing when no state is active. Panics raised by the callback
    /// are not caught.
    pub fn run(&mut self) {
        let active = self
            .current
            .and_then(|index| self.slots.get_mut(index))
            .and_then(Option::as_mut);

        match active {
            Some(slot) => {
                trace!(state = %slot.id(), "tick");
                slot.invoke();
            }
            None => trace!("tick with no active state"),
        }
    }

    /// Empty the slot at `index`.
    ///
    /// Returns the id that was stored there, or `None` if the slot was
    /// already empty. The active slot cannot be removed.
    pub fn try_remove_by_index(&mut self, index: usize) -> Result<Option<StateId>, TableError> {
        let capacity = self.capacity();
        if index >= capacity {
            debug!(index, capacity, "remove rejected: index out of range");
            return Err(TableError::IndexOutOfRange { index, capacity });
        }

        if self.current == Some(index) {
            debug!(index, "remove rejected: slot is active");
            return Err(TableError::ActiveSlot { index });
        }

        let removed = self
            .slots
            .get_mut(index)
            .and_then(Option::take)
            .map(|slot| slot.id());
        debug!(index, state = ?removed, "slot cleared");
        Ok(removed)
    }

    /// Empty the slot at `index`, reporting only whether it applied.
    pub fn remove_by_index(&mut self, index: usize) -> bool {
        self.try_remove_by_index(index).is_ok()
    }

    /// Empty the lowest slot holding `id` and return its index.
    ///
    /// Slower than `try_remove_by_index` since the slot is found by scanning.
    pub fn try_remove_by_name(&mut self, id: impl Into<StateId>) -> Result<usize, TableError> {
        let id = id.into();
        let index = self.index_of(id).ok_or(TableError::UnknownState(id))?;
        self.try_remove_by_index(index)?;
        Ok(index)
    }

    /// Remove a state by id, reporting only whether it applied.
    pub fn remove_by_name(&mut self, id: impl Into<StateId>) -> bool {
        self.try_remove_by_name(id).is_ok()
    }

    /// Empty every slot and deactivate the current state.
    ///
    /// The change hook stays registered.
    pub fn reset(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.current = None;
        debug!(capacity = self.capacity(), "state table reset");
    }

    /// Register the change hook, replacing any previous one.
    pub fn on_change<F>(&mut self, hook: F)
    where
        F: FnMut(Option<StateId>, StateId) + 'static,
    {
        self.on_change = Some(Box::new(hook));
    }

    pub fn clear_on_change(&mut self) {
        self.on_change = None;
    }

    pub fn has_on_change(&self) -> bool {
        self.on_change.is_some()
    }
}

impl fmt::Debug for StateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateTable")
            .field("slots", &self.slots)
            .field("current", &self.current)
            .field("on_change", &self.on_change.is_some())
            .field("duplicates", &self.duplicates)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn id(raw: u8) -> StateId {
        StateId::new(raw).unwrap()
    }

    fn counter() -> (Rc<Cell<usize>>, impl FnMut() + 'static) {
        let hits = Rc::new(Cell::new(0));
        let handle = Rc::clone(&hits);
        (hits, move || handle.set(handle.get() + 1))
    }

    #[test]
    fn new_table_is_empty_and_inactive() {
        let mut table = StateTable::new(3);

        assert_eq!(table.capacity(), 3);
        assert_eq!(table.len(), 0);
        assert!(table.is_empty());
        assert!(!table.is_full());
        assert_eq!(table.get_current(), None);
        assert_eq!(table.current_index(), None);

        table.run();
    }

    #[test]
    fn add_fills_lowest_free_slot() {
        let mut table = StateTable::new(3);

        assert_eq!(table.try_add(id(1), || {}), Ok(0));
        assert_eq!(table.try_add(id(2), || {}), Ok(1));
        assert!(table.remove_by_index(0));
        assert_eq!(table.try_add(id(3), || {}), Ok(0));

        assert_eq!(table.state_ids().collect::<Vec<_>>(), vec![id(3), id(2)]);
    }

    #[test]
    fn add_fails_when_full() {
        let mut table = StateTable::new(1);

        assert!(table.add(id(1), || {}));
        assert_eq!(
            table.try_add(id(2), || {}),
            Err(TableError::CapacityExhausted { capacity: 1 })
        );
        assert!(table.is_full());
        assert_eq!(table.index_of(id(1)), Some(0));
        assert!(!table.contains(id(2)));
    }

    #[test]
    fn zero_capacity_never_accepts_states() {
        let mut table = StateTable::new(0);

        assert!(!table.add(id(1), || {}));
        assert!(table.is_empty());
        assert!(table.is_full());
        assert_eq!(table.set(id(1)), None);
        table.run();
    }

    #[test]
    fn duplicate_rejected_by_default() {
        let mut table = StateTable::new(2);

        assert!(table.add(id(4), || {}));
        assert_eq!(
            table.try_add(id(4), || {}),
            Err(TableError::DuplicateState(id(4)))
        );
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn first_match_policy_keeps_duplicates_and_resolves_lowest() {
        let config = TableConfig::new(2).with_duplicates(DuplicatePolicy::FirstMatch);
        let mut table = StateTable::with_config(&config);
        let (first, first_cb) = counter();
        let (second, second_cb) = counter();

        assert_eq!(table.try_add(id(4), first_cb), Ok(0));
        assert_eq!(table.try_add(id(4), second_cb), Ok(1));
        assert_eq!(table.set(id(4)), Some(0));

        table.run();
        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 0);
    }

    #[test]
    fn set_selects_without_running() {
        let mut table = StateTable::new(1);
        let (hits, cb) = counter();
        table.add(id(1), cb);

        assert_eq!(table.set(id(1)), Some(0));
        assert_eq!(hits.get(), 0);

        table.run();
        table.run();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn set_unknown_keeps_current() {
        let mut table = StateTable::new(2);
        table.add(id(1), || {});
        table.set(id(1));

        assert_eq!(table.try_set(id(9)), Err(TableError::UnknownState(id(9))));
        assert_eq!(table.get_current(), Some(id(1)));
    }

    #[test]
    fn set_swaps_the_running_callback() {
        let mut table = StateTable::new(2);
        let (f_hits, f) = counter();
        let (g_hits, g) = counter();
        table.add(id(1), f);
        table.add(id(2), g);

        table.set(id(1));
        table.run();
        table.set(id(2));
        table.run();
        table.run();

        assert_eq!(f_hits.get(), 1);
        assert_eq!(g_hits.get(), 2);
    }

    #[test]
    fn active_slot_cannot_be_removed() {
        let mut table = StateTable::new(2);
        table.add(id(1), || {});
        table.set(id(1));

        assert_eq!(
            table.try_remove_by_index(0),
            Err(TableError::ActiveSlot { index: 0 })
        );
        assert!(!table.remove_by_name(id(1)));
        assert_eq!(table.get_current(), Some(id(1)));
    }

    #[test]
    fn remove_out_of_range_fails() {
        let mut table = StateTable::new(2);

        assert_eq!(
            table.try_remove_by_index(2),
            Err(TableError::IndexOutOfRange {
                index: 2,
                capacity: 2
            })
        );
    }

    #[test]
    fn remove_empty_slot_succeeds_with_nothing_removed() {
        let mut table = StateTable::new(2);

        assert_eq!(table.try_remove_by_index(1), Ok(None));
        assert!(table.remove_by_index(1));
    }

    #[test]
    fn remove_by_name_reports_index() {
        let mut table = StateTable::new(3);
        table.add(id(1), || {});
        table.add(id(2), || {});

        assert_eq!(table.try_remove_by_name(id(2)), Ok(1));
        assert_eq!(
            table.try_remove_by_name(id(2)),
            Err(TableError::UnknownState(id(2)))
        );
        assert_eq!(table.set(id(2)), None);
    }

    #[test]
    fn reset_clears_slots_and_current_but_keeps_hook() {
        let mut table = StateTable::new(2);
        let (hits, cb) = counter();
        table.add(id(1), cb);
        table.on_change(|_, _| {});
        table.set(id(1));

        table.reset();

        assert!(table.is_empty());
        assert_eq!(table.get_current(), None);
        assert_eq!(table.set(id(1)), None);
        table.run();
        assert_eq!(hits.get(), 0);
        assert!(table.has_on_change());
    }

    #[test]
    fn hook_sees_previous_then_next() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let log = Rc::clone(&seen);
        let mut table = StateTable::new(2);
        table.add(id(1), || {});
        table.add(id(2), || {});
        table.on_change(move |prev, next| log.borrow_mut().push((prev, next)));

        table.set(id(1));
        table.set(id(2));
        table.set(id(2));
        table.set(id(3));

        assert_eq!(
            *seen.borrow(),
            vec![
                (None, id(1)),
                (Some(id(1)), id(2)),
                (Some(id(2)), id(2)),
            ]
        );
    }

    #[test]
    fn new_hook_replaces_old() {
        let (old_hits, _) = counter();
        let (new_hits, _) = counter();
        let old = Rc::clone(&old_hits);
        let new = Rc::clone(&new_hits);
        let mut table = StateTable::new(1);
        table.add(id(1), || {});

        table.on_change(move |_, _| old.set(old.get() + 1));
        table.on_change(move |_, _| new.set(new.get() + 1));
        table.set(id(1));

        assert_eq!(old_hits.get(), 0);
        assert_eq!(new_hits.get(), 1);

        table.clear_on_change();
        table.set(id(1));
        assert_eq!(new_hits.get(), 1);
        assert!(!table.has_on_change());
    }

    #[test]
    #[should_panic(expected = "callback failure")]
    fn callback_panics_propagate() {
        let mut table = StateTable::new(1);
        table.add(id(1), || panic!("callback failure"));
        table.set(id(1));
        table.run();
    }

    #[test]
    fn debug_lists_slots() {
        let mut table = StateTable::new(2);
        table.add(id(1), || {});

        let rendered = format!("{:?}", table);
        assert!(rendered.contains("StateId(0x01)"));
        assert!(rendered.contains("None"));
    }
}
