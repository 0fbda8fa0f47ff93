//! Table slots pairing a state id with its callback.

use super::state_id::StateId;
use std::fmt;

/// Zero-argument action run once per tick while its state is active.
///
/// Callbacks are owned closures so they can capture whatever the
/// embedding application needs (pin handles, counters, shared cells).
pub type Callback = Box<dyn FnMut()>;

/// Hook notified with `(previous, next)` on every successful activation.
///
/// `previous` is `None` when no state was active before.
pub type ChangeHook = Box<dyn FnMut(Option<StateId>, StateId)>;

/// One occupied table position.
pub struct Slot {
    id: StateId,
    callback: Callback,
}

impl Slot {
    pub fn new<F>(id: StateId, callback: F) -> Self
    where
        F: FnMut() + 'static,
    {
        Self {
            id,
            callback: Box::new(callback),
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    /// Invoke the stored callback. Panics inside it propagate to the caller.
    pub fn invoke(&mut self) {
        (self.callback)()
    }
}

impl fmt::Debug for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot").field("id", &self.id).finish_non_exhaustive()
    }
}
