pub mod confirm;
pub mod dashboard;
pub mod form;
pub mod list;
pub mod scope;
pub mod view;

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Lock controller state, recovering from poisoning. State is plain data
/// replaced in whole fields.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Result of reloading a controller's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Fresh data replaced the previous data.
    Loaded,
    /// The request failed; previous data stays visible with this message.
    Failed(String),
    /// A newer refresh started while this one was in flight; its result was
    /// dropped.
    Superseded,
    /// The view was closed; state was left untouched.
    Cancelled,
}

impl RefreshOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, RefreshOutcome::Loaded)
    }
}
