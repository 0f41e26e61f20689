//! Per-identity serialization of match-or-create.
//!
//! Two source products resolving to the same destination product model must
//! not both decide that a sub model is missing and create it twice. The
//! processor takes the lock of the destination model's code for the whole
//! match-or-create descent beneath it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Default)]
pub struct KeyedLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyedLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// The lock guarding `key`. The same `Arc` is returned for equal keys.
    pub fn lock_for(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(key.to_owned()).or_default().clone()
    }

    /// Forget the lock of `key` once no caller holds it. Call after dropping
    /// the `Arc` returned by [`KeyedLocks::lock_for`].
    pub fn release(&self, key: &str) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks.get(key).is_some_and(|lock| Arc::strong_count(lock) == 1) {
            locks.remove(key);
        }
    }

    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
