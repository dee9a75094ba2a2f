//! `RelinkableHandle<T>` — a shared reference whose target can be swapped.
//!
//! Readers take an `Arc<T>` snapshot and work against it without holding any
//! lock, so a relink never disturbs a query that is already running.  Writers
//! build a complete new value first and then swap the pointer; the old value
//! is dropped once the last snapshot goes away.

use std::sync::{Arc, RwLock};

/// A reference-counted value that can be relinked at runtime.
///
/// Cloning the handle shares the link: relinking through one clone is seen by
/// every other clone.
pub struct RelinkableHandle<T> {
    inner: Arc<RwLock<Arc<T>>>,
}

impl<T> RelinkableHandle<T> {
    /// Create a handle linked to `value`.
    pub fn new(value: T) -> Self {
        Self::from_arc(Arc::new(value))
    }

    /// Create a handle linked to an existing `Arc`.
    pub fn from_arc(arc: Arc<T>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(arc)),
        }
    }

    /// Replace the linked value with `value`.
    pub fn link_to(&self, value: T) {
        self.link_to_arc(Arc::new(value));
    }

    /// Replace the linked value with an existing `Arc`.
    pub fn link_to_arc(&self, arc: Arc<T>) {
        // A poisoned lock still holds a complete Arc; the swap is the only write.
        let mut guard = self.inner.write().unwrap_or_else(|p| p.into_inner());
        *guard = arc;
    }

    /// Take a snapshot of the currently linked value.
    pub fn current(&self) -> Arc<T> {
        let guard = self.inner.read().unwrap_or_else(|p| p.into_inner());
        Arc::clone(&guard)
    }

    /// Run `f` against the currently linked value.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.current())
    }
}

impl<T> Clone for RelinkableHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Default> Default for RelinkableHandle<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for RelinkableHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RelinkableHandle({:?})", self.current())
    }
}
