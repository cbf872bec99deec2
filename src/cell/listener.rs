use std::fmt;
use std::sync::Arc;

/// A change listener registered on an [`ObservableCell`](super::ObservableCell).
///
/// Listeners are cheap to clone, and clones share identity: registering a
/// handle and later removing a clone of it removes the same registration.
/// Two listeners built from separate closures are never equal, even if the
/// closures have identical bodies.
pub struct Listener<T> {
    callback: Arc<dyn Fn(&T) + Send + Sync>,
}

impl<T> Listener<T> {
    /// Wrap a callback into a new listener handle.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        Self {
            callback: Arc::new(callback),
        }
    }

    /// Invoke the callback with the given value.
    pub fn call(&self, value: &T) {
        (self.callback)(value);
    }
}

impl<T> Clone for Listener<T> {
    fn clone(&self) -> Self {
        Self {
            callback: Arc::clone(&self.callback),
        }
    }
}

impl<T> PartialEq for Listener<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.callback, &other.callback)
    }
}

impl<T> Eq for Listener<T> {}

impl<T> fmt::Debug for Listener<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listener")
            .field("callback", &Arc::as_ptr(&self.callback).cast::<()>())
            .finish()
    }
}

/// Registration-ordered listener list.
///
/// Duplicates are kept; each registration is removed separately.
pub(crate) struct ListenerList<T> {
    entries: Vec<Listener<T>>,
}

impl<T> ListenerList<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, listener: Listener<T>) {
        self.entries.push(listener);
    }

    /// Remove the most recently registered entry matching `listener`.
    pub(crate) fn remove_last(&mut self, listener: &Listener<T>) -> bool {
        match self.entries.iter().rposition(|entry| entry == listener) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clone the current entries so they can be invoked without holding a lock.
    pub(crate) fn snapshot(&self) -> Vec<Listener<T>> {
        self.entries.clone()
    }
}
