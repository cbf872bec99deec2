use super::listener::{Listener, ListenerList};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, trace};

type Comparator<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;
type Reset<T> = Arc<dyn Fn() -> T + Send + Sync>;

struct CellState<T> {
    value: T,
    listeners: ListenerList<T>,
    equals: Comparator<T>,
    reset: Reset<T>,
    disposed: bool,
}

// `PartialEq` with every value equal to itself, so a repeated NaN write is
// still a no-op.
fn reflexive_eq<T: PartialEq>(a: &T, b: &T) -> bool {
    a == b || (is_unordered(a) && is_unordered(b))
}

#[allow(clippy::eq_op)]
fn is_unordered<T: PartialEq>(value: &T) -> bool {
    value != value
}

/// A value that notifies its listeners whenever it changes.
///
/// Writes that compare equal to the current value are dropped without
/// side effects. `ObservableCell` is a handle: clones share the same value
/// and listener list, which is how a listener can write back into the cell
/// it is registered on.
pub struct ObservableCell<T> {
    state: Arc<RwLock<CellState<T>>>,
}

impl<T: Clone + PartialEq + Default + 'static> ObservableCell<T> {
    /// Create a new cell holding `initial`.
    ///
    /// Changes are detected with `PartialEq`, treating a value that is not
    /// equal to itself (such as NaN) as unchanged when written again, and [`dispose`](Self::dispose)
    /// resets the value to `T::default()`.
    pub fn new(initial: T) -> Self {
        Self::with_reset(initial, T::default)
    }

    /// Create a new cell with `listener` registered ahead of any other.
    pub fn with_listener<F>(initial: T, listener: F) -> Self
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let cell = Self::new(initial);
        cell.subscribe(listener);
        cell
    }
}

impl<T: Clone + PartialEq + 'static> ObservableCell<T> {
    /// Create a new cell whose [`dispose`](Self::dispose) resets the value
    /// to whatever `reset` returns.
    ///
    /// Use this for types without a meaningful `Default`.
    pub fn with_reset<R>(initial: T, reset: R) -> Self
    where
        R: Fn() -> T + Send + Sync + 'static,
    {
        Self {
            state: Arc::new(RwLock::new(CellState {
                value: initial,
                listeners: ListenerList::new(),
                equals: Arc::new(reflexive_eq::<T>),
                reset: Arc::new(reset),
                disposed: false,
            })),
        }
    }
}

impl<T: Clone + 'static> ObservableCell<T> {
    /// Replace the equality check used to suppress no-op writes.
    ///
    /// The comparison runs while the cell is locked and must not touch the
    /// cell itself.
    pub fn compare_with<F>(self, equals: F) -> Self
    where
        F: Fn(&T, &T) -> bool + Send + Sync + 'static,
    {
        self.write().equals = Arc::new(equals);
        self
    }

    /// Replace the value restored by [`dispose`](Self::dispose).
    pub fn reset_to<R>(self, reset: R) -> Self
    where
        R: Fn() -> T + Send + Sync + 'static,
    {
        self.write().reset = Arc::new(reset);
        self
    }

    /// Get a clone of the current value. Never notifies.
    pub fn get(&self) -> T {
        self.read().value.clone()
    }

    /// Read the value with a function without cloning.
    ///
    /// `f` runs under the cell's read lock and must not write to the cell.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.with_value(f)
    }

    /// Set a new value.
    ///
    /// If `new_value` equals the current value nothing happens. Otherwise the
    /// value is replaced and every listener is called with it, in
    /// registration order, before this returns. Writes to a disposed cell are
    /// ignored.
    pub fn set(&self, new_value: T) {
        self.replace(new_value);
    }

    /// Set a new value, returning the previous one if the value changed.
    pub fn replace(&self, new_value: T) -> Option<T> {
        let (previous, pending) = {
            let mut state = self.write();
            if state.disposed {
                debug!(
                    cell = std::any::type_name::<T>(),
                    "ignoring write to disposed cell"
                );
                return None;
            }
            if (state.equals)(&state.value, &new_value) {
                trace!(cell = std::any::type_name::<T>(), "value unchanged");
                return None;
            }
            let previous = std::mem::replace(&mut state.value, new_value);
            (previous, Self::pending(&state))
        };
        self.deliver(pending);
        Some(previous)
    }

    /// Update the value using a function.
    ///
    /// `f` works on a copy of the current value; listeners run only if the
    /// result differs from what the cell held before.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut next = self.get();
        f(&mut next);
        self.set(next);
    }

    /// Call every listener with the current value, changed or not.
    ///
    /// For values mutated through shared interior state the cell cannot see.
    pub fn notify(&self) {
        let pending = Self::pending(&self.read());
        self.deliver(pending);
    }

    /// Register a listener at the end of the invocation order.
    ///
    /// The same handle may be registered more than once; it then runs once
    /// per registration. Registration on a disposed cell is ignored.
    pub fn add_listener(&self, listener: Listener<T>) {
        let mut state = self.write();
        if state.disposed {
            debug!(
                cell = std::any::type_name::<T>(),
                "ignoring listener added to disposed cell"
            );
            return;
        }
        state.listeners.push(listener);
    }

    /// Register a closure and return its handle for later removal.
    pub fn subscribe<F>(&self, callback: F) -> Listener<T>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        let listener = Listener::new(callback);
        self.add_listener(listener.clone());
        listener
    }

    /// Remove the most recent registration of `listener`.
    ///
    /// Returns `false` if it was not registered.
    pub fn remove_listener(&self, listener: &Listener<T>) -> bool {
        self.write().listeners.remove_last(listener)
    }

    /// Drop every listener and reset the value. Fires no notification.
    ///
    /// A disposed cell can still be read but ignores all further writes and
    /// registrations. Disposing twice is the same as disposing once.
    pub fn dispose(&self) {
        let reset = {
            let state = self.read();
            if state.disposed {
                return;
            }
            Arc::clone(&state.reset)
        };
        let value = reset();

        let mut state = self.write();
        state.listeners.clear();
        state.value = value;
        state.disposed = true;
        trace!(cell = std::any::type_name::<T>(), "disposed");
    }

    /// Whether [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.read().disposed
    }

    /// Number of registrations, counting duplicates.
    pub fn listener_count(&self) -> usize {
        self.read().listeners.len()
    }

    // Listeners are snapshotted so they run with no lock held and may call
    // back into the cell.
    fn pending(state: &CellState<T>) -> Option<(T, Vec<Listener<T>>)> {
        if state.listeners.is_empty() {
            return None;
        }
        Some((state.value.clone(), state.listeners.snapshot()))
    }

    // Stops early if a listener disposes the cell.
    fn deliver(&self, pending: Option<(T, Vec<Listener<T>>)>) {
        let Some((value, listeners)) = pending else {
            return;
        };
        trace!(
            cell = std::any::type_name::<T>(),
            listeners = listeners.len(),
            "notifying listeners"
        );
        for listener in &listeners {
            if self.is_disposed() {
                trace!(
                    cell = std::any::type_name::<T>(),
                    "cell disposed during notification"
                );
                return;
            }
            listener.call(&value);
        }
    }
}

impl<T> ObservableCell<T> {
    pub(super) fn with_value<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let state = self.read();
        f(&state.value)
    }

    // Listeners never run under these locks, so a poisoned lock still
    // guards consistent state.
    fn read(&self) -> RwLockReadGuard<'_, CellState<T>> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CellState<T>> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<T> Clone for ObservableCell<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
        }
    }
}

impl<T: Clone + PartialEq + Default + 'static> Default for ObservableCell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + PartialEq + Default + 'static> From<T> for ObservableCell<T> {
    fn from(value: T) -> Self {
        Self::new(value)
    }
}

impl<T: PartialEq> PartialEq<T> for ObservableCell<T> {
    fn eq(&self, other: &T) -> bool {
        self.read().value == *other
    }
}

impl<T: fmt::Display> fmt::Display for ObservableCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.read().value, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("ObservableCell")
            .field("value", &state.value)
            .field("listeners", &state.listeners.len())
            .field("disposed", &state.disposed)
            .finish()
    }
}
