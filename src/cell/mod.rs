//! The observable cell and its listener handles.
//!
//! - `ObservableCell<T>`: a value that notifies listeners when it changes
//! - `Listener<T>`: a cloneable callback handle with identity, used to
//!   register and later remove a listener

mod cell;
mod listener;
#[cfg(feature = "serde")]
mod persist;

pub use cell::ObservableCell;
pub use listener::Listener;
