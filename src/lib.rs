//! # observable-cell
//!
//! A value cell that tells you when it changes.
//!
//! `ObservableCell<T>` holds a single value and an ordered list of
//! listeners. Setting a value that differs from the current one calls every
//! listener, in registration order, with the new value. Setting an equal
//! value does nothing at all.
//!
//! ```
//! use observable_cell::ObservableCell;
//!
//! let volume = ObservableCell::with_listener(5, |v| println!("volume is now {v}"));
//! volume.set(5); // unchanged, nothing printed
//! volume.set(7); // prints "volume is now 7"
//! assert!(volume == 7);
//! ```
//!
//! ## Listeners
//!
//! Closures have no identity in Rust, so listeners are registered through a
//! [`Listener`] handle. Clones of a handle are the same listener: register
//! it twice and it runs twice, remove it once and it runs once.
//!
//! ## Disposal
//!
//! [`ObservableCell::dispose`] drops every listener and resets the value,
//! to `T::default()` unless another reset was configured. A disposed cell
//! can still be read but ignores writes and never notifies again.
//!
//! ## Features
//!
//! - `serde` (default): a cell serializes as its current value. Listeners
//!   are never persisted.

pub mod cell;

pub use cell::{Listener, ObservableCell};
