//! Transition Store
//!
//! A single state cell that changes only through an ordered list of reducers, with
//! subscribers notified of every change.
//!
//! ```text
//! dispatch(action) → reducer 1 → commit → notify → reducer 2 → commit → notify → ...
//! ```
//!
//! This crate provides:
//! - [`Store`]: owns the state, runs reducers, notifies subscribers
//! - [`Reducer`]: a named `(action, state) → Transition` function
//! - [`Transition`]: the new state plus opaque [`SideEffect`] markers
//! - [`Subscription`]: handle to remove a subscriber again
//! - [`StoreConfig`]: optional configuration, loadable from TOML
//!
//! # Example
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use transition_store::{Reducer, Store, Transition};
//!
//! enum Counter {
//!     Increment,
//!     Reset,
//! }
//!
//! fn count(action: &Counter, state: &u32) -> Transition<u32> {
//!     match action {
//!         Counter::Increment => Transition::new(state + 1),
//!         Counter::Reset => Transition::new(0),
//!     }
//! }
//!
//! let store = Store::new(0, vec![Reducer::new("count", count)]);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = Rc::clone(&seen);
//! let subscription = store.subscribe(move |t| sink.borrow_mut().push(*t.to_state()));
//!
//! store.dispatch(Counter::Increment)?;
//! store.dispatch(Counter::Increment)?;
//! subscription.unsubscribe();
//! store.dispatch(Counter::Reset)?;
//!
//! // One replay on subscribe, then one transition per reducer per dispatch
//! assert_eq!(*seen.borrow(), vec![0, 1, 2]);
//! assert_eq!(store.state(), 0);
//! # Ok::<(), transition_store::DispatchError>(())
//! ```

mod config;
mod error;
mod reducer;
mod side_effect;
mod store;
mod subscription;
mod transition;

pub use config::StoreConfig;
pub use error::{ConfigError, DispatchError};
pub use reducer::Reducer;
pub use side_effect::SideEffect;
pub use store::Store;
pub use subscription::{Subscription, SubscriptionId};
pub use transition::Transition;
