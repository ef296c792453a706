use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::config::StoreConfig;
use crate::error::DispatchError;
use crate::reducer::Reducer;
use crate::subscription::{SubscriberRegistry, Subscription};
use crate::transition::Transition;

/// Store - owns the state cell and runs the reducer/notify loop
///
/// - State changes only through [`Store::dispatch`]
/// - Reducers are fixed at construction and run in order on every dispatch
/// - Subscribers are notified once per reducer, not once per dispatch
///
/// All methods take `&self`. Wrap the store in an `Rc` to let reducers or
/// subscribers call back into it; the store never holds an internal borrow while
/// user code runs. A nested dispatch runs to completion before the outer dispatch
/// resumes notifying its current round.
///
/// The store is single-threaded (`!Send`, `!Sync`).
pub struct Store<S, A> {
    config: StoreConfig,
    state: RefCell<S>,
    reducers: Box<[Reducer<S, A>]>,
    subscribers: Rc<SubscriberRegistry<S>>,
    depth: Cell<usize>,
}

impl<S: Clone + 'static, A> Store<S, A> {
    /// Create a store with the default config
    pub fn new(initial_state: S, reducers: impl IntoIterator<Item = Reducer<S, A>>) -> Self {
        Self::with_config(StoreConfig::default(), initial_state, reducers)
    }

    pub fn with_config(
        config: StoreConfig,
        initial_state: S,
        reducers: impl IntoIterator<Item = Reducer<S, A>>,
    ) -> Self {
        let reducers: Box<[Reducer<S, A>]> = reducers.into_iter().collect();
        log::debug!(
            "{}: created with {} reducer(s)",
            config.name,
            reducers.len()
        );

        Self {
            subscribers: Rc::new(SubscriberRegistry::new(config.name.clone())),
            config,
            state: RefCell::new(initial_state),
            reducers,
            depth: Cell::new(0),
        }
    }

    /// Clone of the current state
    pub fn state(&self) -> S {
        self.state.borrow().clone()
    }

    /// Register a subscriber
    ///
    /// The callback is appended to the notification order and then called once,
    /// before this method returns, with the current state and no side effects.
    /// A subscriber added while a dispatch is notifying does not receive the round
    /// in progress.
    pub fn subscribe<F>(&self, on_transition: F) -> Subscription
    where
        F: Fn(&Transition<S>) + 'static,
    {
        let callback: Rc<dyn Fn(&Transition<S>)> = Rc::new(on_transition);
        let id = self.subscribers.insert(Rc::clone(&callback));

        callback(&Transition::new(self.state()));

        Subscription::new(id, &self.subscribers)
    }

    /// Run `action` through every reducer, in order
    ///
    /// For each reducer: compute its transition from the current state, commit the
    /// new state, then notify every subscriber registered at that moment. With `K`
    /// reducers a subscriber receives `K` transitions per dispatch.
    ///
    /// If a reducer fails, its error is returned. State committed by the reducers
    /// before it is kept; the remaining reducers do not run.
    pub fn dispatch(&self, action: A) -> Result<(), DispatchError> {
        let depth = self.depth.get() + 1;
        if let Some(limit) = self.config.max_dispatch_depth {
            if depth > limit {
                log::warn!(
                    "{}: refusing dispatch at depth {} (limit {})",
                    self.config.name,
                    depth,
                    limit
                );
                return Err(DispatchError::DepthExceeded {
                    store: self.config.name.clone(),
                    depth,
                    limit,
                });
            }
        }
        let _depth = DepthGuard::enter(&self.depth);

        log::debug!(
            "{}: dispatch at depth {} through {} reducer(s)",
            self.config.name,
            depth,
            self.reducers.len()
        );

        for (index, reducer) in self.reducers.iter().enumerate() {
            // Reducers get a copy so a nested dispatch from inside one can commit.
            let current = self.state();
            let transition = reducer.reduce(&action, &current).map_err(|e| {
                log::warn!(
                    "{}: reducer '{}' failed: {:#}",
                    self.config.name,
                    reducer.name(),
                    e
                );
                DispatchError::Reducer {
                    store: self.config.name.clone(),
                    reducer: reducer.name().to_string(),
                    index,
                    source: e.into(),
                }
            })?;

            *self.state.borrow_mut() = transition.to_state().clone();
            self.notify(reducer, &transition);
        }

        Ok(())
    }

    fn notify(&self, reducer: &Reducer<S, A>, transition: &Transition<S>) {
        let round = self.subscribers.snapshot();
        if self.config.log_transitions {
            log::debug!(
                "{}: '{}' committed, {} side effect(s), notifying {} subscriber(s)",
                self.config.name,
                reducer.name(),
                transition.side_effects().len(),
                round.len()
            );
        }

        for entry in &round {
            // Unsubscribed after the snapshot was taken
            if !entry.is_active() {
                continue;
            }
            if self.config.log_transitions {
                log::trace!("{}: notifying {}", self.config.name, entry.id());
            }
            entry.notify(transition);
        }
    }
}

impl<S, A> Store<S, A> {
    /// Borrow the current state
    ///
    /// # Panics
    ///
    /// If `f` dispatches on this store.
    pub fn with_state<R>(&self, f: impl FnOnce(&S) -> R) -> R {
        f(&self.state.borrow())
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Names of the reducers, in the order they run
    pub fn reducer_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.reducers.iter().map(Reducer::name)
    }

    /// Number of dispatches currently on the call stack
    pub fn dispatch_depth(&self) -> usize {
        self.depth.get()
    }
}

impl<S: fmt::Debug, A> fmt::Debug for Store<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("name", &self.config.name)
            .field("state", &self.state)
            .field("reducers", &self.reducers)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Tracks dispatch nesting; decrements on drop so a panicking reducer or subscriber
/// leaves the counter consistent.
struct DepthGuard<'a>(&'a Cell<usize>);

impl<'a> DepthGuard<'a> {
    fn enter(depth: &'a Cell<usize>) -> Self {
        depth.set(depth.get() + 1);
        Self(depth)
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.0.set(self.0.get().saturating_sub(1));
    }
}
