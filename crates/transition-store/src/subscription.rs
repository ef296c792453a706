//! Subscriber registry and the handles returned by `Store::subscribe`
//!
//! Registrations are keyed by a [`SubscriptionId`] handed out at subscribe time, not
//! by the identity of the callback. Subscribing the same closure twice creates two
//! independent registrations, and each handle removes only its own.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use crate::transition::Transition;

pub(crate) type Callback<S> = Rc<dyn Fn(&Transition<S>)>;

/// Opaque identifier of one registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One registered subscriber
///
/// `active` is shared with every notification snapshot that contains this entry, so
/// removal is visible to a round that is already in progress.
pub(crate) struct Entry<S> {
    id: SubscriptionId,
    active: Rc<Cell<bool>>,
    callback: Callback<S>,
}

impl<S> Entry<S> {
    pub(crate) fn id(&self) -> SubscriptionId {
        self.id
    }

    pub(crate) fn is_active(&self) -> bool {
        self.active.get()
    }

    pub(crate) fn notify(&self, transition: &Transition<S>) {
        (self.callback)(transition)
    }
}

impl<S> Clone for Entry<S> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: Rc::clone(&self.active),
            callback: Rc::clone(&self.callback),
        }
    }
}

/// Ordered set of subscribers belonging to one store
pub(crate) struct SubscriberRegistry<S> {
    store_name: String,
    entries: RefCell<Vec<Entry<S>>>,
    next_id: Cell<u64>,
}

impl<S> SubscriberRegistry<S> {
    pub(crate) fn new(store_name: impl Into<String>) -> Self {
        Self {
            store_name: store_name.into(),
            entries: RefCell::new(Vec::new()),
            next_id: Cell::new(0),
        }
    }

    /// Append a subscriber at the end of the notification order
    pub(crate) fn insert(&self, callback: Callback<S>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(self.next_id.get() + 1);

        self.entries.borrow_mut().push(Entry {
            id,
            active: Rc::new(Cell::new(true)),
            callback,
        });
        log::trace!("{}: subscriber {} registered", self.store_name, id);
        id
    }

    /// Copy of the current subscribers, in registration order
    ///
    /// The borrow is released before returning, so callbacks invoked from the
    /// snapshot are free to subscribe or unsubscribe.
    pub(crate) fn snapshot(&self) -> Vec<Entry<S>> {
        self.entries.borrow().clone()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.borrow().len()
    }
}

/// Type-erased view of a registry, so [`Subscription`] does not carry the state type
trait Registry {
    fn remove(&self, id: SubscriptionId) -> bool;
    fn contains(&self, id: SubscriptionId) -> bool;
}

impl<S> Registry for SubscriberRegistry<S> {
    fn remove(&self, id: SubscriptionId) -> bool {
        let removed = {
            let mut entries = self.entries.borrow_mut();
            let position = entries.iter().position(|entry| entry.id == id);
            position.map(|position| entries.remove(position))
        };
        let Some(entry) = removed else {
            return false;
        };

        entry.active.set(false);
        log::trace!("{}: subscriber {} removed", self.store_name, id);
        true
    }

    fn contains(&self, id: SubscriptionId) -> bool {
        self.entries.borrow().iter().any(|entry| entry.id == id)
    }
}

/// Handle to one registration, returned by `Store::subscribe`
///
/// Dropping the handle does not unsubscribe; call [`Subscription::unsubscribe`].
/// The handle does not keep the store alive.
#[derive(Clone)]
pub struct Subscription {
    id: SubscriptionId,
    registry: Weak<dyn Registry>,
}

impl Subscription {
    pub(crate) fn new<S: 'static>(
        id: SubscriptionId,
        registry: &Rc<SubscriberRegistry<S>>,
    ) -> Self {
        let registry: Rc<dyn Registry> = registry.clone();
        Self {
            id,
            registry: Rc::downgrade(&registry),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Whether the callback is still registered with a live store
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.contains(self.id))
    }

    /// Stop receiving transitions
    ///
    /// Safe to call any number of times, from inside a notification, or after the
    /// store is gone. If called while a dispatch is running, the callback is not
    /// invoked again during that dispatch.
    pub fn unsubscribe(&self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
