//! Observable object registry
//!
//! An ordered list of shared handles plus a list of observers. Every
//! mutation publishes the full sequence to each observer synchronously,
//! after the backing vector has been updated. New observers receive the
//! current sequence as soon as they subscribe.
//!
//! Elements are compared by identity (`Rc::ptr_eq`), never by value.
//!
//! Mutations take `&mut self`, so an observer cannot call back into them
//! unless the registry is shared through `Rc<RefCell<_>>`; in that case the
//! re-entrant call panics on the `RefCell` borrow. Unsubscribing from inside
//! a notification is supported.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::sim::GameObject;

/// Shared handle to a live game object
pub type ObjectRef = Rc<RefCell<GameObject>>;

/// The registry of live game objects
pub type GameObjects = Registry<RefCell<GameObject>>;

type Observer<T> = Box<dyn FnMut(&[Rc<T>])>;

struct Slot<T> {
    active: Rc<Cell<bool>>,
    callback: Observer<T>,
}

/// Handle returned by [`Registry::subscribe`]
///
/// Dropping the handle does not cancel the subscription; call
/// [`Subscription::unsubscribe`].
#[must_use = "dropping a Subscription leaves the observer registered"]
#[derive(Debug)]
pub struct Subscription {
    active: Rc<Cell<bool>>,
}

impl Subscription {
    /// Stop receiving notifications
    pub fn unsubscribe(self) {
        self.active.set(false);
    }
}

/// Ordered, observable collection of shared items
pub struct Registry<T> {
    items: Vec<Rc<T>>,
    observers: Vec<Slot<T>>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("len", &self.items.len())
            .field("observers", &self.observer_count())
            .finish()
    }
}

impl<T> Registry<T> {
    /// Create an empty registry with no observers
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            observers: Vec::new(),
        }
    }

    /// Register an observer.
    ///
    /// The observer is called right away with the current sequence and then
    /// after every `add`, `remove` and `empty`.
    pub fn subscribe<F>(&mut self, observer: F) -> Subscription
    where
        F: FnMut(&[Rc<T>]) + 'static,
    {
        let active = Rc::new(Cell::new(true));
        let mut slot = Slot {
            active: Rc::clone(&active),
            callback: Box::new(observer),
        };
        (slot.callback)(&self.items);
        self.observers.push(slot);
        Subscription { active }
    }

    /// Append an item and notify
    pub fn add(&mut self, item: Rc<T>) {
        self.items.push(item);
        log::debug!("registry add (len {})", self.items.len());
        self.publish();
    }

    /// Remove the first element identical to `item` and notify.
    ///
    /// Observers are notified even when `item` is absent, with the unchanged
    /// sequence. Returns whether an element was removed.
    pub fn remove(&mut self, item: &Rc<T>) -> bool {
        let removed = match self.items.iter().position(|x| Rc::ptr_eq(x, item)) {
            Some(i) => {
                self.items.remove(i);
                true
            }
            None => false,
        };
        log::debug!(
            "registry remove (found: {}, len {})",
            removed,
            self.items.len()
        );
        self.publish();
        removed
    }

    /// Drop every item and notify with the empty sequence
    pub fn empty(&mut self) {
        self.items.clear();
        log::debug!("registry emptied");
        self.publish();
    }

    /// Current sequence in insertion order
    pub fn items(&self) -> &[Rc<T>] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of observers that have not unsubscribed
    pub fn observer_count(&self) -> usize {
        self.observers.iter().filter(|s| s.active.get()).count()
    }

    fn publish(&mut self) {
        self.observers.retain(|s| s.active.get());
        for slot in &mut self.observers {
            // An earlier observer may have cancelled this one
            if slot.active.get() {
                (slot.callback)(&self.items);
            }
        }
    }
}

impl GameObjects {
    /// Wrap an object in a shared handle, add it and return the handle
    pub fn spawn(&mut self, object: GameObject) -> ObjectRef {
        let handle = Rc::new(RefCell::new(object));
        self.add(Rc::clone(&handle));
        handle
    }
}
