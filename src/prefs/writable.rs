//! Observable value holder for single-threaded UI state.
//!
//! DESIGN
//! ======
//! Clones share one value. Subscribers run synchronously, first when they
//! subscribe and then after every `set`/`update`, with no equality check.
//! The inner borrow is released before callbacks run, so a subscriber may
//! read or write the holder it is attached to.

#[cfg(test)]
#[path = "writable_test.rs"]
mod writable_test;

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Handle returned by [`Writable::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Subscriber<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
    value: T,
    subscribers: Vec<(SubscriptionId, Subscriber<T>)>,
    next_id: u64,
}

pub struct Writable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Writable<T> {
    fn clone(&self) -> Self {
        Self { inner: Rc::clone(&self.inner) }
    }
}

impl<T: fmt::Debug> fmt::Debug for Writable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Writable")
            .field("value", &inner.value)
            .field("subscribers", &inner.subscribers.len())
            .finish()
    }
}

impl<T: Clone + 'static> Writable<T> {
    pub fn new(value: T) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Inner { value, subscribers: Vec::new(), next_id: 0 })),
        }
    }

    /// Clone of the current value.
    #[must_use]
    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    /// Replace the value and notify subscribers.
    pub fn set(&self, value: T) {
        self.inner.borrow_mut().value = value;
        self.notify();
    }

    /// Compute the next value from the current one and notify subscribers.
    pub fn update(&self, f: impl FnOnce(T) -> T) {
        let current = self.get();
        self.set(f(current));
    }

    /// Register `f`. It is called immediately with the current value.
    pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> SubscriptionId {
        let subscriber: Subscriber<T> = Rc::new(f);
        let (id, value) = {
            let mut inner = self.inner.borrow_mut();
            let id = SubscriptionId(inner.next_id);
            inner.next_id += 1;
            inner.subscribers.push((id, Rc::clone(&subscriber)));
            (id, inner.value.clone())
        };
        subscriber(&value);
        id
    }

    /// Remove a subscriber. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.subscribers.len();
        inner.subscribers.retain(|(sid, _)| *sid != id);
        inner.subscribers.len() != before
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.borrow().subscribers.len()
    }

    /// True when both handles point at the same holder.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    fn notify(&self) {
        let (value, subscribers) = {
            let inner = self.inner.borrow();
            let subscribers: Vec<Subscriber<T>> = inner.subscribers.iter().map(|(_, s)| Rc::clone(s)).collect();
            (inner.value.clone(), subscribers)
        };
        for subscriber in subscribers {
            subscriber(&value);
        }
    }
}
