//! Scoped value registry for one render tree.
//!
//! SYSTEM CONTEXT
//! ==============
//! A [`Context`] is created per request or render root and passed down
//! explicitly. Child scopes see their ancestors' values; sibling and
//! unrelated roots never share anything.

#[cfg(test)]
#[path = "context_test.rs"]
mod context_test;

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Default)]
pub struct Context {
    parent: Option<Rc<Context>>,
    values: RefCell<HashMap<&'static str, Rc<dyn Any>>>,
}

impl Context {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// New scope that falls back to `parent` for keys it does not hold.
    #[must_use]
    pub fn child(parent: &Rc<Context>) -> Self {
        Self { parent: Some(Rc::clone(parent)), values: RefCell::default() }
    }

    /// Publish `value` under `key` in this scope, shadowing any ancestor.
    pub fn provide<T: 'static>(&self, key: &'static str, value: T) {
        self.values.borrow_mut().insert(key, Rc::new(value));
    }

    /// Look up `key` in this scope, then in ancestors.
    ///
    /// Returns `None` when the key is missing or holds another type.
    #[must_use]
    pub fn get<T: Clone + 'static>(&self, key: &'static str) -> Option<T> {
        let local = self.values.borrow().get(key).cloned();
        match local {
            Some(value) => value.downcast_ref::<T>().cloned(),
            None => self.parent.as_ref().and_then(|p| p.get(key)),
        }
    }

    #[must_use]
    pub fn contains(&self, key: &'static str) -> bool {
        self.values.borrow().contains_key(key) || self.parent.as_ref().is_some_and(|p| p.contains(key))
    }
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<&'static str> = self.values.borrow().keys().copied().collect();
        keys.sort_unstable();
        f.debug_struct("Context")
            .field("keys", &keys)
            .field("has_parent", &self.parent.is_some())
            .finish()
    }
}
