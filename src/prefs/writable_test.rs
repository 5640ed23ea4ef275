use super::*;
use std::cell::Cell;

#[test]
fn subscribe_runs_immediately_with_current_value() {
    let store = Writable::new(3);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    store.subscribe(move |v| sink.borrow_mut().push(*v));
    assert_eq!(*seen.borrow(), vec![3]);
}

#[test]
fn set_and_update_notify_every_time() {
    let store = Writable::new(1);
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    store.subscribe(move |_| counter.set(counter.get() + 1));

    store.set(1);
    store.update(|v| v + 1);
    assert_eq!(store.get(), 2);
    // One immediate call plus one per mutation, even when the value is unchanged.
    assert_eq!(calls.get(), 3);
}

#[test]
fn clones_share_the_same_value() {
    let store = Writable::new(String::from("a"));
    let other = store.clone();
    other.set("b".into());
    assert_eq!(store.get(), "b");
    assert!(store.ptr_eq(&other));
    assert!(!store.ptr_eq(&Writable::new(String::new())));
}

#[test]
fn unsubscribe_stops_notifications() {
    let store = Writable::new(0);
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let id = store.subscribe(move |_| counter.set(counter.get() + 1));
    assert_eq!(store.subscriber_count(), 1);

    assert!(store.unsubscribe(id));
    assert!(!store.unsubscribe(id));
    store.set(5);
    assert_eq!(calls.get(), 1);
    assert_eq!(store.subscriber_count(), 0);
}

#[test]
fn subscriber_may_read_the_holder() {
    let store = Writable::new(10);
    let reader = store.clone();
    let seen = Rc::new(Cell::new(0));
    let sink = Rc::clone(&seen);
    store.subscribe(move |_| sink.set(reader.get()));
    store.set(42);
    assert_eq!(seen.get(), 42);
}
