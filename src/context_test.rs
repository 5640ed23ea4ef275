use super::*;

#[test]
fn provide_then_get_returns_value() {
    let cx = Context::new();
    cx.provide("answer", 42_u32);
    assert_eq!(cx.get::<u32>("answer"), Some(42));
    assert!(cx.contains("answer"));
}

#[test]
fn missing_key_or_wrong_type_is_none() {
    let cx = Context::new();
    assert_eq!(cx.get::<u32>("answer"), None);
    cx.provide("answer", "forty-two");
    assert_eq!(cx.get::<u32>("answer"), None);
}

#[test]
fn child_sees_parent_and_can_shadow() {
    let root = Rc::new(Context::new());
    root.provide("name", String::from("root"));
    let child = Context::child(&root);
    assert_eq!(child.get::<String>("name").as_deref(), Some("root"));

    child.provide("name", String::from("child"));
    assert_eq!(child.get::<String>("name").as_deref(), Some("child"));
    assert_eq!(root.get::<String>("name").as_deref(), Some("root"));
}

#[test]
fn independent_roots_do_not_share() {
    let a = Context::new();
    let b = Context::new();
    a.provide("k", 1_i32);
    assert!(!b.contains("k"));
}
