use super::*;
use serde_json::json;

#[test]
fn truthiness_matches_browser_rules() {
    assert!(!is_truthy(&json!(null)));
    assert!(!is_truthy(&json!(false)));
    assert!(!is_truthy(&json!(0)));
    assert!(!is_truthy(&json!(0.0)));
    assert!(!is_truthy(&json!("")));
    assert!(is_truthy(&json!(true)));
    assert!(is_truthy(&json!(1)));
    assert!(is_truthy(&json!("no")));
    assert!(is_truthy(&json!([])));
    assert!(is_truthy(&json!({})));
}

#[test]
fn profiles_success_requires_object_with_truthy_field() {
    assert!(Profiles(json!({ "success": true, "id": "x" })).is_success());
    assert!(!Profiles(json!({ "success": false })).is_success());
    assert!(!Profiles(json!({ "id": "x" })).is_success());
    assert!(!Profiles(json!([{ "success": true }])).is_success());
    assert!(!Profiles(json!(null)).is_success());
}

#[test]
fn profiles_serialize_transparently() {
    let body = json!({ "success": true, "profiles": [] });
    let profiles: Profiles = serde_json::from_value(body.clone()).unwrap();
    assert_eq!(profiles.as_value(), &body);
    assert_eq!(serde_json::to_value(&profiles).unwrap(), body);
    assert_eq!(profiles.into_value(), body);
}
