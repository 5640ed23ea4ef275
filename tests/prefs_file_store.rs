//! End-to-end: preferences persisted to a JSON file survive a new session.

use std::path::PathBuf;

use rates_client::Context;
use rates_client::prefs::{CURRENT_RATES_VERSION, Crop, FileStorage, PreferenceStore, RATES_DATA_KEY, RatesData, StoragePort};

fn temp_path(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("rates-client-it-{name}-{}-{nanos}.json", std::process::id()))
}

#[test]
fn settings_survive_a_new_session() {
    let path = temp_path("session");

    {
        let prefs = PreferenceStore::new(FileStorage::new(&path));
        let store = prefs.get(&Context::new());
        store.update(|mut data| {
            data.strength = 310;
            data.selected_pet = Some("MOOSHROOM_COW".into());
            data.exported.set(Crop::Mushroom, true);
            data
        });
    }

    let prefs = PreferenceStore::new(FileStorage::new(&path));
    let data = prefs.get(&Context::new()).get();
    assert_eq!(data.strength, 310);
    assert_eq!(data.selected_pet.as_deref(), Some("MOOSHROOM_COW"));
    assert!(data.exported.get(Crop::Mushroom));

    let _ = std::fs::remove_file(path);
}

#[test]
fn old_version_in_file_is_replaced_by_defaults() {
    let path = temp_path("stale");
    let storage = FileStorage::new(&path);
    storage
        .set_item(RATES_DATA_KEY, r#"{"v":0,"settings":false,"communityCenter":3,"strength":9,"exported":{}}"#)
        .unwrap();

    let data = PreferenceStore::new(storage.clone()).get(&Context::new()).get();
    assert_eq!(data, RatesData::default());

    let raw = storage.get_item(RATES_DATA_KEY).unwrap().unwrap();
    let persisted: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted["v"], serde_json::json!(CURRENT_RATES_VERSION));

    let _ = std::fs::remove_file(path);
}

#[test]
fn corrupt_file_entry_falls_back_to_defaults() {
    let path = temp_path("corrupt");
    let storage = FileStorage::new(&path);
    storage.set_item(RATES_DATA_KEY, "{{{").unwrap();

    let data = PreferenceStore::new(storage).get(&Context::new()).get();
    assert_eq!(data, RatesData::default());

    let _ = std::fs::remove_file(path);
}

#[test]
fn update_recovers_a_malformed_storage_file() {
    let path = temp_path("malformed");
    std::fs::write(&path, "not json").unwrap();

    let prefs = PreferenceStore::new(FileStorage::new(&path));
    prefs.get(&Context::new()).update(|mut data| {
        data.strength = 42;
        data
    });

    let reloaded = PreferenceStore::new(FileStorage::new(&path)).load().expect("snapshot persisted");
    assert_eq!(reloaded.strength, 42);

    let _ = std::fs::remove_file(path);
}
