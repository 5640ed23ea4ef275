use super::*;
use serde_json::json;

// =============================================================
// Crop
// =============================================================

#[test]
fn crop_keys_round_trip() {
    for crop in Crop::ALL {
        assert_eq!(Crop::from_key(crop.key()), Some(crop));
    }
    assert_eq!(Crop::from_key("SEEDS"), None);
}

#[test]
fn crop_display_uses_readable_name() {
    assert_eq!(Crop::CocoaBeans.to_string(), "Cocoa Beans");
    assert_eq!(Crop::NetherWart.key(), "NETHER_STALK");
}

// =============================================================
// ExportedFlags
// =============================================================

#[test]
fn default_flags_cover_every_crop_and_are_false() {
    let flags = ExportedFlags::default();
    let entries: Vec<_> = flags.iter().collect();
    assert_eq!(entries.len(), Crop::ALL.len());
    assert!(entries.iter().all(|(_, exported)| !exported));
}

#[test]
fn flags_serialize_with_full_key_set() {
    let mut flags = ExportedFlags::default();
    flags.set(Crop::Wheat, true);
    let value = serde_json::to_value(flags).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.len(), 10);
    assert_eq!(obj["WHEAT"], json!(true));
    assert_eq!(obj["INK_SACK:3"], json!(false));
}

#[test]
fn flags_deserialize_fills_missing_and_drops_unknown() {
    let flags: ExportedFlags = serde_json::from_value(json!({ "MELON": true, "SEEDS": true })).unwrap();
    assert!(flags.get(Crop::Melon));
    assert_eq!(flags.iter().filter(|(_, exported)| *exported).count(), 1);
}

// =============================================================
// RatesData
// =============================================================

#[test]
fn default_snapshot_matches_expected_values() {
    let data = RatesData::default();
    assert_eq!(data.version, CURRENT_RATES_VERSION);
    assert!(data.settings);
    assert_eq!(data.tool, None);
    assert_eq!(data.community_center, 0);
    assert_eq!(data.selected_pet, None);
    assert_eq!(data.strength, 0);
    assert_eq!(data.exported, ExportedFlags::default());
}

#[test]
fn snapshot_uses_stored_wire_keys() {
    let mut data = RatesData::default();
    data.selected_pet = Some("ELEPHANT".into());
    data.community_center = 5;
    let value = serde_json::to_value(&data).unwrap();
    assert_eq!(value["v"], json!(1));
    assert_eq!(value["settings"], json!(true));
    assert_eq!(value["communityCenter"], json!(5));
    assert_eq!(value["selectedPet"], json!("ELEPHANT"));
    assert!(value.get("tool").is_none());
}

#[test]
fn snapshot_round_trips_through_json() {
    let mut data = RatesData::default();
    data.settings = false;
    data.tool = Some(FarmingTool(json!({ "id": "THEORETICAL_HOE_WARTS_3", "cultivating": 12 })));
    data.selected_pet = Some("MOOSHROOM_COW".into());
    data.strength = 250;
    data.exported.set(Crop::Cactus, true);

    let raw = serde_json::to_string(&data).unwrap();
    let back: RatesData = serde_json::from_str(&raw).unwrap();
    assert_eq!(back, data);
}

#[test]
fn normalized_resets_other_versions() {
    let mut data = RatesData::default();
    data.version = 0;
    data.strength = 99;
    assert_eq!(data.normalized(), RatesData::default());

    let mut current = RatesData::default();
    current.strength = 99;
    assert_eq!(current.clone().normalized(), current);
}

// =============================================================
// decode
// =============================================================

#[test]
fn decode_accepts_valid_snapshot() {
    let raw = serde_json::to_string(&RatesData::default()).unwrap();
    assert!(matches!(decode(&raw), Decoded::Snapshot(data) if data == RatesData::default()));
}

#[test]
fn decode_keeps_old_version_that_still_fits() {
    let mut value = serde_json::to_value(RatesData::default()).unwrap();
    value["v"] = json!(0);
    let decoded = decode(&value.to_string());
    assert!(matches!(decoded, Decoded::Snapshot(data) if data.version == 0));
}

#[test]
fn decode_flags_old_shape_as_stale() {
    let decoded = decode(r#"{"v":0,"rates":[1,2,3]}"#);
    assert!(matches!(decoded, Decoded::Stale { version: Some(0) }));
}

#[test]
fn decode_flags_garbage_as_corrupt() {
    assert!(matches!(decode("{not json"), Decoded::Corrupt(_)));
    assert!(matches!(decode(r#"{"v":1,"settings":"yes"}"#), Decoded::Corrupt(_)));
}
