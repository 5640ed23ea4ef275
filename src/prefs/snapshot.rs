//! Persisted rates-calculator preferences.
//!
//! DESIGN
//! ======
//! Wire keys match the snapshot format already stored by deployed clients
//! (`v`, `settings`, `communityCenter`, ...), so existing `ratesData` entries
//! stay readable. Export flags are a fixed array indexed by [`Crop`], which
//! keeps the key set closed no matter what the stored JSON contains.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::collections::HashMap;
use std::fmt;

use serde::de::Deserializer;
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Snapshot version this build understands. Any other value resets the
/// snapshot to defaults.
pub const CURRENT_RATES_VERSION: u32 = 1;

const CROP_COUNT: usize = 10;

// =============================================================================
// CROPS
// =============================================================================

/// Crops tracked by the rates calculator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Crop {
    Cactus,
    Carrot,
    CocoaBeans,
    Melon,
    Mushroom,
    NetherWart,
    Potato,
    Pumpkin,
    SugarCane,
    Wheat,
}

impl Crop {
    pub const ALL: [Crop; CROP_COUNT] = [
        Crop::Cactus,
        Crop::Carrot,
        Crop::CocoaBeans,
        Crop::Melon,
        Crop::Mushroom,
        Crop::NetherWart,
        Crop::Potato,
        Crop::Pumpkin,
        Crop::SugarCane,
        Crop::Wheat,
    ];

    /// Item identifier used as the JSON key.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Crop::Cactus => "CACTUS",
            Crop::Carrot => "CARROT_ITEM",
            Crop::CocoaBeans => "INK_SACK:3",
            Crop::Melon => "MELON",
            Crop::Mushroom => "MUSHROOM_COLLECTION",
            Crop::NetherWart => "NETHER_STALK",
            Crop::Potato => "POTATO_ITEM",
            Crop::Pumpkin => "PUMPKIN",
            Crop::SugarCane => "SUGAR_CANE",
            Crop::Wheat => "WHEAT",
        }
    }

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|crop| crop.key() == key)
    }

    /// Human-readable crop name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Crop::Cactus => "Cactus",
            Crop::Carrot => "Carrot",
            Crop::CocoaBeans => "Cocoa Beans",
            Crop::Melon => "Melon",
            Crop::Mushroom => "Mushroom",
            Crop::NetherWart => "Nether Wart",
            Crop::Potato => "Potato",
            Crop::Pumpkin => "Pumpkin",
            Crop::SugarCane => "Sugar Cane",
            Crop::Wheat => "Wheat",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// EXPORT FLAGS
// =============================================================================

/// Per-crop "exported" toggles. Always holds every [`Crop`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExportedFlags([bool; CROP_COUNT]);

impl ExportedFlags {
    #[must_use]
    pub fn get(&self, crop: Crop) -> bool {
        self.0[crop.index()]
    }

    pub fn set(&mut self, crop: Crop, exported: bool) {
        self.0[crop.index()] = exported;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Crop, bool)> + '_ {
        Crop::ALL.into_iter().map(|crop| (crop, self.get(crop)))
    }
}

impl Serialize for ExportedFlags {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(CROP_COUNT))?;
        for (crop, exported) in self.iter() {
            map.serialize_entry(crop.key(), &exported)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ExportedFlags {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = HashMap::<String, bool>::deserialize(deserializer)?;
        let mut flags = Self::default();
        for (key, exported) in raw {
            // Unknown keys are dropped; missing keys stay false.
            if let Some(crop) = Crop::from_key(&key) {
                flags.set(crop, exported);
            }
        }
        Ok(flags)
    }
}

// =============================================================================
// SNAPSHOT
// =============================================================================

/// Opaque farming tool selection. Its shape is owned by the calculator and
/// round-trips untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FarmingTool(pub serde_json::Value);

/// Versioned UI preference snapshot stored under `ratesData`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatesData {
    #[serde(rename = "v")]
    pub version: u32,
    /// Whether the settings panel is open.
    pub settings: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<FarmingTool>,
    #[serde(rename = "communityCenter")]
    pub community_center: i64,
    #[serde(rename = "selectedPet", default, skip_serializing_if = "Option::is_none")]
    pub selected_pet: Option<String>,
    pub strength: i64,
    pub exported: ExportedFlags,
}

impl Default for RatesData {
    fn default() -> Self {
        Self {
            version: CURRENT_RATES_VERSION,
            settings: true,
            tool: None,
            community_center: 0,
            selected_pet: None,
            strength: 0,
            exported: ExportedFlags::default(),
        }
    }
}

impl RatesData {
    #[must_use]
    pub fn is_current(&self) -> bool {
        self.version == CURRENT_RATES_VERSION
    }

    /// Keep a current-version snapshot, replace anything else with defaults.
    #[must_use]
    pub fn normalized(self) -> Self {
        if self.is_current() { self } else { Self::default() }
    }
}

/// Result of decoding a persisted snapshot.
#[derive(Debug)]
pub enum Decoded {
    /// The stored JSON matched the snapshot shape. The version is not checked
    /// here; stale versions are reset when the holder is read.
    Snapshot(RatesData),
    /// The JSON carries a different version and no longer fits the shape.
    Stale { version: Option<u64> },
    /// Not JSON, or current version with a broken shape.
    Corrupt(serde_json::Error),
}

/// Decode a raw `ratesData` entry.
#[must_use]
pub fn decode(raw: &str) -> Decoded {
    let value: serde_json::Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => return Decoded::Corrupt(e),
    };
    let version = value.get("v").and_then(serde_json::Value::as_u64);
    match serde_json::from_value::<RatesData>(value) {
        Ok(data) => Decoded::Snapshot(data),
        Err(_) if version != Some(u64::from(CURRENT_RATES_VERSION)) => Decoded::Stale { version },
        Err(e) => Decoded::Corrupt(e),
    }
}
