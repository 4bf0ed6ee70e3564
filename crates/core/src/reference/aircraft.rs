use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Radio layout of an aircraft type as far as preset assignment cares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AircraftChannelProfile {
    /// Radio used to talk to ATC, AWACS and tankers.
    pub inter_flight_radio_index: u8,
    /// Radio used within the flight. Channel 1 of it is reserved for the flight frequency.
    pub intra_flight_radio_index: u8,
    /// Number of selectable presets per radio index.
    pub presets: BTreeMap<u8, u8>,
}

impl AircraftChannelProfile {
    /// Build a profile from `(radio index, preset count)` pairs.
    pub fn new(inter: u8, intra: u8, presets: &[(u8, u8)]) -> Self {
        Self {
            inter_flight_radio_index: inter,
            intra_flight_radio_index: intra,
            presets: presets.iter().copied().collect(),
        }
    }

    /// Preset count of a radio, zero when the aircraft has no such radio.
    pub fn channel_count(&self, radio_index: u8) -> u8 {
        self.presets.get(&radio_index).copied().unwrap_or(0)
    }

    /// Whether intra- and inter-flight communication share one preset list.
    pub fn shares_radio(&self) -> bool {
        self.inter_flight_radio_index == self.intra_flight_radio_index
    }
}

/// Source of per-aircraft channel profiles.
pub trait AircraftDataProvider {
    /// Profile for an aircraft type identifier, if known.
    fn channel_profile(&self, aircraft_type: &str) -> Option<&AircraftChannelProfile>;
}

/// Channel profiles keyed by aircraft type identifier.
#[derive(Debug, Clone, Default)]
pub struct AircraftCatalog {
    profiles: HashMap<String, AircraftChannelProfile>,
}

static BUILTIN: Lazy<AircraftCatalog> = Lazy::new(|| {
    let profiles = [
        ("A-10C", AircraftChannelProfile::new(2, 3, &[(1, 20), (2, 20), (3, 20)])),
        ("A-10C_2", AircraftChannelProfile::new(2, 3, &[(1, 20), (2, 20), (3, 20)])),
        ("AJS37", AircraftChannelProfile::new(1, 1, &[(1, 3)])),
        ("AV8BNA", AircraftChannelProfile::new(1, 1, &[(1, 26), (2, 26)])),
        ("F-14B", AircraftChannelProfile::new(1, 2, &[(1, 20), (2, 30)])),
        ("F-16C_50", AircraftChannelProfile::new(1, 2, &[(1, 20), (2, 20)])),
        ("FA-18C_hornet", AircraftChannelProfile::new(1, 2, &[(1, 20), (2, 20)])),
        ("JF-17", AircraftChannelProfile::new(1, 1, &[(1, 30)])),
        ("Ka-50", AircraftChannelProfile::new(1, 1, &[(1, 4), (2, 10)])),
        ("M-2000C", AircraftChannelProfile::new(1, 2, &[(1, 20), (2, 20)])),
        ("MiG-21Bis", AircraftChannelProfile::new(1, 1, &[(1, 20)])),
        ("P-51D", AircraftChannelProfile::new(1, 1, &[(1, 4)])),
        ("SA342M", AircraftChannelProfile::new(1, 1, &[(1, 8)])),
        ("Su-25T", AircraftChannelProfile::new(1, 1, &[(1, 20)])),
        ("UH-1H", AircraftChannelProfile::new(1, 2, &[(1, 20), (2, 20)])),
    ];
    AircraftCatalog {
        profiles: profiles
            .into_iter()
            .map(|(id, profile)| (id.to_string(), profile))
            .collect(),
    }
});

impl AircraftCatalog {
    /// Process-wide table of the supported player aircraft.
    pub fn builtin() -> &'static AircraftCatalog {
        &BUILTIN
    }

    /// Built-in profiles overlaid with the entries of a JSON file
    /// (`{"<aircraft id>": {profile}}`).
    pub fn with_overrides(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let overrides: HashMap<String, AircraftChannelProfile> = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        let mut catalog = Self::builtin().clone();
        catalog.profiles.extend(overrides);
        Ok(catalog)
    }

    /// Number of known aircraft types.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Add or replace one profile.
    pub fn insert(&mut self, aircraft_type: impl Into<String>, profile: AircraftChannelProfile) {
        self.profiles.insert(aircraft_type.into(), profile);
    }
}

impl AircraftDataProvider for AircraftCatalog {
    fn channel_profile(&self, aircraft_type: &str) -> Option<&AircraftChannelProfile> {
        self.profiles.get(aircraft_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builtin_profiles_are_consistent() {
        let catalog = AircraftCatalog::builtin();
        let harrier = catalog.channel_profile("AV8BNA").expect("harrier profile");
        assert!(harrier.shares_radio());
        assert_eq!(harrier.channel_count(harrier.inter_flight_radio_index), 26);
        assert!(catalog.channel_profile("B-52H").is_none());
    }

    #[test]
    fn overrides_replace_builtin_entries() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("aircraft.json");
        fs::write(
            &path,
            r#"{
                "AJS37": { "inter_flight_radio_index": 1, "intra_flight_radio_index": 2, "presets": { "1": 5, "2": 5 } },
                "Mirage-F1CE": { "inter_flight_radio_index": 1, "intra_flight_radio_index": 1, "presets": { "1": 20 } }
            }"#,
        )?;

        let catalog = AircraftCatalog::with_overrides(&path)?;
        assert_eq!(catalog.len(), AircraftCatalog::builtin().len() + 1);
        let viggen = catalog.channel_profile("AJS37").expect("override present");
        assert!(!viggen.shares_radio());
        assert_eq!(viggen.channel_count(1), 5);
        assert_eq!(catalog.channel_profile("Mirage-F1CE").map(|p| p.channel_count(1)), Some(20));
        Ok(())
    }
}
