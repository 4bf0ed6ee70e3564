//! Pre-reservation of terrain beacons and airfield ATC frequencies.
//!
//! Terrains list the same frequency or TACAN channel on physically distinct
//! beacons, so the list is reduced to unique values before anything is
//! reserved. All of this must happen before any phase allocates from the
//! registries.

use std::collections::BTreeSet;

use tracing::info;

use crate::{
    error::GenerationError,
    models::{Beacon, BeaconType, RadioFrequency, TacanChannel, TerrainData},
    registry::{RadioFrequencyRegistry, TacanChannelRegistry},
    report::{GenerationPhase, GenerationReport},
};

/// Unique values extracted from a beacon list.
#[derive(Debug, Default)]
pub struct BeaconReservations {
    /// Distinct frequencies across all beacons.
    pub frequencies: BTreeSet<RadioFrequency>,
    /// Distinct valid TACAN channels.
    pub tacan_channels: BTreeSet<TacanChannel>,
    /// Beacons that were malformed, with the reason.
    pub rejected: Vec<GenerationError>,
}

/// Reduces a terrain's beacons to the values that must be pre-reserved.
pub struct BeaconDeduplicator;

impl BeaconDeduplicator {
    /// Collect distinct frequencies and TACAN channels.
    ///
    /// A beacon of unknown type is rejected outright. A TACAN beacon without a
    /// usable channel is rejected for TACAN purposes only; its frequency is
    /// still collected.
    pub fn deduplicate(beacons: &[Beacon]) -> BeaconReservations {
        let mut reservations = BeaconReservations::default();
        for beacon in beacons {
            if beacon.beacon_type == BeaconType::Unknown {
                reservations.rejected.push(GenerationError::missing(
                    format!("beacon {}", beacon.callsign),
                    "unknown beacon type",
                ));
                continue;
            }
            reservations.frequencies.insert(beacon.frequency());
            if !beacon.is_tacan() {
                continue;
            }
            match beacon.tacan_channel() {
                Some(Ok(channel)) => {
                    reservations.tacan_channels.insert(channel);
                }
                Some(Err(err)) => reservations.rejected.push(GenerationError::missing(
                    format!("TACAN beacon {}", beacon.callsign),
                    err.to_string(),
                )),
                None => reservations.rejected.push(GenerationError::missing(
                    format!("TACAN beacon {}", beacon.callsign),
                    "TACAN beacon has no channel",
                )),
            }
        }
        reservations
    }
}

/// Reserve every beacon value, then every airfield ATC frequency of the terrain.
///
/// Airfield ILS and TACAN values are already part of the beacon list.
pub fn seed_registries(
    terrain: &TerrainData,
    radios: &mut RadioFrequencyRegistry,
    tacans: &mut TacanChannelRegistry,
    report: &mut GenerationReport,
) {
    let phase = GenerationPhase::SeedRegistries;
    let reservations = BeaconDeduplicator::deduplicate(&terrain.beacons);
    for rejected in &reservations.rejected {
        report.error(phase, "beacon", rejected);
    }

    for channel in &reservations.tacan_channels {
        if let Err(err) = tacans.reserve(*channel) {
            report.error(phase, format!("TACAN {channel}"), err);
        }
    }
    for frequency in &reservations.frequencies {
        if let Err(err) = radios.reserve(*frequency) {
            report.error(phase, format!("beacon {frequency}"), err);
        }
    }

    for airfield in &terrain.airfields {
        let Some(atc) = airfield.atc else {
            continue;
        };
        for frequency in atc.all() {
            if let Err(err) = radios.reserve(frequency) {
                report.error(phase, format!("{} ATC", airfield.name), err);
            }
        }
    }

    info!(
        terrain = %terrain.name,
        frequencies = radios.len(),
        tacan_channels = tacans.len(),
        "registries seeded"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AirfieldData, AtcRadios, TacanBand};

    fn beacon(callsign: &str, beacon_type: BeaconType, hertz: u64, channel: Option<u16>) -> Beacon {
        Beacon {
            name: callsign.to_string(),
            callsign: callsign.to_string(),
            beacon_type,
            hertz,
            channel,
        }
    }

    fn terrain(beacons: Vec<Beacon>, airfields: Vec<AirfieldData>) -> TerrainData {
        TerrainData {
            name: "Test".to_string(),
            airfields,
            beacons,
        }
    }

    #[test]
    fn shared_frequency_is_reserved_once() {
        let beacons = vec![
            beacon("AA", BeaconType::Ndb, 430_000, None),
            beacon("AB", BeaconType::Ndb, 430_000, None),
        ];
        let reservations = BeaconDeduplicator::deduplicate(&beacons);
        assert_eq!(reservations.frequencies.len(), 1);

        let mut radios = RadioFrequencyRegistry::new();
        let mut tacans = TacanChannelRegistry::new();
        let mut report = GenerationReport::new();
        seed_registries(&terrain(beacons, Vec::new()), &mut radios, &mut tacans, &mut report);

        assert_eq!(radios.len(), 1);
        assert!(radios.is_reserved(RadioFrequency::khz(430)));
        assert!(report.is_clean());
    }

    #[test]
    fn tacan_without_channel_still_reserves_frequency() {
        let beacons = vec![
            beacon("BTM", BeaconType::Tacan, 1_000_000_000, None),
            beacon("KBL", BeaconType::Vortac, 113_500_000, Some(67)),
        ];
        let mut radios = RadioFrequencyRegistry::new();
        let mut tacans = TacanChannelRegistry::new();
        let mut report = GenerationReport::new();
        seed_registries(&terrain(beacons, Vec::new()), &mut radios, &mut tacans, &mut report);

        assert!(radios.is_reserved(RadioFrequency::from_hertz(1_000_000_000)));
        assert!(radios.is_reserved(RadioFrequency::from_hertz(113_500_000)));
        assert_eq!(tacans.len(), 1);
        assert!(tacans.is_reserved(TacanChannel::new(67, TacanBand::X).unwrap()));

        let diagnostics = report.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert!(diagnostics[0].message.contains("BTM"));
    }

    #[test]
    fn shared_tacan_channel_is_reserved_once() {
        let beacons = vec![
            beacon("VAZ", BeaconType::Tacan, 1_000_000_000, Some(22)),
            beacon("VAS", BeaconType::Vortac, 114_300_000, Some(22)),
        ];
        let reservations = BeaconDeduplicator::deduplicate(&beacons);
        assert_eq!(reservations.tacan_channels.len(), 1);
        assert!(reservations.rejected.is_empty());
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let beacons = vec![beacon("BAD", BeaconType::Tacan, 1_000_000_000, Some(200))];
        let reservations = BeaconDeduplicator::deduplicate(&beacons);
        assert!(reservations.tacan_channels.is_empty());
        assert_eq!(reservations.rejected.len(), 1);
        assert_eq!(reservations.frequencies.len(), 1);
    }

    #[test]
    fn airfield_atc_is_reserved_after_beacons() {
        let atc = AtcRadios {
            hf: RadioFrequency::mhz(4, 50),
            vhf_fm: RadioFrequency::mhz(38, 400),
            vhf_am: RadioFrequency::mhz(133, 0),
            uhf: RadioFrequency::mhz(250, 0),
        };
        let airfields = vec![
            AirfieldData {
                name: "Batumi".to_string(),
                atc: Some(atc),
                tacan: None,
                tacan_callsign: None,
                ils: None,
                runways: vec!["13".to_string()],
            },
            AirfieldData {
                name: "Unmanned".to_string(),
                atc: None,
                tacan: None,
                tacan_callsign: None,
                ils: None,
                runways: Vec::new(),
            },
        ];
        // The beacon collides with Batumi's VHF AM frequency.
        let beacons = vec![beacon("BT", BeaconType::Ndb, 133_000_000, None)];
        let mut radios = RadioFrequencyRegistry::new();
        let mut tacans = TacanChannelRegistry::new();
        let mut report = GenerationReport::new();
        seed_registries(&terrain(beacons, airfields), &mut radios, &mut tacans, &mut report);

        assert_eq!(radios.len(), 4);
        for frequency in atc.all() {
            assert!(radios.is_reserved(frequency));
        }
        assert_eq!(report.diagnostics().len(), 1);
        assert_eq!(report.diagnostics()[0].entity, "Batumi ATC");
    }

    #[test]
    fn malformed_beacon_is_skipped_alongside_good_ones() -> anyhow::Result<()> {
        let terrain: TerrainData = serde_json::from_str(
            r#"{
                "name": "Test",
                "beacons": [
                    { "name": "Kutaisi", "callsign": "KT", "beacon_type": "NDB", "hertz": 477000 },
                    { "name": "Wide", "callsign": "WD", "beacon_type": "TACAN", "hertz": 1000000000, "channel": 300 },
                    { "name": "Mystery", "callsign": "MYS", "beacon_type": "LORAN", "hertz": 100000 }
                ]
            }"#,
        )?;
        let mut radios = RadioFrequencyRegistry::new();
        let mut tacans = TacanChannelRegistry::new();
        let mut report = GenerationReport::new();
        seed_registries(&terrain, &mut radios, &mut tacans, &mut report);

        assert!(radios.is_reserved(RadioFrequency::khz(477)));
        assert!(radios.is_reserved(RadioFrequency::from_hertz(1_000_000_000)));
        assert!(!radios.is_reserved(RadioFrequency::khz(100)));
        assert!(tacans.is_empty());

        let diagnostics = report.diagnostics();
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().any(|d| d.message.contains("WD")));
        assert!(diagnostics.iter().any(|d| d.message.contains("MYS")));
        Ok(())
    }
}
