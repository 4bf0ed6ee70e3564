#![allow(missing_docs)]

//! Briefing text and kneeboard pages.

use serde::{Deserialize, Serialize};

use super::{Campaign, Jtac};
use crate::{flight::FlightData, support::AirSupport};

/// One labelled line of the briefing's frequency table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BriefingFrequency {
    pub label: String,
    pub value: String,
}

/// Briefing shown before the mission starts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Briefing {
    pub title: String,
    pub description: String,
    pub frequencies: Vec<BriefingFrequency>,
}

impl Briefing {
    /// Append a line to the frequency table.
    pub fn append_frequency(&mut self, label: impl Into<String>, value: impl ToString) {
        self.frequencies.push(BriefingFrequency {
            label: label.into(),
            value: value.to_string(),
        });
    }
}

/// A single kneeboard page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KneeboardPage {
    pub title: String,
    pub lines: Vec<String>,
}

/// Collects support units and JTACs, then renders the briefing and kneeboard.
#[derive(Debug, Default)]
pub struct BriefingBuilder {
    briefing: Briefing,
    support_lines: Vec<String>,
    jtac_lines: Vec<String>,
}

impl BriefingBuilder {
    pub fn new(campaign: &Campaign) -> Self {
        let briefing = Briefing {
            title: campaign.name.clone(),
            description: format!(
                "{} versus {} on {}.",
                campaign.player_country, campaign.enemy_country, campaign.terrain
            ),
            frequencies: Vec::new(),
        };
        Self {
            briefing,
            ..Self::default()
        }
    }

    /// Tankers always; AWACS only when enabled.
    pub fn add_air_support(&mut self, support: &AirSupport, awacs_enabled: bool) {
        for tanker in &support.tankers {
            let value = format!("{}/{}", tanker.tacan, tanker.frequency);
            self.support_lines.push(format!(
                "{} ({}): {value}",
                tanker.callsign, tanker.variant
            ));
            self.briefing.append_frequency(
                format!("Tanker {} ({})", tanker.callsign, tanker.variant),
                value,
            );
        }
        if awacs_enabled {
            for awacs in &support.awacs {
                self.support_lines
                    .push(format!("AWACS {}: {}", awacs.callsign, awacs.frequency));
                self.briefing
                    .append_frequency(awacs.callsign.clone(), awacs.frequency);
            }
        }
    }

    pub fn add_jtacs(&mut self, jtacs: &[Jtac]) {
        for jtac in jtacs {
            self.jtac_lines
                .push(format!("{} ({}): code {}", jtac.name, jtac.region, jtac.code));
        }
    }

    /// Finish: the briefing plus shared pages and one page per client flight.
    pub fn build(self, flights: &[FlightData]) -> (Briefing, Vec<KneeboardPage>) {
        let mut pages = Vec::new();
        if !self.support_lines.is_empty() {
            pages.push(KneeboardPage {
                title: "Air support".to_string(),
                lines: self.support_lines,
            });
        }
        if !self.jtac_lines.is_empty() {
            pages.push(KneeboardPage {
                title: "JTAC".to_string(),
                lines: self.jtac_lines,
            });
        }
        pages.extend(
            flights
                .iter()
                .filter(|flight| flight.has_clients())
                .map(flight_page),
        );
        (self.briefing, pages)
    }
}

fn flight_page(flight: &FlightData) -> KneeboardPage {
    let mut lines = Vec::with_capacity(flight.presets().len() + 3);
    lines.push(format!("{} x{}", flight.aircraft_type, flight.size));
    lines.push(format!(
        "Departure: {} rwy {}",
        flight.departure.airfield_name, flight.departure.runway_name
    ));
    if let Some(frequency) = flight.intra_flight_frequency {
        lines.push(format!("Flight: {frequency}"));
    }
    for preset in flight.presets() {
        lines.push(format!(
            "Radio {} ch {}: {} {}",
            preset.radio,
            preset.channel,
            preset.target,
            preset.target.frequency()
        ));
    }
    KneeboardPage {
        title: flight.name.clone(),
        lines,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        flight::{CommunicationTarget, RunwayData},
        models::{RadioFrequency, TacanBand, TacanChannel},
        support::{AwacsInfo, TankerInfo},
    };

    fn support() -> AirSupport {
        AirSupport {
            tankers: vec![TankerInfo {
                group_name: "Tanker 1 Texaco".to_string(),
                callsign: "Texaco".to_string(),
                variant: "KC-135".to_string(),
                frequency: RadioFrequency::mhz(225, 25),
                tacan: TacanChannel::new(1, TacanBand::Y).unwrap(),
            }],
            awacs: vec![AwacsInfo {
                group_name: "AWACS 1 Overlord".to_string(),
                callsign: "Overlord".to_string(),
                frequency: RadioFrequency::mhz(225, 50),
            }],
        }
    }

    fn campaign() -> Campaign {
        serde_json::from_str(
            r#"{ "name": "Op Test", "terrain": "Caucasus", "player_country": "USA", "enemy_country": "Russia" }"#,
        )
        .unwrap()
    }

    #[test]
    fn tanker_lines_carry_tacan_and_frequency() {
        let mut builder = BriefingBuilder::new(&campaign());
        builder.add_air_support(&support(), false);
        let (briefing, pages) = builder.build(&[]);

        assert_eq!(
            briefing.frequencies,
            vec![BriefingFrequency {
                label: "Tanker Texaco (KC-135)".to_string(),
                value: "1Y/225.025 MHz".to_string(),
            }]
        );
        assert_eq!(pages.len(), 1);
    }

    #[test]
    fn awacs_and_jtacs_when_present() {
        let mut builder = BriefingBuilder::new(&campaign());
        builder.add_air_support(&support(), true);
        builder.add_jtacs(&[Jtac {
            region: "Gori".to_string(),
            code: 1688,
            name: "JTAC1".to_string(),
        }]);
        let (briefing, pages) = builder.build(&[]);

        assert_eq!(briefing.frequencies.len(), 2);
        assert_eq!(briefing.frequencies[1].label, "Overlord");
        assert_eq!(pages[1].title, "JTAC");
        assert_eq!(pages[1].lines, vec!["JTAC1 (Gori): code 1688"]);
    }

    #[test]
    fn client_flights_get_a_page_with_presets() {
        let runway = RunwayData {
            airfield_name: "Batumi".to_string(),
            runway_name: "13".to_string(),
            atc: Some(RadioFrequency::mhz(260, 0)),
            tacan: None,
            tacan_callsign: None,
            ils: None,
        };
        let mut client =
            FlightData::new("Enfield 1", "F-16C_50", 2, runway.clone(), runway.clone());
        client.client_slots.push("Enfield 1-1".to_string());
        client.assign_channel(
            1,
            1,
            CommunicationTarget::AirfieldAtc {
                airfield: "Batumi".to_string(),
                frequency: RadioFrequency::mhz(260, 0),
            },
        );
        let ai = FlightData::new("Uzi 1", "F-16C_50", 2, runway.clone(), runway);

        let (_, pages) = BriefingBuilder::new(&campaign()).build(&[client, ai]);

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].title, "Enfield 1");
        assert_eq!(
            pages[0].lines.last().map(String::as_str),
            Some("Radio 1 ch 1: Batumi ATC 260.000 MHz")
        );
    }
}
