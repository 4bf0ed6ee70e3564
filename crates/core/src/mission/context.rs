//! State threaded through every phase of one generation pass.

use serde_json::{Map, Value};

use super::{Campaign, GeneratedMission, Jtac, Mission};
use crate::{
    config::GenerationSettings,
    flight::{FlightData, RunwayData},
    models::{Coalition, TerrainData},
    registry::{RadioFrequencyRegistry, TacanChannelRegistry},
    report::GenerationReport,
    support::AirSupport,
};

/// Mutable state of a single generation pass.
///
/// Created at the start of a pass and consumed at its end; nothing in here
/// outlives the pass. Phases communicate exclusively through these fields.
pub struct MissionGenerationContext<'a> {
    /// Terrain reference data.
    pub terrain: &'a TerrainData,
    /// Campaign being turned into a mission.
    pub campaign: &'a Campaign,
    /// Generation switches.
    pub settings: &'a GenerationSettings,
    /// Frequencies committed so far.
    pub radios: RadioFrequencyRegistry,
    /// TACAN channels committed so far.
    pub tacans: TacanChannelRegistry,
    /// Mission artifact under construction.
    pub mission: Mission,
    /// Runways produced by the ground-object phase.
    pub runways: Vec<RunwayData>,
    /// Tankers and AWACS.
    pub air_support: AirSupport,
    /// Every generated flight.
    pub flights: Vec<FlightData>,
    /// JTACs registered by frontline conflicts.
    pub jtacs: Vec<Jtac>,
    /// Entities skipped along the way.
    pub report: GenerationReport,
}

impl<'a> MissionGenerationContext<'a> {
    /// Fresh context with empty registries and a mission seeded with `options`.
    pub fn new(
        terrain: &'a TerrainData,
        campaign: &'a Campaign,
        settings: &'a GenerationSettings,
        options: Map<String, Value>,
    ) -> Self {
        let mut mission = Mission::new(terrain.name.clone(), options);
        match campaign.player_coalition {
            Coalition::Blue => {
                mission.coalitions.blue.push(campaign.player_country.clone());
                mission.coalitions.red.push(campaign.enemy_country.clone());
            }
            Coalition::Red => {
                mission.coalitions.red.push(campaign.player_country.clone());
                mission.coalitions.blue.push(campaign.enemy_country.clone());
            }
        }

        Self {
            terrain,
            campaign,
            settings,
            radios: RadioFrequencyRegistry::new(),
            tacans: TacanChannelRegistry::new(),
            mission,
            runways: Vec::new(),
            air_support: AirSupport::default(),
            flights: Vec::new(),
            jtacs: Vec::new(),
            report: GenerationReport::new(),
        }
    }

    /// Runway record of an airfield, if the ground-object phase produced one.
    pub fn runway_for(&self, airfield: &str) -> Option<&RunwayData> {
        self.runways
            .iter()
            .find(|runway| runway.airfield_name.eq_ignore_ascii_case(airfield))
    }

    /// End the pass, handing everything it produced to the caller.
    pub fn finish(self) -> GeneratedMission {
        GeneratedMission {
            mission: self.mission,
            flights: self.flights,
            air_support: self.air_support,
            jtacs: self.jtacs,
            report: self.report,
        }
    }
}
