//! Phase generators driven entirely by the campaign file.

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde_json::Value;
use tracing::debug;

use super::{
    ControlPoint, EnvironmentSettings, Frontline, Jtac, MissionGenerationContext, PhaseGenerators,
    Trigger, TriggerAction, TriggerKind, VisualEffect, Weather,
};
use crate::{
    error::GenerationError,
    flight::{FlightData, RunwayData},
    models::Position,
    report::GenerationPhase,
    support::AirSupport,
};

/// First laser code handed to frontline JTACs.
pub const FIRST_LASER_CODE: u16 = 1688;

/// Generates mission content straight from campaign data.
#[derive(Debug, Default)]
pub struct ScenarioGenerators;

impl ScenarioGenerators {
    /// Create the generators.
    pub fn new() -> Self {
        Self
    }
}

/// Runway record for a named airfield: the one ground objects produced, or
/// one built straight from terrain data.
fn resolve_runway(ctx: &MissionGenerationContext<'_>, airfield: &str) -> Option<RunwayData> {
    if let Some(runway) = ctx.runway_for(airfield) {
        return Some(runway.clone());
    }
    let data = ctx.terrain.airfield(airfield)?;
    let runway = data.runways.first().map(String::as_str).unwrap_or("00");
    Some(RunwayData::for_airfield(data, runway))
}

fn midpoint(a: &Position, b: &Position) -> Position {
    Position {
        x: (a.x + b.x) / 2.0,
        z: (a.z + b.z) / 2.0,
    }
}

impl PhaseGenerators for ScenarioGenerators {
    fn generate_environment(
        &mut self,
        ctx: &MissionGenerationContext<'_>,
    ) -> Result<EnvironmentSettings, GenerationError> {
        let mut rng = StdRng::seed_from_u64(ctx.campaign.seed);
        let weather = match rng.gen_range(0..100) {
            0..=49 => Weather::Clear,
            50..=79 => Weather::Clouds,
            80..=94 => Weather::Rain,
            _ => Weather::Thunderstorm,
        };
        let wind_speed = match weather {
            Weather::Clear | Weather::Clouds => rng.gen_range(0.0..8.0),
            Weather::Rain | Weather::Thunderstorm => rng.gen_range(5.0..15.0),
        };
        let environment = EnvironmentSettings {
            start_time: ctx.campaign.start_time,
            weather,
            wind_speed: (wind_speed * 10.0_f64).round() / 10.0,
            wind_direction: rng.gen_range(0..360),
            temperature: f64::from(rng.gen_range(8..=30_i32)),
        };
        debug!(weather = ?environment.weather, seed = ctx.campaign.seed, "Environment generated");
        Ok(environment)
    }

    fn ground_objects(
        &mut self,
        ctx: &mut MissionGenerationContext<'_>,
    ) -> Result<Vec<RunwayData>, GenerationError> {
        let (campaign, terrain) = (ctx.campaign, ctx.terrain);
        let mut runways = Vec::new();
        for control_point in &campaign.control_points {
            let Some(name) = control_point.airfield.as_deref() else {
                continue;
            };
            let Some(airfield) = terrain.airfield(name) else {
                ctx.report.warn(
                    GenerationPhase::GroundObjects,
                    control_point.name.clone(),
                    GenerationError::missing(name, "airfield not found on terrain"),
                );
                continue;
            };
            let runway = airfield.runways.first().map(String::as_str).unwrap_or("00");
            runways.push(RunwayData::for_airfield(airfield, runway));
        }
        Ok(runways)
    }

    fn air_support(
        &mut self,
        ctx: &mut MissionGenerationContext<'_>,
        awacs_enabled: bool,
    ) -> Result<AirSupport, GenerationError> {
        let request = &ctx.campaign.air_support;
        let mut support = AirSupport::default();
        for tanker in &request.tankers {
            let added = support.add_tanker(
                &mut ctx.radios,
                &mut ctx.tacans,
                &tanker.callsign,
                &tanker.variant,
            );
            if let Err(err) = added {
                ctx.report
                    .warn(GenerationPhase::AirSupport, tanker.callsign.clone(), err);
            }
        }
        if awacs_enabled {
            for callsign in &request.awacs {
                if let Err(err) = support.add_awacs(&mut ctx.radios, callsign) {
                    ctx.report
                        .warn(GenerationPhase::AirSupport, callsign.clone(), err);
                }
            }
        }
        Ok(support)
    }

    fn flights(
        &mut self,
        ctx: &mut MissionGenerationContext<'_>,
        control_point: &ControlPoint,
    ) -> Result<Vec<FlightData>, GenerationError> {
        let Some(planner) = &control_point.planner else {
            return Ok(Vec::new());
        };
        let departure = match control_point.airfield.as_deref() {
            Some(airfield) => resolve_runway(ctx, airfield),
            None => None,
        }
        .ok_or_else(|| {
            GenerationError::missing(control_point.name.clone(), "no runway to depart from")
        })?;

        let mut flights = Vec::with_capacity(planner.flights.len());
        for planned in &planner.flights {
            let intra_flight_frequency = match ctx.radios.allocate_uhf() {
                Ok(frequency) => frequency,
                Err(err) => {
                    ctx.report.error(GenerationPhase::Flights, planned.name.clone(), err);
                    continue;
                }
            };
            let arrival = match planned.arrival.as_deref() {
                Some(name) => match resolve_runway(ctx, name) {
                    Some(runway) => runway,
                    None => {
                        ctx.report.warn(
                            GenerationPhase::Flights,
                            planned.name.clone(),
                            format!("unknown arrival {name}, returning to departure"),
                        );
                        departure.clone()
                    }
                },
                None => departure.clone(),
            };
            let mut flight = FlightData::new(
                planned.name.clone(),
                planned.aircraft_type.clone(),
                planned.size,
                departure.clone(),
                arrival,
            );
            flight.client_slots = planned.client_slots.clone();
            if let Some(name) = planned.divert.as_deref() {
                flight.divert = resolve_runway(ctx, name);
            }
            flight.intra_flight_frequency = Some(intra_flight_frequency);
            flights.push(flight);
        }
        Ok(flights)
    }

    fn frontline(
        &mut self,
        ctx: &mut MissionGenerationContext<'_>,
        frontline: &Frontline,
    ) -> Result<Vec<Jtac>, GenerationError> {
        let campaign = ctx.campaign;
        let name_of = |id: u32| {
            campaign
                .control_point(id)
                .map(|cp| cp.name.clone())
                .ok_or_else(|| GenerationError::missing(format!("control point {id}"), "not found"))
        };
        let region = format!(
            "{} - {}",
            name_of(frontline.player_cp)?,
            name_of(frontline.enemy_cp)?
        );
        let index = ctx.jtacs.len();
        let offset = u16::try_from(index).unwrap_or(u16::MAX - FIRST_LASER_CODE);
        Ok(vec![Jtac {
            region,
            code: FIRST_LASER_CODE.saturating_add(offset),
            name: format!("JTAC{}", index + 1),
        }])
    }

    fn triggers(&mut self, ctx: &mut MissionGenerationContext<'_>) -> Result<(), GenerationError> {
        ctx.mission.triggers.push(Trigger {
            comment: "Campaign start message".to_string(),
            kind: TriggerKind::MissionStart,
            actions: vec![TriggerAction::Message {
                coalition: ctx.campaign.player_coalition,
                text: ctx.campaign.name.clone(),
            }],
        });
        Ok(())
    }

    fn forced_options(
        &mut self,
        ctx: &mut MissionGenerationContext<'_>,
    ) -> Result<(), GenerationError> {
        let options = &mut ctx.mission.options;
        options.insert("accidental_failures".to_string(), Value::Bool(false));
        options.insert("civTraffic".to_string(), Value::String(String::new()));
        Ok(())
    }

    fn visuals(&mut self, ctx: &mut MissionGenerationContext<'_>) -> Result<(), GenerationError> {
        let campaign = ctx.campaign;
        for frontline in &campaign.frontlines {
            let (Some(player), Some(enemy)) = (
                campaign.control_point(frontline.player_cp),
                campaign.control_point(frontline.enemy_cp),
            ) else {
                continue;
            };
            ctx.mission.effects.push(VisualEffect {
                kind: "big_smoke".to_string(),
                position: midpoint(&player.position, &enemy.position),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        config::GenerationSettings,
        mission::{
            orchestrator::tests::{campaign, resources, terrain},
            MissionOrchestrator, MissionResources,
        },
        models::RadioFrequency,
        reference::AircraftCatalog,
        registry::RadioPool,
    };

    #[test]
    fn environment_depends_only_on_the_seed() {
        let terrain = terrain();
        let campaign = campaign();
        let settings = GenerationSettings::default();
        let ctx = MissionGenerationContext::new(&terrain, &campaign, &settings, Default::default());

        let first = ScenarioGenerators::new().generate_environment(&ctx).unwrap();
        let second = ScenarioGenerators::new().generate_environment(&ctx).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.start_time, campaign.start_time);
        assert!(first.wind_direction < 360);
    }

    #[test]
    fn full_pass_from_campaign_data() {
        let terrain = terrain();
        let resources = resources();
        let settings = GenerationSettings::default();
        let mut campaign = campaign();
        let orchestrator =
            MissionOrchestrator::new(&terrain, AircraftCatalog::builtin(), &resources, &settings);

        let generated = orchestrator
            .generate(&mut campaign, &mut ScenarioGenerators::new())
            .unwrap();

        assert!(campaign.environment.is_some());
        assert_eq!(generated.flights.len(), 1);
        let enfield = &generated.flights[0];
        assert_eq!(enfield.departure.airfield_name, "Batumi");
        assert_eq!(enfield.intra_flight_frequency, Some(RadioFrequency::mhz(225, 75)));
        assert_eq!(enfield.presets()[0].target.to_string(), "Batumi ATC");

        assert_eq!(
            generated.jtacs,
            vec![Jtac {
                region: "Batumi - Gori".to_string(),
                code: FIRST_LASER_CODE,
                name: "JTAC1".to_string(),
            }]
        );
        assert_eq!(generated.mission.effects.len(), 1);
        assert_eq!(generated.mission.effects[0].position.x, 5000.0);
        assert_eq!(
            generated.mission.options.get("accidental_failures"),
            Some(&Value::Bool(false))
        );
        assert_eq!(generated.mission.options.get("labels"), Some(&Value::from(2)));
    }

    #[test]
    fn unknown_airfield_is_reported_not_fatal() {
        let terrain = terrain();
        let mut campaign = campaign();
        campaign.control_points[0].airfield = Some("Atlantis".to_string());
        let settings = GenerationSettings::default();
        let mut ctx =
            MissionGenerationContext::new(&terrain, &campaign, &settings, Default::default());

        let runways = ScenarioGenerators::new().ground_objects(&mut ctx).unwrap();

        assert!(runways.is_empty());
        assert_eq!(
            ctx.report
                .diagnostics_for(GenerationPhase::GroundObjects)
                .count(),
            1
        );
    }

    #[test]
    fn exhausted_uhf_skips_only_the_flight_that_ran_out() {
        let terrain = terrain();
        let mut campaign = campaign();
        let planner = campaign.control_points[0]
            .planner
            .as_mut()
            .expect("fixture has a planner");
        let mut second = planner.flights[0].clone();
        second.name = "Enfield 2".to_string();
        planner.flights.push(second);
        let settings = GenerationSettings::default();
        let mut ctx =
            MissionGenerationContext::new(&terrain, &campaign, &settings, Default::default());
        let mut generators = ScenarioGenerators::new();
        ctx.runways = generators.ground_objects(&mut ctx).unwrap();

        let pool = RadioPool::UHF;
        let last = pool.nth(pool.len() - 1).unwrap();
        for index in 0..pool.len() - 1 {
            ctx.radios.reserve(pool.nth(index).unwrap()).unwrap();
        }

        let flights = generators
            .flights(&mut ctx, &campaign.control_points[0])
            .unwrap();

        assert_eq!(flights.len(), 1);
        assert_eq!(flights[0].name, "Enfield 1");
        assert_eq!(flights[0].intra_flight_frequency, Some(last));
        let skipped: Vec<_> = ctx.report.diagnostics_for(GenerationPhase::Flights).collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].entity, "Enfield 2");
    }

    #[test]
    fn bundled_resources_generate_the_demo_campaign() -> anyhow::Result<()> {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../..");
        let resources_root = root.join("resources");
        let resources = MissionResources::load(&resources_root)?;
        let mut campaign = crate::mission::Campaign::load(root.join("demos/campaign.json"))?;
        let terrain =
            crate::reference::TerrainCatalog::new(&resources_root).terrain(&campaign.terrain)?;
        let settings = GenerationSettings::default();
        let orchestrator =
            MissionOrchestrator::new(&terrain, AircraftCatalog::builtin(), &resources, &settings);

        let generated = orchestrator.generate(&mut campaign, &mut ScenarioGenerators::new())?;

        let seeding: Vec<_> = generated
            .report
            .diagnostics_for(GenerationPhase::SeedRegistries)
            .collect();
        assert_eq!(seeding.len(), 1);
        assert!(seeding[0].message.contains("GA"));

        assert_eq!(generated.flights.len(), 3);
        let enfield = &generated.flights[0];
        let targets: Vec<_> = enfield
            .presets()
            .iter()
            .map(|preset| preset.target.to_string())
            .collect();
        assert_eq!(
            targets,
            vec![
                "Batumi ATC",
                "AWACS Overlord",
                "Kobuleti ATC",
                "Tanker Texaco (1Y)",
                "Tanker Arco (2Y)",
                "Senaki-Kolkhi ATC (divert)",
            ]
        );
        assert!(generated.flights[1].presets().is_empty());
        assert_eq!(generated.mission.static_groups.len(), 2);
        assert_eq!(generated.mission.triggers.len(), 4);
        Ok(())
    }
}
