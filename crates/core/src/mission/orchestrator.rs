//! Sequencing of a mission generation pass.
//!
//! One pass runs thirteen phases in a fixed order over a single
//! [`MissionGenerationContext`]. Beacon and ATC reservations happen before any
//! phase allocates, runways exist before flights are planned, and presets are
//! assigned only once the tanker and AWACS roster is final.

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use super::{
    briefing::BriefingBuilder, scripts, Campaign, Jtac, Mission, MissionGenerationContext,
    MissionResources, PhaseGenerators, StaticGroup,
};
use crate::{
    beacons::seed_registries,
    config::GenerationSettings,
    error::GenerationError,
    flight::{FlightChannelAllocator, FlightData},
    models::{Coalition, TerrainData},
    reference::{is_known_unit_type, AircraftDataProvider},
    report::{GenerationPhase, GenerationReport},
    support::AirSupport,
};

/// Everything a successful pass produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedMission {
    /// The mission artifact.
    pub mission: Mission,
    /// Flights with their radio presets.
    pub flights: Vec<FlightData>,
    /// Tankers and AWACS.
    pub air_support: AirSupport,
    /// JTACs placed by frontline conflicts.
    pub jtacs: Vec<Jtac>,
    /// Entities the pass skipped.
    pub report: GenerationReport,
}

/// Drives the phases of a generation pass.
pub struct MissionOrchestrator<'a> {
    terrain: &'a TerrainData,
    aircraft: &'a dyn AircraftDataProvider,
    resources: &'a MissionResources,
    settings: &'a GenerationSettings,
}

impl<'a> MissionOrchestrator<'a> {
    /// Orchestrator over one terrain with fixed reference data and settings.
    pub fn new(
        terrain: &'a TerrainData,
        aircraft: &'a dyn AircraftDataProvider,
        resources: &'a MissionResources,
        settings: &'a GenerationSettings,
    ) -> Self {
        Self {
            terrain,
            aircraft,
            resources,
            settings,
        }
    }

    /// Run a full pass for `campaign`.
    ///
    /// On success the environment used by the pass is stored on the campaign;
    /// on failure the campaign is left untouched.
    pub fn generate(
        &self,
        campaign: &mut Campaign,
        generators: &mut dyn PhaseGenerators,
    ) -> Result<GeneratedMission, GenerationError> {
        info!(
            campaign = %campaign.name,
            terrain = %self.terrain.name,
            "Mission generation started"
        );

        let mut environment = None;
        let generated = {
            let mut ctx = MissionGenerationContext::new(
                self.terrain,
                campaign,
                self.settings,
                self.resources.options.clone(),
            );

            run_phase(&mut ctx, GenerationPhase::SeedRegistries, |ctx| {
                seed_registries(ctx.terrain, &mut ctx.radios, &mut ctx.tacans, &mut ctx.report);
                debug!(
                    frequencies = ctx.radios.len(),
                    tacan = ctx.tacans.len(),
                    "Registries seeded"
                );
                Ok(())
            })?;

            run_phase(&mut ctx, GenerationPhase::Environment, |ctx| {
                let settings = match &ctx.campaign.environment {
                    Some(stored) => {
                        debug!("Reusing stored environment");
                        stored.clone()
                    }
                    None => generators.generate_environment(ctx)?,
                };
                ctx.mission.environment = Some(settings.clone());
                environment = Some(settings);
                Ok(())
            })?;

            run_phase(&mut ctx, GenerationPhase::GroundObjects, |ctx| {
                ctx.runways = generators.ground_objects(ctx)?;
                debug!(runways = ctx.runways.len(), "Runways generated");
                Ok(())
            })?;

            run_phase(&mut ctx, GenerationPhase::DestroyedUnits, |ctx| {
                place_destroyed_units(ctx);
                Ok(())
            })?;

            run_phase(&mut ctx, GenerationPhase::AirSupport, |ctx| {
                ctx.air_support = generators.air_support(ctx, self.settings.awacs_enabled)?;
                Ok(())
            })?;

            run_phase(&mut ctx, GenerationPhase::Flights, |ctx| {
                let campaign = ctx.campaign;
                for control_point in campaign.control_points.iter() {
                    if control_point.planner.is_none() {
                        continue;
                    }
                    match generators.flights(ctx, control_point) {
                        Ok(flights) => ctx.flights.extend(flights),
                        Err(err) => record(
                            &mut ctx.report,
                            GenerationPhase::Flights,
                            &control_point.name,
                            err,
                        ),
                    }
                }
                Ok(())
            })?;

            run_phase(&mut ctx, GenerationPhase::FrontlineConflicts, |ctx| {
                let campaign = ctx.campaign;
                for frontline in &campaign.frontlines {
                    let (Some(player), Some(enemy)) = (
                        campaign.control_point(frontline.player_cp),
                        campaign.control_point(frontline.enemy_cp),
                    ) else {
                        ctx.report.warn(
                            GenerationPhase::FrontlineConflicts,
                            format!("frontline {}-{}", frontline.player_cp, frontline.enemy_cp),
                            "control point not found",
                        );
                        continue;
                    };
                    match generators.frontline(ctx, frontline) {
                        Ok(jtacs) => ctx.jtacs.extend(jtacs),
                        Err(err) => record(
                            &mut ctx.report,
                            GenerationPhase::FrontlineConflicts,
                            &format!("{} - {}", player.name, enemy.name),
                            err,
                        ),
                    }
                }
                Ok(())
            })?;

            run_phase(&mut ctx, GenerationPhase::CombinedArms, |ctx| {
                let slots = ctx.settings.ca_slots;
                let control = &mut ctx.mission.ground_control;
                control.pilot_can_control_vehicles = slots > 0;
                match ctx.campaign.player_coalition {
                    Coalition::Blue => control.blue_tactical_commander = slots,
                    Coalition::Red => control.red_tactical_commander = slots,
                }
                Ok(())
            })?;

            run_phase(&mut ctx, GenerationPhase::Triggers, |ctx| {
                generators.triggers(ctx)?;
                generators.forced_options(ctx)
            })?;

            run_phase(&mut ctx, GenerationPhase::Visuals, |ctx| {
                if ctx.settings.perf_smoke_gen {
                    generators.visuals(ctx)
                } else {
                    debug!("Visual effects disabled");
                    Ok(())
                }
            })?;

            run_phase(&mut ctx, GenerationPhase::Scripts, |ctx| {
                let triggers = scripts::support_triggers(
                    self.resources,
                    &ctx.jtacs,
                    ctx.settings.jtac_smoke_on,
                    &ctx.settings.state_file,
                );
                ctx.mission.triggers.extend(triggers);
                Ok(())
            })?;

            run_phase(&mut ctx, GenerationPhase::ChannelPresets, |ctx| {
                FlightChannelAllocator::new(self.aircraft, self.settings.awacs_enabled).assign_all(
                    &mut ctx.flights,
                    &ctx.air_support,
                    &mut ctx.report,
                );
                Ok(())
            })?;

            run_phase(&mut ctx, GenerationPhase::Briefing, |ctx| {
                let mut builder = BriefingBuilder::new(ctx.campaign);
                builder.add_air_support(&ctx.air_support, self.settings.awacs_enabled);
                builder.add_jtacs(&ctx.jtacs);
                let (briefing, kneeboard) = builder.build(&ctx.flights);
                ctx.mission.briefing = briefing;
                ctx.mission.kneeboard = kneeboard;
                Ok(())
            })?;

            ctx.finish()
        };

        if environment.is_some() {
            campaign.environment = environment;
        }
        info!(
            campaign = %campaign.name,
            flights = generated.flights.len(),
            jtacs = generated.jtacs.len(),
            skipped = generated.report.diagnostics().len(),
            "Mission generation finished"
        );
        Ok(generated)
    }
}

fn run_phase<'c>(
    ctx: &mut MissionGenerationContext<'c>,
    phase: GenerationPhase,
    body: impl FnOnce(&mut MissionGenerationContext<'c>) -> Result<(), GenerationError>,
) -> Result<(), GenerationError> {
    debug!(%phase, "Phase started");
    if let Err(err) = body(ctx) {
        error!(%phase, error = %err, "Phase failed");
        return Err(err);
    }
    ctx.report.complete(phase);
    info!(%phase, "Phase completed");
    Ok(())
}

/// Record a per-entity failure; the loop it came from carries on.
fn record(
    report: &mut GenerationReport,
    phase: GenerationPhase,
    entity: &str,
    err: GenerationError,
) {
    if err.is_fatal() {
        report.error(phase, entity, err);
    } else {
        report.warn(phase, entity, err);
    }
}

/// Wreckage of units destroyed in earlier missions, owned by the player's country.
fn place_destroyed_units(ctx: &mut MissionGenerationContext<'_>) {
    if !ctx.settings.perf_destroyed_units {
        debug!("Destroyed unit overlay disabled");
        return;
    }
    let campaign = ctx.campaign;
    for (index, unit) in campaign.destroyed_units.iter().enumerate() {
        if !is_known_unit_type(&unit.unit_type) {
            ctx.report.warn(
                GenerationPhase::DestroyedUnits,
                unit.unit_type.clone(),
                GenerationError::missing(unit.unit_type.clone(), "unknown unit type"),
            );
            continue;
        }
        if campaign.position_culled(&unit.position) {
            debug!(unit_type = %unit.unit_type, "Destroyed unit outside play area");
            continue;
        }
        ctx.mission.static_groups.push(StaticGroup {
            country: campaign.player_country.clone(),
            name: format!("destroyed_unit_{}", index + 1),
            unit_type: unit.unit_type.clone(),
            position: unit.position,
            heading: unit.orientation,
            hidden: true,
            dead: true,
        });
    }
}
