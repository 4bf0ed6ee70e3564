//! Collaborator hooks the orchestrator calls once per phase.

use super::{ControlPoint, EnvironmentSettings, Frontline, Jtac, MissionGenerationContext};
use crate::{
    error::GenerationError,
    flight::{FlightData, RunwayData},
    support::AirSupport,
};

/// Content generators driven by [`MissionOrchestrator`](super::MissionOrchestrator).
///
/// The orchestrator owns sequencing and shared resources; implementors only
/// produce content. Anything that needs a frequency or TACAN channel takes it
/// from the registries on the context, never from a private pool.
pub trait PhaseGenerators {
    /// Produce fresh weather and time of day. Only called when the campaign
    /// has no stored environment.
    fn generate_environment(
        &mut self,
        ctx: &MissionGenerationContext<'_>,
    ) -> Result<EnvironmentSettings, GenerationError>;

    /// Place ground objects and return the runway records flights depart from.
    fn ground_objects(
        &mut self,
        ctx: &mut MissionGenerationContext<'_>,
    ) -> Result<Vec<RunwayData>, GenerationError>;

    /// Build the tanker and AWACS roster.
    fn air_support(
        &mut self,
        ctx: &mut MissionGenerationContext<'_>,
        awacs_enabled: bool,
    ) -> Result<AirSupport, GenerationError>;

    /// Flights for one control point with a planner.
    fn flights(
        &mut self,
        ctx: &mut MissionGenerationContext<'_>,
        control_point: &ControlPoint,
    ) -> Result<Vec<FlightData>, GenerationError>;

    /// Ground conflict along one frontline. Returns the JTACs it placed.
    fn frontline(
        &mut self,
        _ctx: &mut MissionGenerationContext<'_>,
        _frontline: &Frontline,
    ) -> Result<Vec<Jtac>, GenerationError> {
        Ok(Vec::new())
    }

    /// Mission trigger rules.
    fn triggers(&mut self, _ctx: &mut MissionGenerationContext<'_>) -> Result<(), GenerationError> {
        Ok(())
    }

    /// Options the mission enforces regardless of the base table.
    fn forced_options(
        &mut self,
        _ctx: &mut MissionGenerationContext<'_>,
    ) -> Result<(), GenerationError> {
        Ok(())
    }

    /// Smoke and other visual effects.
    fn visuals(&mut self, _ctx: &mut MissionGenerationContext<'_>) -> Result<(), GenerationError> {
        Ok(())
    }
}
