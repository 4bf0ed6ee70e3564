//! Per-pass diagnostics collected alongside the log output.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// The thirteen phases of a generation pass, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationPhase {
    /// Beacon and airfield ATC reservations.
    SeedRegistries,
    /// Weather and time of day.
    Environment,
    /// Ground objects and runways.
    GroundObjects,
    /// Wreckage of previously destroyed units.
    DestroyedUnits,
    /// Tankers and AWACS.
    AirSupport,
    /// Per control point flight activity.
    Flights,
    /// Frontline ground conflicts and JTACs.
    FrontlineConflicts,
    /// Combined-arms commander slots.
    CombinedArms,
    /// Mission triggers and forced options.
    Triggers,
    /// Smoke and other visual effects.
    Visuals,
    /// Support scripts.
    Scripts,
    /// Flight radio presets.
    ChannelPresets,
    /// Briefing and kneeboard.
    Briefing,
}

impl GenerationPhase {
    /// Every phase in the order a pass runs them.
    pub const ORDER: [GenerationPhase; 13] = [
        GenerationPhase::SeedRegistries,
        GenerationPhase::Environment,
        GenerationPhase::GroundObjects,
        GenerationPhase::DestroyedUnits,
        GenerationPhase::AirSupport,
        GenerationPhase::Flights,
        GenerationPhase::FrontlineConflicts,
        GenerationPhase::CombinedArms,
        GenerationPhase::Triggers,
        GenerationPhase::Visuals,
        GenerationPhase::Scripts,
        GenerationPhase::ChannelPresets,
        GenerationPhase::Briefing,
    ];
}

impl fmt::Display for GenerationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GenerationPhase::SeedRegistries => "seed registries",
            GenerationPhase::Environment => "environment",
            GenerationPhase::GroundObjects => "ground objects",
            GenerationPhase::DestroyedUnits => "destroyed units",
            GenerationPhase::AirSupport => "air support",
            GenerationPhase::Flights => "flights",
            GenerationPhase::FrontlineConflicts => "frontline conflicts",
            GenerationPhase::CombinedArms => "combined arms",
            GenerationPhase::Triggers => "triggers",
            GenerationPhase::Visuals => "visuals",
            GenerationPhase::Scripts => "scripts",
            GenerationPhase::ChannelPresets => "channel presets",
            GenerationPhase::Briefing => "briefing",
        };
        f.write_str(label)
    }
}

/// How bad a skipped entity is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Degraded but expected, e.g. an aircraft without a channel profile.
    Warning,
    /// Bad data or a logic defect in a caller.
    Error,
}

/// One skipped entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Phase that skipped the entity.
    pub phase: GenerationPhase,
    /// Severity of the problem.
    pub severity: Severity,
    /// Entity identifier (flight name, beacon callsign, ...).
    pub entity: String,
    /// What went wrong.
    pub message: String,
}

/// Everything a pass skipped, plus the phases it completed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationReport {
    completed: Vec<GenerationPhase>,
    diagnostics: Vec<Diagnostic>,
}

impl GenerationReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning and log it.
    pub fn warn(
        &mut self,
        phase: GenerationPhase,
        entity: impl Into<String>,
        message: impl fmt::Display,
    ) {
        let entity = entity.into();
        let message = message.to_string();
        warn!(%phase, entity = %entity, "{message}");
        self.diagnostics.push(Diagnostic {
            phase,
            severity: Severity::Warning,
            entity,
            message,
        });
    }

    /// Record an error and log it.
    pub fn error(
        &mut self,
        phase: GenerationPhase,
        entity: impl Into<String>,
        message: impl fmt::Display,
    ) {
        let entity = entity.into();
        let message = message.to_string();
        error!(%phase, entity = %entity, "{message}");
        self.diagnostics.push(Diagnostic {
            phase,
            severity: Severity::Error,
            entity,
            message,
        });
    }

    pub(crate) fn complete(&mut self, phase: GenerationPhase) {
        self.completed.push(phase);
    }

    /// Phases run to completion, in order.
    pub fn completed_phases(&self) -> &[GenerationPhase] {
        &self.completed
    }

    /// All diagnostics, oldest first.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics recorded during one phase.
    pub fn diagnostics_for(&self, phase: GenerationPhase) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.phase == phase)
    }

    /// Whether nothing was skipped.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}
