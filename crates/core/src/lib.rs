#![warn(clippy::all, missing_docs)]

//! Core mission generation logic.
//!
//! This crate hosts the shared-resource registries (radio frequencies and
//! TACAN channels), terrain and aircraft reference data, the phased mission
//! orchestrator and the preset allocator for client flights, together with
//! configuration and output persistence used by the command line frontend.

pub mod beacons;
pub mod config;
pub mod error;
pub mod flight;
pub mod mission;
pub mod models;
pub mod output;
pub mod reference;
pub mod registry;
pub mod report;
pub mod support;

pub use beacons::{seed_registries, BeaconDeduplicator, BeaconReservations};
pub use config::{AppConfig, GenerationSettings};
pub use error::{AllocationError, GenerationError};
pub use flight::{FlightChannelAllocator, FlightData, RunwayData};
pub use mission::{
    Campaign, GeneratedMission, MissionGenerationContext, MissionOrchestrator, MissionResources,
    PhaseGenerators, ScenarioGenerators,
};
pub use models::{RadioFrequency, TacanBand, TacanChannel, TerrainData};
pub use output::{MissionEntry, MissionWriter};
pub use reference::{AircraftCatalog, AircraftDataProvider, TerrainCatalog};
pub use registry::{RadioFrequencyRegistry, TacanChannelRegistry};
pub use report::{GenerationPhase, GenerationReport};
pub use support::AirSupport;
