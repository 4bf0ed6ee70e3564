#![allow(missing_docs)]

//! Registries handing out unique radio frequencies and TACAN channels.

/// Radio frequency pools and registry.
pub mod radio;
/// TACAN channel registry.
pub mod tacan;

pub use radio::{RadioFrequencyRegistry, RadioPool};
pub use tacan::TacanChannelRegistry;
