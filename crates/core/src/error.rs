//! Error types shared by the allocation and generation layers.

use std::{fmt, path::PathBuf};

use thiserror::Error;

use crate::models::{RadioFrequency, TacanChannel};

/// A finite identifier handed out by one of the registries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    /// Radio frequency.
    Frequency(RadioFrequency),
    /// TACAN channel.
    Tacan(TacanChannel),
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Frequency(frequency) => write!(f, "frequency {frequency}"),
            Resource::Tacan(channel) => write!(f, "TACAN channel {channel}"),
        }
    }
}

/// Failures raised by the frequency and TACAN registries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AllocationError {
    /// The value was reserved earlier in the same generation pass.
    #[error("{0} is already reserved")]
    AlreadyReserved(Resource),
    /// Every value of the named pool has been handed out.
    #[error("no free values remain in the {0} pool")]
    PoolExhausted(String),
    /// TACAN channel number outside 1-126.
    #[error("TACAN channel {0} is outside 1-126")]
    InvalidTacanChannel(u16),
}

/// Errors surfaced by a mission generation pass.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// Reference data for an entity is missing or malformed. Never fatal on its own.
    #[error("missing reference data for {entity}: {reason}")]
    MissingReferenceData {
        /// Entity that was skipped.
        entity: String,
        /// Human readable reason.
        reason: String,
    },
    /// A fixed resource file could not be read or parsed. Always fatal.
    #[error("failed to load resource {}: {reason}", path.display())]
    ResourceLoadFailure {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying failure.
        reason: String,
    },
    /// Registry failure bubbling up from a phase.
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    /// A collaborating generator failed.
    #[error("{phase} failed: {reason}")]
    Collaborator {
        /// Phase during which the generator failed.
        phase: String,
        /// Human readable reason.
        reason: String,
    },
}

impl GenerationError {
    /// Shorthand for [`GenerationError::MissingReferenceData`].
    pub fn missing(entity: impl Into<String>, reason: impl Into<String>) -> Self {
        GenerationError::MissingReferenceData {
            entity: entity.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`GenerationError::ResourceLoadFailure`].
    pub fn load_failure(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        GenerationError::ResourceLoadFailure {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error must abort the whole generation pass.
    pub fn is_fatal(&self) -> bool {
        match self {
            GenerationError::ResourceLoadFailure { .. } => true,
            GenerationError::MissingReferenceData { .. } => false,
            GenerationError::Allocation(AllocationError::AlreadyReserved(_)) => false,
            GenerationError::Allocation(_) => true,
            GenerationError::Collaborator { .. } => true,
        }
    }
}
