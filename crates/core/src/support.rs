//! Tanker and AWACS roster produced by the air-support phase.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    error::AllocationError,
    models::{RadioFrequency, TacanChannel, TacanUsage},
    registry::{RadioFrequencyRegistry, TacanChannelRegistry},
};

/// A tanker orbiting for the mission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TankerInfo {
    /// Group name in the mission.
    pub group_name: String,
    /// Radio callsign, e.g. `Texaco`.
    pub callsign: String,
    /// Aircraft variant, e.g. `KC-135`.
    pub variant: String,
    /// Boom/basket frequency.
    pub frequency: RadioFrequency,
    /// Air-to-air TACAN channel.
    pub tacan: TacanChannel,
}

/// An AWACS aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwacsInfo {
    /// Group name in the mission.
    pub group_name: String,
    /// Radio callsign, e.g. `Overlord`.
    pub callsign: String,
    /// Control frequency.
    pub frequency: RadioFrequency,
}

/// Roster of air-support units for one mission.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirSupport {
    /// Tankers in generation order.
    pub tankers: Vec<TankerInfo>,
    /// AWACS in generation order.
    pub awacs: Vec<AwacsInfo>,
}

impl AirSupport {
    /// Add a tanker, allocating a UHF frequency and an air-to-air TACAN channel.
    ///
    /// Nothing is added when either allocation fails; a frequency allocated
    /// before a TACAN failure stays reserved.
    pub fn add_tanker(
        &mut self,
        radios: &mut RadioFrequencyRegistry,
        tacans: &mut TacanChannelRegistry,
        callsign: &str,
        variant: &str,
    ) -> Result<&TankerInfo, AllocationError> {
        let frequency = radios.allocate_uhf()?;
        let tacan = tacans.allocate_next(TacanUsage::AirToAir.band())?;
        let index = self.tankers.len() + 1;
        info!(callsign, variant, %frequency, %tacan, "Tanker added");
        self.tankers.push(TankerInfo {
            group_name: format!("Tanker {index} {callsign}"),
            callsign: callsign.to_string(),
            variant: variant.to_string(),
            frequency,
            tacan,
        });
        Ok(&self.tankers[self.tankers.len() - 1])
    }

    /// Add an AWACS with a UHF control frequency.
    pub fn add_awacs(
        &mut self,
        radios: &mut RadioFrequencyRegistry,
        callsign: &str,
    ) -> Result<&AwacsInfo, AllocationError> {
        let frequency = radios.allocate_uhf()?;
        let index = self.awacs.len() + 1;
        info!(callsign, %frequency, "AWACS added");
        self.awacs.push(AwacsInfo {
            group_name: format!("AWACS {index} {callsign}"),
            callsign: callsign.to_string(),
            frequency,
        });
        Ok(&self.awacs[self.awacs.len() - 1])
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.tankers.is_empty() && self.awacs.is_empty()
    }
}
