#![allow(missing_docs)]

//! Flights and the radio presets assigned to them.

pub mod channels;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{AirfieldData, RadioFrequency, TacanChannel};

pub use channels::FlightChannelAllocator;

/// Airfield and runway a flight departs from or lands at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunwayData {
    pub airfield_name: String,
    pub runway_name: String,
    /// Tower frequency the flight talks to; the airfield's UHF ATC.
    pub atc: Option<RadioFrequency>,
    pub tacan: Option<TacanChannel>,
    pub tacan_callsign: Option<String>,
    pub ils: Option<RadioFrequency>,
}

impl RunwayData {
    pub fn for_airfield(airfield: &AirfieldData, runway_name: &str) -> Self {
        Self {
            airfield_name: airfield.name.clone(),
            runway_name: runway_name.to_string(),
            atc: airfield.atc.map(|atc| atc.uhf),
            tacan: airfield.tacan,
            tacan_callsign: airfield.tacan_callsign.clone(),
            ils: airfield.ils,
        }
    }

    /// Whether both runways belong to the same airfield (and thus the same tower).
    pub fn same_airfield(&self, other: &RunwayData) -> bool {
        self.airfield_name == other.airfield_name
    }
}

/// Something a flight needs a radio preset for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommunicationTarget {
    AirfieldAtc {
        airfield: String,
        frequency: RadioFrequency,
    },
    Awacs {
        callsign: String,
        frequency: RadioFrequency,
    },
    Tanker {
        callsign: String,
        frequency: RadioFrequency,
        tacan: Option<TacanChannel>,
    },
    DivertAtc {
        airfield: String,
        frequency: RadioFrequency,
    },
}

impl CommunicationTarget {
    pub fn frequency(&self) -> RadioFrequency {
        match self {
            CommunicationTarget::AirfieldAtc { frequency, .. }
            | CommunicationTarget::Awacs { frequency, .. }
            | CommunicationTarget::Tanker { frequency, .. }
            | CommunicationTarget::DivertAtc { frequency, .. } => *frequency,
        }
    }
}

impl fmt::Display for CommunicationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommunicationTarget::AirfieldAtc { airfield, .. } => write!(f, "{airfield} ATC"),
            CommunicationTarget::Awacs { callsign, .. } => write!(f, "AWACS {callsign}"),
            CommunicationTarget::Tanker { callsign, tacan, .. } => match tacan {
                Some(tacan) => write!(f, "Tanker {callsign} ({tacan})"),
                None => write!(f, "Tanker {callsign}"),
            },
            CommunicationTarget::DivertAtc { airfield, .. } => write!(f, "{airfield} ATC (divert)"),
        }
    }
}

/// One programmed preset: radio, channel number and what it points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelPreset {
    pub radio: u8,
    pub channel: u8,
    pub target: CommunicationTarget,
}

/// A generated flight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightData {
    pub name: String,
    pub aircraft_type: String,
    pub size: u8,
    /// Slots reserved for human players.
    #[serde(default)]
    pub client_slots: Vec<String>,
    pub departure: RunwayData,
    pub arrival: RunwayData,
    #[serde(default)]
    pub divert: Option<RunwayData>,
    /// Flight frequency, programmed on channel 1 of the intra-flight radio.
    #[serde(default)]
    pub intra_flight_frequency: Option<RadioFrequency>,
    #[serde(default)]
    presets: Vec<ChannelPreset>,
}

impl FlightData {
    pub fn new(
        name: impl Into<String>,
        aircraft_type: impl Into<String>,
        size: u8,
        departure: RunwayData,
        arrival: RunwayData,
    ) -> Self {
        Self {
            name: name.into(),
            aircraft_type: aircraft_type.into(),
            size,
            client_slots: Vec::new(),
            departure,
            arrival,
            divert: None,
            intra_flight_frequency: None,
            presets: Vec::new(),
        }
    }

    /// Whether any slot of the flight is player controlled.
    pub fn has_clients(&self) -> bool {
        !self.client_slots.is_empty()
    }

    /// Presets in assignment order.
    pub fn presets(&self) -> &[ChannelPreset] {
        &self.presets
    }

    /// Preset programmed on a radio channel.
    pub fn channel(&self, radio: u8, channel: u8) -> Option<&CommunicationTarget> {
        self.presets
            .iter()
            .find(|preset| preset.radio == radio && preset.channel == channel)
            .map(|preset| &preset.target)
    }

    pub(crate) fn assign_channel(&mut self, radio: u8, channel: u8, target: CommunicationTarget) {
        self.presets
            .retain(|preset| !(preset.radio == radio && preset.channel == channel));
        self.presets.push(ChannelPreset {
            radio,
            channel,
            target,
        });
    }
}
