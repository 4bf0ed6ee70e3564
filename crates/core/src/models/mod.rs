#![allow(missing_docs)]

//! Shared domain models.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::AllocationError;

/// Highest TACAN channel number in either band.
pub const TACAN_MAX_CHANNEL: u8 = 126;

/// A radio frequency, stored as whole hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RadioFrequency {
    hertz: u64,
}

impl RadioFrequency {
    /// Build a frequency from a raw hertz value.
    pub const fn from_hertz(hertz: u64) -> Self {
        Self { hertz }
    }

    /// Build a frequency from a megahertz and kilohertz part, e.g. `mhz(251, 500)`.
    pub const fn mhz(mhz: u64, khz: u64) -> Self {
        Self::from_hertz(mhz * 1_000_000 + khz * 1_000)
    }

    /// Build a frequency from kilohertz.
    pub const fn khz(khz: u64) -> Self {
        Self::from_hertz(khz * 1_000)
    }

    /// Raw hertz value.
    pub const fn hertz(&self) -> u64 {
        self.hertz
    }

    /// Value in megahertz.
    pub fn as_mhz(&self) -> f64 {
        self.hertz as f64 / 1_000_000.0
    }
}

impl fmt::Display for RadioFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hertz >= 1_000_000 {
            write!(f, "{:.3} MHz", self.as_mhz())
        } else {
            write!(f, "{} kHz", self.hertz / 1_000)
        }
    }
}

/// TACAN band flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TacanBand {
    X,
    Y,
}

impl TacanBand {
    /// All bands in allocation order.
    pub const ALL: [TacanBand; 2] = [TacanBand::X, TacanBand::Y];
}

impl fmt::Display for TacanBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TacanBand::X => f.write_str("X"),
            TacanBand::Y => f.write_str("Y"),
        }
    }
}

/// How a TACAN user employs its channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TacanUsage {
    /// Ground stations and carriers.
    TransmitReceive,
    /// Airborne users such as tankers.
    AirToAir,
}

impl TacanUsage {
    /// Band conventionally used for this kind of station.
    pub fn band(&self) -> TacanBand {
        match self {
            TacanUsage::TransmitReceive => TacanBand::X,
            TacanUsage::AirToAir => TacanBand::Y,
        }
    }
}

/// A TACAN channel number paired with its band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTacanChannel")]
pub struct TacanChannel {
    number: u8,
    band: TacanBand,
}

impl TacanChannel {
    /// Create a channel, rejecting numbers outside 1-126.
    pub fn new(number: u8, band: TacanBand) -> Result<Self, AllocationError> {
        if number == 0 || number > TACAN_MAX_CHANNEL {
            return Err(AllocationError::InvalidTacanChannel(number.into()));
        }
        Ok(Self { number, band })
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn band(&self) -> TacanBand {
        self.band
    }
}

#[derive(Deserialize)]
struct RawTacanChannel {
    number: u8,
    band: TacanBand,
}

impl TryFrom<RawTacanChannel> for TacanChannel {
    type Error = AllocationError;

    fn try_from(raw: RawTacanChannel) -> Result<Self, Self::Error> {
        TacanChannel::new(raw.number, raw.band)
    }
}

impl fmt::Display for TacanChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.band)
    }
}

/// Navigation beacon categories found in terrain data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BeaconType {
    Ndb,
    Vor,
    Dme,
    #[serde(alias = "VORDME")]
    VorDme,
    Tacan,
    Vortac,
    Rsbn,
    IlsLocalizer,
    IlsGlideslope,
    OuterMarker,
    MiddleMarker,
    InnerMarker,
    BroadcastStation,
    /// Any type this crate does not know about.
    #[serde(other)]
    Unknown,
}

/// A navigation beacon declared by a terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beacon {
    pub name: String,
    pub callsign: String,
    pub beacon_type: BeaconType,
    pub hertz: u64,
    #[serde(default)]
    pub channel: Option<u16>,
}

impl Beacon {
    /// Voice/radio frequency of the beacon.
    pub fn frequency(&self) -> RadioFrequency {
        RadioFrequency::from_hertz(self.hertz)
    }

    /// Whether the beacon carries a TACAN component.
    pub fn is_tacan(&self) -> bool {
        matches!(self.beacon_type, BeaconType::Tacan | BeaconType::Vortac)
    }

    /// TACAN channel of the beacon. `None` when it isn't TACAN or has no channel;
    /// an out-of-range channel is an error.
    pub fn tacan_channel(&self) -> Option<Result<TacanChannel, AllocationError>> {
        if !self.is_tacan() {
            return None;
        }
        self.channel.map(|number| {
            let number =
                u8::try_from(number).map_err(|_| AllocationError::InvalidTacanChannel(number))?;
            TacanChannel::new(number, TacanUsage::TransmitReceive.band())
        })
    }
}

/// ATC frequencies of an airfield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtcRadios {
    pub hf: RadioFrequency,
    pub vhf_fm: RadioFrequency,
    pub vhf_am: RadioFrequency,
    pub uhf: RadioFrequency,
}

impl AtcRadios {
    /// Frequencies in reservation order.
    pub fn all(&self) -> [RadioFrequency; 4] {
        [self.hf, self.vhf_fm, self.vhf_am, self.uhf]
    }
}

/// Static data describing one airfield of a terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirfieldData {
    pub name: String,
    #[serde(default)]
    pub atc: Option<AtcRadios>,
    #[serde(default)]
    pub tacan: Option<TacanChannel>,
    #[serde(default)]
    pub tacan_callsign: Option<String>,
    #[serde(default)]
    pub ils: Option<RadioFrequency>,
    #[serde(default)]
    pub runways: Vec<String>,
}

/// Reference data for a single terrain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerrainData {
    pub name: String,
    #[serde(default)]
    pub airfields: Vec<AirfieldData>,
    #[serde(default)]
    pub beacons: Vec<Beacon>,
}

impl TerrainData {
    /// Look up an airfield by name, ignoring case.
    pub fn airfield(&self, name: &str) -> Option<&AirfieldData> {
        self.airfields
            .iter()
            .find(|airfield| airfield.name.eq_ignore_ascii_case(name))
    }
}

/// Side of the conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coalition {
    Blue,
    Red,
}

impl Coalition {
    pub fn opponent(&self) -> Self {
        match self {
            Coalition::Blue => Coalition::Red,
            Coalition::Red => Coalition::Blue,
        }
    }
}

impl fmt::Display for Coalition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coalition::Blue => f.write_str("blue"),
            Coalition::Red => f.write_str("red"),
        }
    }
}

/// Map position in terrain coordinates (metres).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub z: f64,
}

impl Position {
    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.z - other.z).powi(2)).sqrt()
    }
}
