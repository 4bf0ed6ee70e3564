//! Preset assignment for client flights.
//!
//! Aircraft expose anywhere from a handful to a few dozen presets, so targets
//! are handed channels in descending importance until the presets run out.
//! Departure ATC always owns the first free channel, even when the airfield has
//! no ATC to program into it; anything that doesn't fit afterwards is simply
//! left off the radio.

use tracing::{debug, info, warn};

use super::{CommunicationTarget, FlightData};
use crate::{
    error::GenerationError,
    reference::AircraftDataProvider,
    report::{GenerationPhase, GenerationReport},
    support::AirSupport,
};

/// Bounded run of channel numbers handed out in ascending order.
#[derive(Debug, Clone, Copy)]
struct ChannelSlots {
    next: u8,
    last: u8,
}

impl ChannelSlots {
    fn new(first: u8, last: u8) -> Self {
        Self { next: first, last }
    }

    fn take(&mut self) -> Option<u8> {
        if self.next == 0 || self.next > self.last {
            return None;
        }
        let channel = self.next;
        self.next = self.next.checked_add(1).unwrap_or(0);
        Some(channel)
    }
}

/// Maps ATC, AWACS, tanker and divert frequencies onto flight presets.
pub struct FlightChannelAllocator<'a> {
    aircraft: &'a dyn AircraftDataProvider,
    awacs_enabled: bool,
}

impl<'a> FlightChannelAllocator<'a> {
    pub fn new(aircraft: &'a dyn AircraftDataProvider, awacs_enabled: bool) -> Self {
        Self {
            aircraft,
            awacs_enabled,
        }
    }

    /// Assign presets to every flight with a client slot. Flights without a
    /// channel profile are reported and left untouched.
    pub fn assign_all(
        &self,
        flights: &mut [FlightData],
        support: &AirSupport,
        report: &mut GenerationReport,
    ) {
        for flight in flights.iter_mut().filter(|flight| flight.has_clients()) {
            match self.assign(flight, support) {
                Ok(assigned) => {
                    info!(flight = %flight.name, assigned, "Channel presets assigned")
                }
                Err(err) => report.warn(GenerationPhase::ChannelPresets, flight.name.clone(), err),
            }
        }
    }

    /// Assign presets to one flight, returning how many were programmed.
    pub fn assign(
        &self,
        flight: &mut FlightData,
        support: &AirSupport,
    ) -> Result<usize, GenerationError> {
        let profile = self
            .aircraft
            .channel_profile(&flight.aircraft_type)
            .ok_or_else(|| {
                GenerationError::missing(
                    flight.aircraft_type.clone(),
                    format!("no aircraft data for {}", flight.aircraft_type),
                )
            })?;

        let radio = profile.inter_flight_radio_index;
        // Channel 1 of a shared radio already carries the flight frequency.
        let first_channel = if profile.shares_radio() { 2 } else { 1 };
        let mut slots = ChannelSlots::new(first_channel, profile.channel_count(radio));

        let mut assigned = 0;
        let Some(departure_channel) = slots.take() else {
            return Ok(assigned);
        };
        match flight.departure.atc {
            Some(frequency) => {
                let target = CommunicationTarget::AirfieldAtc {
                    airfield: flight.departure.airfield_name.clone(),
                    frequency,
                };
                flight.assign_channel(radio, departure_channel, target);
                assigned += 1;
            }
            None => warn!(
                flight = %flight.name,
                airfield = %flight.departure.airfield_name,
                channel = departure_channel,
                "Departure has no ATC, leaving its channel empty"
            ),
        }

        for target in self.candidates(flight, support) {
            let Some(channel) = slots.take() else {
                debug!(flight = %flight.name, %target, "No preset left");
                break;
            };
            flight.assign_channel(radio, channel, target);
            assigned += 1;
        }
        Ok(assigned)
    }

    /// Targets after departure, in priority order. Airfields without ATC data are left out.
    fn candidates(&self, flight: &FlightData, support: &AirSupport) -> Vec<CommunicationTarget> {
        let mut targets = Vec::new();

        if self.awacs_enabled {
            targets.extend(support.awacs.iter().map(|awacs| CommunicationTarget::Awacs {
                callsign: awacs.callsign.clone(),
                frequency: awacs.frequency,
            }));
        }

        if !flight.arrival.same_airfield(&flight.departure) {
            if let Some(frequency) = flight.arrival.atc {
                targets.push(CommunicationTarget::AirfieldAtc {
                    airfield: flight.arrival.airfield_name.clone(),
                    frequency,
                });
            }
        }

        targets.extend(support.tankers.iter().map(|tanker| CommunicationTarget::Tanker {
            callsign: tanker.callsign.clone(),
            frequency: tanker.frequency,
            tacan: Some(tanker.tacan),
        }));

        if let Some(divert) = &flight.divert {
            if let Some(frequency) = divert.atc {
                targets.push(CommunicationTarget::DivertAtc {
                    airfield: divert.airfield_name.clone(),
                    frequency,
                });
            }
        }

        targets
    }
}
