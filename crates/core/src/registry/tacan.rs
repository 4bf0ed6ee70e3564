use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::{
    error::{AllocationError, Resource},
    models::{TacanBand, TacanChannel, TACAN_MAX_CHANNEL},
};

/// Tracks every TACAN channel committed during one generation pass.
#[derive(Debug, Default)]
pub struct TacanChannelRegistry {
    reserved: BTreeSet<TacanChannel>,
    cursors: HashMap<TacanBand, u8>,
}

impl TacanChannelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a channel the caller controls exclusively.
    pub fn reserve(&mut self, channel: TacanChannel) -> Result<(), AllocationError> {
        if !self.reserved.insert(channel) {
            return Err(AllocationError::AlreadyReserved(Resource::Tacan(channel)));
        }
        debug!(%channel, "TACAN channel reserved");
        Ok(())
    }

    /// Reserve and return the lowest free channel of `band`.
    pub fn allocate_next(&mut self, band: TacanBand) -> Result<TacanChannel, AllocationError> {
        let start = self.cursors.get(&band).copied().unwrap_or(1);
        for number in start..=TACAN_MAX_CHANNEL {
            let candidate = TacanChannel::new(number, band)?;
            if self.reserved.insert(candidate) {
                self.cursors.insert(band, number + 1);
                debug!(channel = %candidate, "TACAN channel allocated");
                return Ok(candidate);
            }
        }
        self.cursors.insert(band, TACAN_MAX_CHANNEL + 1);
        Err(AllocationError::PoolExhausted(format!("TACAN {band}")))
    }

    pub fn is_reserved(&self, channel: TacanChannel) -> bool {
        self.reserved.contains(&channel)
    }

    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }

    /// Reserved channels ordered by number, then band.
    pub fn iter(&self) -> impl Iterator<Item = &TacanChannel> {
        self.reserved.iter()
    }
}
