use std::collections::{BTreeSet, HashMap};

use tracing::debug;

use crate::{
    error::{AllocationError, Resource},
    models::RadioFrequency,
};

/// A bounded, stepped range of assignable frequencies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RadioPool {
    name: &'static str,
    min: RadioFrequency,
    max: RadioFrequency,
    step: u64,
}

impl RadioPool {
    pub const HF: RadioPool = RadioPool::new(
        "HF",
        RadioFrequency::mhz(3, 0),
        RadioFrequency::mhz(29, 975),
        25_000,
    );
    pub const VHF_FM: RadioPool = RadioPool::new(
        "VHF FM",
        RadioFrequency::mhz(30, 0),
        RadioFrequency::mhz(87, 975),
        25_000,
    );
    pub const VHF_AM: RadioPool = RadioPool::new(
        "VHF AM",
        RadioFrequency::mhz(118, 0),
        RadioFrequency::mhz(150, 975),
        25_000,
    );
    pub const UHF: RadioPool = RadioPool::new(
        "UHF",
        RadioFrequency::mhz(225, 0),
        RadioFrequency::mhz(399, 975),
        25_000,
    );

    /// Define a pool. `step` is in hertz and must be non-zero.
    pub const fn new(
        name: &'static str,
        min: RadioFrequency,
        max: RadioFrequency,
        step: u64,
    ) -> Self {
        Self { name, min, max, step }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Number of frequencies in the pool.
    pub fn len(&self) -> u64 {
        if self.max < self.min || self.step == 0 {
            return 0;
        }
        (self.max.hertz() - self.min.hertz()) / self.step + 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Frequency at a position of the pool, lowest first.
    pub fn nth(&self, index: u64) -> Option<RadioFrequency> {
        (index < self.len())
            .then(|| RadioFrequency::from_hertz(self.min.hertz() + index * self.step))
    }

    /// Whether `frequency` is one of the pool's values.
    pub fn contains(&self, frequency: RadioFrequency) -> bool {
        frequency >= self.min
            && frequency <= self.max
            && self.step != 0
            && (frequency.hertz() - self.min.hertz()) % self.step == 0
    }
}

/// Tracks every frequency committed during one generation pass.
#[derive(Debug, Default)]
pub struct RadioFrequencyRegistry {
    reserved: BTreeSet<RadioFrequency>,
    // Every pool value below the cursor is reserved, so scans resume there.
    cursors: HashMap<RadioPool, u64>,
}

impl RadioFrequencyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commit a frequency the caller controls exclusively.
    pub fn reserve(&mut self, frequency: RadioFrequency) -> Result<(), AllocationError> {
        if !self.reserved.insert(frequency) {
            return Err(AllocationError::AlreadyReserved(Resource::Frequency(frequency)));
        }
        debug!(%frequency, "frequency reserved");
        Ok(())
    }

    /// Reserve and return the lowest free frequency of `pool`.
    pub fn allocate_next(&mut self, pool: RadioPool) -> Result<RadioFrequency, AllocationError> {
        let mut index = self.cursors.get(&pool).copied().unwrap_or(0);
        while let Some(candidate) = pool.nth(index) {
            if !self.reserved.contains(&candidate) {
                self.reserved.insert(candidate);
                self.cursors.insert(pool, index + 1);
                debug!(pool = pool.name(), frequency = %candidate, "frequency allocated");
                return Ok(candidate);
            }
            index += 1;
        }
        self.cursors.insert(pool, index);
        Err(AllocationError::PoolExhausted(pool.name().to_string()))
    }

    /// Shorthand for allocating from [`RadioPool::UHF`].
    pub fn allocate_uhf(&mut self) -> Result<RadioFrequency, AllocationError> {
        self.allocate_next(RadioPool::UHF)
    }

    pub fn is_reserved(&self, frequency: RadioFrequency) -> bool {
        self.reserved.contains(&frequency)
    }

    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }

    /// Reserved frequencies in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &RadioFrequency> {
        self.reserved.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TINY: RadioPool =
        RadioPool::new("tiny", RadioFrequency::mhz(250, 0), RadioFrequency::mhz(250, 50), 25_000);

    #[test]
    fn duplicate_reservation_is_rejected_and_leaves_state_alone() {
        let mut registry = RadioFrequencyRegistry::new();
        let frequency = RadioFrequency::mhz(251, 0);
        registry.reserve(frequency).expect("first reservation");

        let err = registry.reserve(frequency).unwrap_err();
        assert_eq!(err, AllocationError::AlreadyReserved(Resource::Frequency(frequency)));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn allocation_skips_reserved_values_and_takes_the_lowest() {
        let mut registry = RadioFrequencyRegistry::new();
        registry.reserve(RadioFrequency::mhz(250, 0)).unwrap();

        assert_eq!(registry.allocate_next(TINY).unwrap(), RadioFrequency::mhz(250, 25));
        assert_eq!(registry.allocate_next(TINY).unwrap(), RadioFrequency::mhz(250, 50));
        assert_eq!(
            registry.allocate_next(TINY).unwrap_err(),
            AllocationError::PoolExhausted("tiny".to_string())
        );
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn reservation_after_allocation_is_respected() {
        let mut registry = RadioFrequencyRegistry::new();
        assert_eq!(registry.allocate_next(TINY).unwrap(), RadioFrequency::mhz(250, 0));
        registry.reserve(RadioFrequency::mhz(250, 25)).unwrap();
        assert_eq!(registry.allocate_next(TINY).unwrap(), RadioFrequency::mhz(250, 50));
        // An allocated value can't be reserved again.
        assert!(registry.reserve(RadioFrequency::mhz(250, 0)).is_err());
    }

    #[test]
    fn allocation_is_deterministic_for_the_same_history() {
        let history = |registry: &mut RadioFrequencyRegistry| {
            registry.reserve(RadioFrequency::mhz(225, 0)).unwrap();
            registry.reserve(RadioFrequency::mhz(225, 50)).unwrap();
            (0..4)
                .map(|_| registry.allocate_uhf().unwrap())
                .collect::<Vec<_>>()
        };

        let first = history(&mut RadioFrequencyRegistry::new());
        let second = history(&mut RadioFrequencyRegistry::new());
        assert_eq!(first, second);
        assert_eq!(first[0], RadioFrequency::mhz(225, 25));
        assert_eq!(first[1], RadioFrequency::mhz(225, 75));
    }

    #[test]
    fn mixed_operations_never_produce_duplicates() {
        let mut registry = RadioFrequencyRegistry::new();
        let mut handed_out = Vec::new();
        for step in 0..200u64 {
            if step % 3 == 0 {
                let frequency = RadioPool::UHF.nth(step * 2).unwrap();
                if registry.reserve(frequency).is_ok() {
                    handed_out.push(frequency);
                }
            } else {
                handed_out.push(registry.allocate_uhf().unwrap());
            }
        }
        let unique: BTreeSet<_> = handed_out.iter().copied().collect();
        assert_eq!(unique.len(), handed_out.len());
        assert_eq!(registry.len(), handed_out.len());
    }

    #[test]
    fn pool_bounds() {
        assert_eq!(RadioPool::UHF.len(), 7000);
        assert!(RadioPool::UHF.contains(RadioFrequency::mhz(251, 0)));
        assert!(!RadioPool::UHF.contains(RadioFrequency::mhz(400, 0)));
        assert!(!RadioPool::VHF_AM.contains(RadioFrequency::from_hertz(127_010_000)));
    }
}
