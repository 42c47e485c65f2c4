use core::fmt;
use std::collections::hash_map::Entry;

use fnv::FnvHashMap;

use spatialcoal_core::{
    cogs::{
        spectrum_sampler::{AcceptAll, Identity},
        SpectrumEditor, SpectrumFilter,
    },
    SimulationError,
};

use super::{LogFactorials, OccupancySpectrumDistribution};

/// Lazily built occupancy spectrum distributions, keyed by `(k, N)`.
#[allow(clippy::module_name_repetitions)]
pub struct OccupancySpectrumCache<F = AcceptAll, E = Identity> {
    filter: F,
    editor: E,
    log_factorials: LogFactorials,
    distributions: FnvHashMap<(u32, u64), OccupancySpectrumDistribution<F, E>>,
}

impl<F: SpectrumFilter + Default, E: SpectrumEditor + Default> Default
    for OccupancySpectrumCache<F, E>
{
    fn default() -> Self {
        Self::new(F::default(), E::default())
    }
}

impl<F: SpectrumFilter, E: SpectrumEditor> OccupancySpectrumCache<F, E> {
    #[must_use]
    pub fn new(filter: F, editor: E) -> Self {
        Self {
            filter,
            editor,
            log_factorials: LogFactorials::new(),
            distributions: FnvHashMap::default(),
        }
    }

    /// Returns the distribution for `balls` balls in `urns` urns, building
    /// it on first use.
    ///
    /// # Errors
    ///
    /// Fails with `EmptySpectrumSupport` if the filter rejects every
    /// spectrum. Failed constructions are not cached.
    pub fn get_or_build(
        &mut self,
        balls: u32,
        urns: u64,
    ) -> Result<&OccupancySpectrumDistribution<F, E>, SimulationError> {
        match self.distributions.entry((balls, urns)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let distribution = OccupancySpectrumDistribution::with_log_factorials(
                    balls,
                    urns,
                    &self.filter,
                    &self.editor,
                    &mut self.log_factorials,
                )?;

                debug!(
                    "Built the occupancy spectrum distribution of k={} balls in N={} urns with {} \
                     spectra.",
                    balls,
                    urns,
                    distribution.support().len()
                );

                Ok(entry.insert(distribution))
            },
        }
    }

    #[must_use]
    pub fn contains(&self, balls: u32, urns: u64) -> bool {
        self.distributions.contains_key(&(balls, urns))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.distributions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.distributions.is_empty()
    }

    pub fn clear(&mut self) {
        self.distributions.clear();
    }
}

impl<F, E> fmt::Debug for OccupancySpectrumCache<F, E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        let mut keys: Vec<&(u32, u64)> = self.distributions.keys().collect();
        keys.sort_unstable();

        fmt.debug_struct(stringify!(OccupancySpectrumCache))
            .field("distributions", &keys)
            .finish()
    }
}
