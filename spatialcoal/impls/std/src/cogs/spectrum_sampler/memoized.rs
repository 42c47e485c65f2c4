use core::fmt;
use std::borrow::Cow;

use rand::Rng;

use spatialcoal_core::{
    cogs::{
        spectrum_sampler::{AcceptAll, Identity},
        SpectrumEditor, SpectrumFilter, SpectrumSampler,
    },
    OccupancySpectrum, SimulationError,
};

use crate::occupancy::OccupancySpectrumCache;

/// Samples spectra from their exact distribution, which is built once per
/// `(k, N)` and then kept in an [`OccupancySpectrumCache`].
#[allow(clippy::module_name_repetitions)]
pub struct MemoizedSpectrumSampler<F = AcceptAll, E = Identity> {
    cache: OccupancySpectrumCache<F, E>,
}

impl<F: SpectrumFilter + Default, E: SpectrumEditor + Default> Default
    for MemoizedSpectrumSampler<F, E>
{
    fn default() -> Self {
        Self::with_cache(OccupancySpectrumCache::default())
    }
}

impl<F: SpectrumFilter, E: SpectrumEditor> MemoizedSpectrumSampler<F, E> {
    #[must_use]
    pub fn new(filter: F, editor: E) -> Self {
        Self::with_cache(OccupancySpectrumCache::new(filter, editor))
    }

    /// Continues sampling with the distributions of an earlier run.
    #[must_use]
    pub fn with_cache(cache: OccupancySpectrumCache<F, E>) -> Self {
        Self { cache }
    }

    #[must_use]
    pub fn cache(&self) -> &OccupancySpectrumCache<F, E> {
        &self.cache
    }

    #[must_use]
    pub fn into_cache(self) -> OccupancySpectrumCache<F, E> {
        self.cache
    }
}

impl<F, E> fmt::Debug for MemoizedSpectrumSampler<F, E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct(stringify!(MemoizedSpectrumSampler))
            .field("cache", &self.cache)
            .finish()
    }
}

impl<F: SpectrumFilter, E: SpectrumEditor> SpectrumSampler for MemoizedSpectrumSampler<F, E> {
    fn sample<G: Rng + ?Sized>(
        &mut self,
        balls: u32,
        urns: u64,
        rng: &mut G,
    ) -> Result<Cow<'_, OccupancySpectrum>, SimulationError> {
        let distribution = self.cache.get_or_build(balls, urns)?;

        Ok(Cow::Borrowed(distribution.sample(rng)))
    }
}
