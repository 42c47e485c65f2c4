use core::{fmt, marker::PhantomData};

use rand::Rng;

use spatialcoal_core::{
    cogs::{
        spectrum_sampler::{AcceptAll, Identity},
        SpectrumEditor, SpectrumFilter,
    },
    OccupancySpectrum, SimulationError,
};
use spatialcoal_core_bond::NonNegativeF64;

use crate::alias::AliasMethodSampler;

use super::{generate, probability, LogFactorials};

/// Probability distribution over the occupancy spectra of `k` balls in `N`
/// urns that pass the filter `F`, stored after the edit `E`.
#[allow(clippy::module_name_repetitions)]
pub struct OccupancySpectrumDistribution<F = AcceptAll, E = Identity> {
    balls: u32,
    urns: u64,
    weights: Vec<f64>,
    sampler: AliasMethodSampler<OccupancySpectrum>,
    marker: PhantomData<fn(F, E)>,
}

impl<F: SpectrumFilter, E: SpectrumEditor> OccupancySpectrumDistribution<F, E> {
    /// # Errors
    ///
    /// Fails with `EmptySpectrumSupport` if `filter` rejects every spectrum.
    pub fn new(balls: u32, urns: u64, filter: &F, editor: &E) -> Result<Self, SimulationError> {
        Self::with_log_factorials(balls, urns, filter, editor, &mut LogFactorials::new())
    }

    /// Like [`Self::new`], but reuses an existing table of log factorials.
    ///
    /// # Errors
    ///
    /// Fails with `EmptySpectrumSupport` if `filter` rejects every spectrum.
    pub fn with_log_factorials(
        balls: u32,
        urns: u64,
        filter: &F,
        editor: &E,
        log_factorials: &mut LogFactorials,
    ) -> Result<Self, SimulationError> {
        let mut support = Vec::new();
        let mut weights = Vec::new();

        generate(balls, urns, |occupancy| {
            let p = probability(balls, urns, &occupancy, log_factorials);

            if filter.accept(p) {
                support.push(editor.edit(OccupancySpectrum::new(balls, urns, occupancy)));
                weights.push(p);
            }
        });

        if support.is_empty() || weights.iter().all(|p| *p <= 0.0_f64) {
            return Err(SimulationError::EmptySpectrumSupport { balls, urns });
        }

        let sampler = AliasMethodSampler::new(
            support
                .into_iter()
                .zip(weights.iter())
                .map(|(spectrum, p)| {
                    (
                        spectrum,
                        NonNegativeF64::new(*p).unwrap_or_else(|_| NonNegativeF64::zero()),
                    )
                })
                .collect(),
        );

        Ok(Self {
            balls,
            urns,
            weights,
            sampler,
            marker: PhantomData::<fn(F, E)>,
        })
    }
}

impl<F, E> OccupancySpectrumDistribution<F, E> {
    /// Number of balls `k`.
    #[must_use]
    pub fn k(&self) -> u32 {
        self.balls
    }

    /// Number of urns `N`.
    #[must_use]
    pub fn n(&self) -> u64 {
        self.urns
    }

    #[must_use]
    pub fn support(&self) -> &[OccupancySpectrum] {
        self.sampler.events()
    }

    /// Exact probabilities of the spectra in [`Self::support`]. They only sum
    /// up to one if no spectrum was filtered out.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn sample<G: Rng + ?Sized>(&self, rng: &mut G) -> &OccupancySpectrum {
        self.sampler.sample_event(rng)
    }
}

impl<F, E> fmt::Debug for OccupancySpectrumDistribution<F, E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        fmt.debug_struct(stringify!(OccupancySpectrumDistribution))
            .field("k", &self.balls)
            .field("N", &self.urns)
            .field("support", &self.support().len())
            .finish()
    }
}

impl<F, E> fmt::Display for OccupancySpectrumDistribution<F, E> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        for (spectrum, p) in self.support().iter().zip(self.weights.iter()) {
            writeln!(fmt, "P( {} ) = {}", spectrum, p)?;
        }

        Ok(())
    }
}
