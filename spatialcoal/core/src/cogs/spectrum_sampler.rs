use std::borrow::Cow;

use rand::Rng;

use crate::{error::SimulationError, spectrum::OccupancySpectrum};

/// Draws the occupancy spectrum of a simultaneous multiple merger.
#[allow(clippy::module_name_repetitions)]
pub trait SpectrumSampler: core::fmt::Debug {
    /// Samples how `balls` lineages are distributed among `urns` parents.
    ///
    /// # Errors
    ///
    /// Fails if no spectrum can be drawn for `(balls, urns)`.
    fn sample<G: Rng + ?Sized>(
        &mut self,
        balls: u32,
        urns: u64,
        rng: &mut G,
    ) -> Result<Cow<'_, OccupancySpectrum>, SimulationError>;
}

/// Decides, from its exact probability, whether a spectrum is kept in the
/// support of a distribution.
#[allow(clippy::module_name_repetitions)]
pub trait SpectrumFilter {
    #[must_use]
    fn accept(&self, probability: f64) -> bool;
}

impl<F: Fn(f64) -> bool> SpectrumFilter for F {
    fn accept(&self, probability: f64) -> bool {
        self(probability)
    }
}

/// Keeps every spectrum.
#[derive(Debug, Default, Clone, Copy)]
pub struct AcceptAll;

impl SpectrumFilter for AcceptAll {
    fn accept(&self, _probability: f64) -> bool {
        true
    }
}

/// Transforms a retained spectrum before it is stored.
#[allow(clippy::module_name_repetitions)]
pub trait SpectrumEditor {
    #[must_use]
    fn edit(&self, spectrum: OccupancySpectrum) -> OccupancySpectrum;
}

/// Stores spectra as generated.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl SpectrumEditor for Identity {
    fn edit(&self, spectrum: OccupancySpectrum) -> OccupancySpectrum {
        spectrum
    }
}

/// Drops the trailing empty occupancy numbers, which shortens later
/// iterations over large spectra.
#[derive(Debug, Default, Clone, Copy)]
pub struct TruncateTail;

impl SpectrumEditor for TruncateTail {
    fn edit(&self, spectrum: OccupancySpectrum) -> OccupancySpectrum {
        spectrum.truncate_tail()
    }
}
