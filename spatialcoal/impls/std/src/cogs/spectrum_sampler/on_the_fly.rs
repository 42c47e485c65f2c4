use std::borrow::Cow;

use fnv::FnvHashMap;
use rand::Rng;

use spatialcoal_core::{cogs::SpectrumSampler, OccupancySpectrum, SimulationError};

/// Samples spectra by throwing every ball into a uniformly chosen urn.
///
/// No probabilities are computed and nothing is cached, which suits large
/// `k` whose exact distribution has too large a support.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Default, Clone, Copy)]
pub struct OnTheFlySpectrumSampler;

impl SpectrumSampler for OnTheFlySpectrumSampler {
    fn sample<G: Rng + ?Sized>(
        &mut self,
        balls: u32,
        urns: u64,
        rng: &mut G,
    ) -> Result<Cow<'_, OccupancySpectrum>, SimulationError> {
        if urns == 0 && balls > 0 {
            return Err(SimulationError::EmptySpectrumSupport { balls, urns });
        }

        let mut balls_per_urn: FnvHashMap<u64, usize> = FnvHashMap::default();

        for _ in 0..balls {
            *balls_per_urn.entry(rng.gen_range(0..urns)).or_insert(0) += 1;
        }

        let mut occupancy = vec![0_u64; balls as usize + 1];

        for count in balls_per_urn.values() {
            occupancy[*count] += 1;
        }

        occupancy[0] = urns - (balls_per_urn.len() as u64);

        Ok(Cow::Owned(OccupancySpectrum::new(balls, urns, occupancy)))
    }
}
