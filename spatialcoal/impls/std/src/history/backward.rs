use std::collections::BTreeMap;

use rand::Rng;

use spatialcoal_core::Coordinate;
use spatialcoal_core_bond::NonNegativeF64;

use crate::alias::AliasMethodSampler;

/// Samples one of the `origins` proportionally to its flow, or returns
/// `None` if no origin has a positive flow.
pub(super) fn sample_origin<X: Coordinate, G: Rng + ?Sized>(
    origins: &BTreeMap<X, u64>,
    rng: &mut G,
) -> Option<X> {
    let weights: Vec<(&X, NonNegativeF64)> = origins
        .iter()
        .filter(|(_, flux)| **flux > 0)
        .map(|(x, flux)| (x, NonNegativeF64::from(*flux)))
        .collect();

    if weights.is_empty() {
        return None;
    }

    let sampler = AliasMethodSampler::new(weights);

    let origin: &X = sampler.sample_event(rng);

    Some(origin.clone())
}
