use std::collections::BTreeMap;

use spatialcoal_core::{
    cogs::{DispersalPolicy, MassKernel},
    Coordinate, Generation,
};

/// The individuals leaving a deme are split over its arrival space
/// according to the kernel weights, without sampling.
///
/// Each destination receives `ceil(weight * individuals)` migrants, so the
/// number of arrivals can exceed the number of departures.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub struct MassBasedDispersal<K> {
    kernel: K,
}

impl<K> MassBasedDispersal<K> {
    #[must_use]
    pub fn new(kernel: K) -> Self {
        Self { kernel }
    }
}

impl<X: Coordinate, G: ?Sized, K: MassKernel<X>> DispersalPolicy<X, G> for MassBasedDispersal<K> {
    fn disperse(
        &mut self,
        _rng: &mut G,
        from: &X,
        _t: Generation,
        individuals: u64,
        arrivals: &mut BTreeMap<X, u64>,
    ) {
        for to in self.kernel.arrival_space(from) {
            #[allow(clippy::cast_precision_loss)]
            let expected = self.kernel.weight(from, &to).get() * (individuals as f64);

            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let migrants = expected.ceil() as u64;

            if migrants > 0 {
                *arrivals.entry(to).or_insert(0) += migrants;
            }
        }
    }
}
