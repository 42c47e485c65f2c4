use std::collections::BTreeMap;

use spatialcoal_core::{
    cogs::{DispersalKernel, DispersalPolicy},
    Coordinate, Generation,
};

/// Every individual samples its own destination from the kernel.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone)]
pub struct IndividualBasedDispersal<K> {
    kernel: K,
}

impl<K> IndividualBasedDispersal<K> {
    #[must_use]
    pub fn new(kernel: K) -> Self {
        Self { kernel }
    }
}

impl<X: Coordinate, G: ?Sized, K: DispersalKernel<X, G>> DispersalPolicy<X, G>
    for IndividualBasedDispersal<K>
{
    fn disperse(
        &mut self,
        rng: &mut G,
        from: &X,
        t: Generation,
        individuals: u64,
        arrivals: &mut BTreeMap<X, u64>,
    ) {
        for _ in 0..individuals {
            let to = self.kernel.sample_destination(rng, from, t);

            *arrivals.entry(to).or_insert(0) += 1;
        }
    }
}
