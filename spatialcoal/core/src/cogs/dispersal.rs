use std::collections::BTreeMap;

use spatialcoal_core_bond::ClosedUnitF64;

use crate::landscape::{Coordinate, Generation};

/// Number of individuals that leave deme `x` in generation `t`.
pub trait GrowthProcess<X: Coordinate, G: ?Sized> {
    /// `size` is the current population size `N(x, t)`.
    #[must_use]
    fn offspring(&mut self, rng: &mut G, x: &X, t: Generation, size: u64) -> u64;
}

impl<X: Coordinate, G: ?Sized, F: FnMut(&mut G, &X, Generation, u64) -> u64> GrowthProcess<X, G>
    for F
{
    fn offspring(&mut self, rng: &mut G, x: &X, t: Generation, size: u64) -> u64 {
        self(rng, x, t, size)
    }
}

/// Samples the destination of a single individual leaving `x` at `t`.
#[allow(clippy::module_name_repetitions)]
pub trait DispersalKernel<X: Coordinate, G: ?Sized> {
    #[must_use]
    fn sample_destination(&mut self, rng: &mut G, x: &X, t: Generation) -> X;
}

impl<X: Coordinate, G: ?Sized, F: FnMut(&mut G, &X, Generation) -> X> DispersalKernel<X, G>
    for F
{
    fn sample_destination(&mut self, rng: &mut G, x: &X, t: Generation) -> X {
        self(rng, x, t)
    }
}

/// Transition probabilities of a population that disperses as a divisible
/// mass.
pub trait MassKernel<X: Coordinate> {
    /// Demes that can be reached from `x`.
    #[must_use]
    fn arrival_space(&self, x: &X) -> Vec<X>;

    /// Fraction of the individuals leaving `from` that settle in `to`.
    #[must_use]
    fn weight(&self, from: &X, to: &X) -> ClosedUnitF64;
}

/// Distributes the individuals leaving a deme over their destinations.
#[allow(clippy::module_name_repetitions)]
pub trait DispersalPolicy<X: Coordinate, G: ?Sized> {
    /// Accumulates the number of migrants per destination into `arrivals`.
    fn disperse(
        &mut self,
        rng: &mut G,
        from: &X,
        t: Generation,
        individuals: u64,
        arrivals: &mut BTreeMap<X, u64>,
    );
}
