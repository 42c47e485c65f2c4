use rand::Rng;

use crate::error::SimulationError;

/// Coalesces co-located lineages during one generation.
pub trait Merger: core::fmt::Debug {
    /// Merges some of the `nodes` in place, given a population of
    /// `population_size` potential parents.
    ///
    /// Every parent is created by `init` and each child is attached with
    /// `combine(parent, child)`. The merged parents replace their children in
    /// `nodes`, which is truncated to the new number of lineages. That number
    /// is also returned.
    ///
    /// # Errors
    ///
    /// Fails if fewer than two `nodes` are given, if `population_size` is
    /// zero, or if the merger cannot sample a merger event.
    fn merge<T, I, C, G>(
        &mut self,
        nodes: &mut Vec<T>,
        population_size: u64,
        init: I,
        combine: C,
        rng: &mut G,
    ) -> Result<usize, SimulationError>
    where
        I: FnMut() -> T,
        C: FnMut(T, T) -> T,
        G: Rng + ?Sized;
}

/// Checks the preconditions shared by all mergers.
///
/// # Errors
///
/// Fails with `InsufficientLineages` or `NonPositivePopulation`.
pub fn check_merge_preconditions(
    lineages: usize,
    population_size: u64,
) -> Result<(), SimulationError> {
    if lineages < 2 {
        return Err(SimulationError::InsufficientLineages { lineages });
    }

    if population_size == 0 {
        return Err(SimulationError::NonPositivePopulation {
            size: population_size,
        });
    }

    Ok(())
}
