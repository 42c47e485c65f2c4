use rand::Rng;

use spatialcoal_core::{
    cogs::{DispersalPolicy, GrowthProcess, MemoryPolicy, Merger},
    Coordinate, Generation, SimulationError,
};

use crate::{forest::Forest, history::History};

#[cfg(test)]
mod tests;

/// Outcome of coalescing a sample along the simulated history.
#[derive(Debug)]
pub enum Coalescence<X: Coordinate, T> {
    /// All lineages merged into a single tree.
    MostRecentCommonAncestor {
        position: X,
        generation: Generation,
        tree: T,
    },
    /// Generation 0 was reached before all lineages merged.
    Unresolved {
        generation: Generation,
        forest: Forest<X, T>,
    },
}

/// Couples the forward simulation of the demographic history with the
/// backward coalescence of sampled lineages along it.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct ForwardBackwardSimulator<X: Coordinate, M: MemoryPolicy> {
    history: History<X, M>,
}

impl<X: Coordinate, M: MemoryPolicy> ForwardBackwardSimulator<X, M> {
    /// # Errors
    ///
    /// Fails if the history cannot be started, see [`History::new`].
    pub fn new(
        memory: &M,
        x0: X,
        n0: u64,
        nb_generations: Generation,
    ) -> Result<Self, SimulationError> {
        Ok(Self {
            history: History::new(memory, x0, n0, nb_generations)?,
        })
    }

    /// # Errors
    ///
    /// Fails if the forward simulation fails, see
    /// [`History::simulate_forward`].
    pub fn simulate_forward<G, P, D>(
        &mut self,
        growth: P,
        dispersal: D,
        rng: &mut G,
    ) -> Result<(), SimulationError>
    where
        G: Rng + ?Sized,
        P: GrowthProcess<X, G>,
        D: DispersalPolicy<X, G>,
    {
        self.history.simulate_forward(growth, dispersal, rng)
    }

    #[must_use]
    pub fn history(&self) -> &History<X, M> {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History<X, M> {
        &mut self.history
    }

    /// # Errors
    ///
    /// Fails if no size was recorded for `x` in generation `t`.
    pub fn pop_size(&mut self, x: &X, t: Generation) -> Result<u64, SimulationError> {
        self.history.pop_size(x, t)
    }

    /// # Errors
    ///
    /// Fails if the population sizes cannot be paged in.
    pub fn distribution_area(&mut self, t: Generation) -> Result<Vec<X>, SimulationError> {
        self.history.distribution_area(t)
    }

    /// Coalesces the trees of `forest`, sampled in generation
    /// `sampling_time`, backwards in time along the simulated history.
    ///
    /// In every generation the trees that share a deme are merged by
    /// `merger`, where each parent is created by `make_tree(x, t)` and
    /// receives its children through `combine`. The remaining trees then
    /// migrate to the deme they descend from.
    ///
    /// # Errors
    ///
    /// Before anything is merged, fails with
    /// - `EmptySample` if `forest` has no tree,
    /// - `SingletonSample` if `forest` only has one tree,
    /// - `InsufficientPopulation` if more trees were sampled in a deme than
    ///   individuals lived there in generation `sampling_time`.
    ///
    /// Afterwards, fails if the history does not define a population size
    /// or flow that the lineages reach, or if `merger` fails.
    pub fn coalesce_along_spatial_history<T, R, I, C, G>(
        &mut self,
        mut forest: Forest<X, T>,
        sampling_time: Generation,
        merger: &mut R,
        mut make_tree: I,
        mut combine: C,
        rng: &mut G,
    ) -> Result<Coalescence<X, T>, SimulationError>
    where
        R: Merger,
        I: FnMut(&X, Generation) -> T,
        C: FnMut(T, T) -> T,
        G: Rng + ?Sized,
    {
        self.check_sample(&forest, sampling_time)?;

        let mut t = sampling_time;

        loop {
            let positions: Vec<X> = forest.positions().cloned().collect();

            for x in positions {
                if forest.nb_trees_at(&x) < 2 {
                    continue;
                }

                let population_size = self.history.pop_size(&x, t)?;

                let mut trees = forest.erase(&x);
                let lineages = trees.len();

                let remaining = merger.merge(
                    &mut trees,
                    population_size,
                    || make_tree(&x, t),
                    &mut combine,
                    rng,
                )?;

                if remaining < lineages {
                    trace!(
                        "Merged {} lineages into {} at {:?} in generation {}.",
                        lineages,
                        remaining,
                        x,
                        t
                    );
                }

                forest.insert_all(x, trees);
            }

            forest = match forest.into_single_tree() {
                Ok((position, tree)) => {
                    info!(
                        "Found the most recent common ancestor at {:?} in generation {}.",
                        position, t
                    );

                    return Ok(Coalescence::MostRecentCommonAncestor {
                        position,
                        generation: t,
                        tree,
                    });
                },
                Err(forest) => forest,
            };

            if t == 0 {
                info!(
                    "Reached generation 0 with {} unmerged lineages.",
                    forest.nb_trees()
                );

                return Ok(Coalescence::Unresolved {
                    generation: t,
                    forest,
                });
            }

            let mut ancestors = Forest::new();

            for (x, tree) in forest.into_trees() {
                let origin = self.history.backward_kernel(&x, t, rng)?;

                ancestors.insert(origin, tree);
            }

            forest = ancestors;
            t -= 1;
        }
    }

    /// Plants one tree per sampled gene copy with `make_tree` and coalesces
    /// them, see [`Self::coalesce_along_spatial_history`].
    ///
    /// # Errors
    ///
    /// Fails if the coalescence fails.
    pub fn make_forest_and_coalesce<S, T, R, I, C, G>(
        &mut self,
        sample: S,
        sampling_time: Generation,
        merger: &mut R,
        mut make_tree: I,
        combine: C,
        rng: &mut G,
    ) -> Result<Coalescence<X, T>, SimulationError>
    where
        S: IntoIterator<Item = (X, usize)>,
        R: Merger,
        I: FnMut(&X, Generation) -> T,
        C: FnMut(T, T) -> T,
        G: Rng + ?Sized,
    {
        let forest = Forest::from_sample(sample, sampling_time, &mut make_tree);

        self.coalesce_along_spatial_history(forest, sampling_time, merger, make_tree, combine, rng)
    }

    fn check_sample<T>(
        &mut self,
        forest: &Forest<X, T>,
        sampling_time: Generation,
    ) -> Result<(), SimulationError> {
        match forest.nb_trees() {
            0 => return Err(SimulationError::EmptySample),
            1 => return Err(SimulationError::SingletonSample),
            _ => (),
        }

        for x in forest.positions() {
            let sampled = forest.nb_trees_at(x);

            let recorded = match self.history.pop_size(x, sampling_time) {
                Ok(size) => size,
                Err(SimulationError::UndefinedPopulation { .. }) => 0,
                Err(err) => return Err(err),
            };

            if recorded < (sampled as u64) {
                return Err(SimulationError::InsufficientPopulation {
                    position: format!("{:?}", x),
                    generation: sampling_time,
                    recorded,
                    sampled,
                });
            }
        }

        Ok(())
    }
}
