use std::collections::BTreeMap;

use rand::Rng;

use spatialcoal_core::{
    cogs::{DispersalPolicy, FlowStore, GrowthProcess, MemoryPolicy, PopulationSizeStore},
    Coordinate, Generation, SimulationError,
};

mod backward;

#[cfg(test)]
mod tests;

/// Demographic history of a population that expands from a single deme:
/// the population sizes `N(x, t)` and the migration flows between demes.
///
/// The flow `x -> y` of generation `t` counts the individuals that leave `x`
/// in generation `t` and settle in `y`, where they are counted in
/// `N(y, t + 1)`.
pub struct History<X: Coordinate, M: MemoryPolicy> {
    sizes: M::PopulationSizes<X>,
    flows: M::Flows<X>,
    nb_generations: Generation,
    last_time: Generation,
}

impl<X: Coordinate, M: MemoryPolicy> History<X, M> {
    /// Starts the history with `n0` individuals at `x0` in generation 0.
    ///
    /// # Errors
    ///
    /// Fails if `n0` is zero or if the stores of `memory` cannot be prepared.
    pub fn new(
        memory: &M,
        x0: X,
        n0: u64,
        nb_generations: Generation,
    ) -> Result<Self, SimulationError> {
        if n0 == 0 {
            return Err(SimulationError::NonPositivePopulation { size: n0 });
        }

        let mut sizes = memory.population_sizes()?;
        let flows = memory.flows()?;

        sizes.set(&x0, 0, n0)?;

        Ok(Self {
            sizes,
            flows,
            nb_generations,
            last_time: 0,
        })
    }

    /// Simulates the remaining generations up to
    /// [`nb_generations`](Self::nb_generations).
    ///
    /// In every generation, each deme that is populated produces its
    /// offspring through `growth`, which `dispersal` then distributes over
    /// the landscape.
    ///
    /// # Errors
    ///
    /// Fails with `Extinction` if a generation ends up without any
    /// individual, and with `Storage` if the stores fail. The generations
    /// simulated before the failure are kept.
    #[debug_ensures(
        ret.is_ok() -> (self.last_time == self.nb_generations),
        "simulates every generation"
    )]
    pub fn simulate_forward<G, P, D>(
        &mut self,
        mut growth: P,
        mut dispersal: D,
        rng: &mut G,
    ) -> Result<(), SimulationError>
    where
        G: Rng + ?Sized,
        P: GrowthProcess<X, G>,
        D: DispersalPolicy<X, G>,
    {
        let mut arrivals = BTreeMap::new();

        for t in (self.last_time + 1)..=self.nb_generations {
            let departure = t - 1;
            let mut individuals = 0_u64;

            for x in self.sizes.definition_space(departure)? {
                let size = self.sizes.get(&x, departure)?.unwrap_or(0);
                let offspring = growth.offspring(rng, &x, departure, size);

                dispersal.disperse(rng, &x, departure, offspring, &mut arrivals);

                for (y, migrants) in std::mem::take(&mut arrivals) {
                    if migrants > 0 {
                        self.flows.add_to_flux_from_to(&x, &y, departure, migrants)?;
                        self.sizes.add(&y, t, migrants)?;

                        individuals += migrants;
                    }
                }
            }

            if individuals == 0 {
                return Err(SimulationError::Extinction { generation: t });
            }

            debug!(
                "Simulated generation {} with {} individuals.",
                t, individuals
            );

            self.last_time = t;
        }

        Ok(())
    }

    /// Samples the deme in generation `t - 1` that a lineage found in `x` in
    /// generation `t` descends from, weighting every origin by its flow
    /// into `x`.
    ///
    /// # Errors
    ///
    /// Fails with `UndefinedFlux` if no flow into `x` reaches generation `t`,
    /// which includes `t = 0`.
    pub fn backward_kernel<G: Rng + ?Sized>(
        &mut self,
        x: &X,
        t: Generation,
        rng: &mut G,
    ) -> Result<X, SimulationError> {
        let undefined_flux = || SimulationError::UndefinedFlux {
            position: format!("{:?}", x),
            generation: t,
        };

        let departure = t.checked_sub(1).ok_or_else(undefined_flux)?;

        let origins = self
            .flows
            .flux_to(x, departure)?
            .ok_or_else(undefined_flux)?;

        backward::sample_origin(origins, rng).ok_or_else(undefined_flux)
    }

    /// # Errors
    ///
    /// Fails with `UndefinedPopulation` if no size was recorded for `x` in
    /// generation `t`.
    pub fn pop_size(&mut self, x: &X, t: Generation) -> Result<u64, SimulationError> {
        self.sizes
            .get(x, t)?
            .ok_or_else(|| SimulationError::UndefinedPopulation {
                position: format!("{:?}", x),
                generation: t,
            })
    }

    /// Demes that are populated in generation `t`, in order.
    ///
    /// # Errors
    ///
    /// Fails if the population sizes cannot be paged in.
    pub fn distribution_area(&mut self, t: Generation) -> Result<Vec<X>, SimulationError> {
        self.sizes.definition_space(t).map_err(SimulationError::from)
    }

    /// # Errors
    ///
    /// Fails if the flows cannot be paged in.
    pub fn flux_from_to(
        &mut self,
        from: &X,
        to: &X,
        t: Generation,
    ) -> Result<Option<u64>, SimulationError> {
        self.flows
            .flux_from_to(from, to, t)
            .map_err(SimulationError::from)
    }

    /// # Errors
    ///
    /// Fails if the flows cannot be paged in.
    pub fn flux_to(
        &mut self,
        to: &X,
        t: Generation,
    ) -> Result<Option<&BTreeMap<X, u64>>, SimulationError> {
        self.flows.flux_to(to, t).map_err(SimulationError::from)
    }

    #[must_use]
    pub fn first_time(&self) -> Generation {
        0
    }

    /// Last generation that has been simulated so far.
    #[must_use]
    pub fn last_time(&self) -> Generation {
        self.last_time
    }

    #[must_use]
    pub fn nb_generations(&self) -> Generation {
        self.nb_generations
    }

    /// # Errors
    ///
    /// Fails if the stores cannot persist their resident state.
    pub fn flush(&mut self) -> Result<(), SimulationError> {
        self.sizes.flush()?;
        self.flows.flush()?;

        Ok(())
    }
}

impl<X: Coordinate, M: MemoryPolicy> core::fmt::Debug for History<X, M> {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        fmt.debug_struct(stringify!(History))
            .field("sizes", &self.sizes)
            .field("flows", &self.flows)
            .field("nb_generations", &self.nb_generations)
            .field("last_time", &self.last_time)
            .finish()
    }
}
