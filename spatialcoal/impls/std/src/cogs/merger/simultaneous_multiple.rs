use rand::{seq::SliceRandom, Rng};

use spatialcoal_core::{
    cogs::{merger::check_merge_preconditions, Merger, SpectrumSampler},
    SimulationError,
};

use crate::cogs::spectrum_sampler::memoized::MemoizedSpectrumSampler;

/// Discrete-generation coalescent: any number of lineages can find the same
/// parent, following the sampled occupancy spectrum.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Default)]
pub struct SimultaneousMultipleMerger<S: SpectrumSampler = MemoizedSpectrumSampler> {
    sampler: S,
}

impl<S: SpectrumSampler> SimultaneousMultipleMerger<S> {
    #[must_use]
    pub fn new(sampler: S) -> Self {
        Self { sampler }
    }

    #[must_use]
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    #[must_use]
    pub fn into_sampler(self) -> S {
        self.sampler
    }
}

impl<S: SpectrumSampler> Merger for SimultaneousMultipleMerger<S> {
    #[debug_requires(u32::try_from(nodes.len()).is_ok(), "the lineages fit into u32")]
    fn merge<T, I, C, G>(
        &mut self,
        nodes: &mut Vec<T>,
        population_size: u64,
        mut init: I,
        mut combine: C,
        rng: &mut G,
    ) -> Result<usize, SimulationError>
    where
        I: FnMut() -> T,
        C: FnMut(T, T) -> T,
        G: Rng + ?Sized,
    {
        check_merge_preconditions(nodes.len(), population_size)?;

        #[allow(clippy::cast_possible_truncation)]
        let balls = nodes.len() as u32;

        let spectrum = self.sampler.sample(balls, population_size, rng)?;

        nodes.shuffle(rng);

        let mut parents = Vec::new();

        for (j, m_j) in spectrum.occupancy_numbers().iter().enumerate().skip(2) {
            for _ in 0..*m_j {
                let children = nodes.split_off(nodes.len() - j);

                parents.push(children.into_iter().fold(init(), &mut combine));
            }
        }

        nodes.append(&mut parents);

        Ok(nodes.len())
    }
}
