use rand::Rng;

use spatialcoal_core::{
    cogs::{merger::check_merge_preconditions, Merger},
    SimulationError,
};

/// Kingman coalescent approximation: at most one pair of lineages merges per
/// generation.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Default, Clone, Copy)]
pub struct BinaryMerger;

impl BinaryMerger {
    /// Probability `min(1, k (k - 1) / 2N)` that two of the `lineages` find
    /// the same parent among `population_size` individuals.
    #[must_use]
    pub fn coalescence_probability(lineages: usize, population_size: u64) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let pairs = (lineages as f64) * ((lineages.saturating_sub(1)) as f64) * 0.5_f64;

        #[allow(clippy::cast_precision_loss)]
        let probability = pairs / (population_size as f64);

        probability.min(1.0_f64)
    }
}

impl Merger for BinaryMerger {
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

        if rng.gen_bool(Self::coalescence_probability(nodes.len(), population_size)) {
            let first = nodes.swap_remove(rng.gen_range(0..nodes.len()));
            let second = nodes.swap_remove(rng.gen_range(0..nodes.len()));

            let parent = combine(init(), first);
            let parent = combine(parent, second);

            nodes.push(parent);
        }

        Ok(nodes.len())
    }
}
