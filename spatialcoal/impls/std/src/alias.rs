use rand::Rng;

use spatialcoal_core_bond::{ClosedUnitF64, NonNegativeF64};

/// Walker's alias method over a finite set of weighted events.
///
/// Construction is linear in the number of events, every sample afterwards
/// costs one index draw and one Bernoulli trial.
#[allow(clippy::module_name_repetitions)]
#[allow(non_snake_case)]
#[derive(Clone, Debug)]
pub struct AliasMethodSampler<E> {
    Es: Vec<E>,
    Us: Vec<ClosedUnitF64>,
    Ks: Vec<usize>,
}

impl<E> AliasMethodSampler<E> {
    #[debug_requires(!event_weights.is_empty(), "event_weights is non-empty")]
    #[debug_requires(
        event_weights.iter().any(|(_e, p)| *p > 0.0_f64),
        "at least one event has a positive weight"
    )]
    #[debug_ensures(
        ret.Us.iter().zip(ret.Ks.iter()).enumerate().all(|(i, (u, k))| {
            let full_bucket = *u == ClosedUnitF64::one();
            !full_bucket || (i == *k)
        }),
        "full buckets sample the same event just in case"
    )]
    pub fn new(event_weights: Vec<(E, NonNegativeF64)>) -> Self {
        let n = event_weights.len();

        #[allow(non_snake_case)]
        let mut Us = Vec::with_capacity(n);
        #[allow(non_snake_case)]
        let mut Es = Vec::with_capacity(n);
        #[allow(non_snake_case)]
        let mut Ks: Vec<usize> = (0..n).collect();

        let total_weight: NonNegativeF64 = event_weights.iter().map(|(_e, p)| *p).sum();

        #[allow(clippy::cast_precision_loss)]
        let scale = (n as f64) / total_weight.get();

        for (event, weight) in event_weights {
            Us.push(weight.get() * scale);
            Es.push(event);
        }

        let mut overfull_indices: Vec<usize> = (0..n).filter(|i| Us[*i] > 1.0_f64).collect();
        let mut underfull_indices: Vec<usize> = (0..n).filter(|i| Us[*i] < 1.0_f64).collect();

        while let Some((overfull_index, underfull_index)) =
            pop_bucket_pair(&mut overfull_indices, &mut underfull_indices)
        {
            Us[overfull_index] = Us[overfull_index] + Us[underfull_index] - 1.0_f64;
            Ks[underfull_index] = overfull_index;

            #[allow(clippy::comparison_chain)]
            if Us[overfull_index] < 1.0_f64 {
                underfull_indices.push(overfull_index);
            } else if Us[overfull_index] > 1.0_f64 {
                overfull_indices.push(overfull_index);
            }
        }

        // Leftover buckets are only off by rounding errors (Vose, 1991)
        for i in overfull_indices.into_iter().chain(underfull_indices) {
            Us[i] = 1.0_f64;
            Ks[i] = i;
        }

        Self {
            Es,
            Us: Us.into_iter().map(ClosedUnitF64::saturating_new).collect(),
            Ks,
        }
    }

    #[must_use]
    pub fn events(&self) -> &[E] {
        &self.Es
    }

    #[must_use]
    pub fn sample_index<G: Rng + ?Sized>(&self, rng: &mut G) -> usize {
        let i = rng.gen_range(0..self.Es.len());

        // Select Es[i] over Es[Ks[i]] according to its bucket percentage Us[i]
        if rng.gen_bool(self.Us[i].get()) {
            i
        } else {
            self.Ks[i]
        }
    }

    #[must_use]
    pub fn sample_event<G: Rng + ?Sized>(&self, rng: &mut G) -> &E {
        &self.Es[self.sample_index(rng)]
    }
}

/// Pops one overfull and one underfull bucket, or neither.
fn pop_bucket_pair(
    overfull: &mut Vec<usize>,
    underfull: &mut Vec<usize>,
) -> Option<(usize, usize)> {
    if overfull.is_empty() || underfull.is_empty() {
        return None;
    }

    overfull.pop().zip(underfull.pop())
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use spatialcoal_core_bond::NonNegativeF64;

    use super::AliasMethodSampler;

    fn weight(w: f64) -> NonNegativeF64 {
        NonNegativeF64::new(w).unwrap()
    }

    #[test]
    fn singular_event() {
        let sampler = AliasMethodSampler::new(vec![('a', weight(0.5))]);
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            assert_eq!(*sampler.sample_event(&mut rng), 'a');
        }
    }

    #[test]
    fn zero_weight_events_are_never_sampled() {
        let sampler =
            AliasMethodSampler::new(vec![(0_u32, weight(0.0)), (1, weight(3.0)), (2, weight(0.0))]);
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..1_000 {
            assert_eq!(*sampler.sample_event(&mut rng), 1);
        }
    }

    #[test]
    fn sample_frequencies_follow_the_weights() {
        let sampler = AliasMethodSampler::new(vec![
            ("x", weight(1.0)),
            ("y", weight(2.0)),
            ("z", weight(7.0)),
        ]);
        let mut rng = StdRng::seed_from_u64(1234);

        let mut counts = [0_u32; 3];

        for _ in 0..100_000 {
            counts[sampler.sample_index(&mut rng)] += 1;
        }

        let frequencies: Vec<f64> = counts.iter().map(|c| f64::from(*c) / 100_000.0).collect();

        assert!((frequencies[0] - 0.1).abs() < 0.01, "{:?}", frequencies);
        assert!((frequencies[1] - 0.2).abs() < 0.01, "{:?}", frequencies);
        assert!((frequencies[2] - 0.7).abs() < 0.01, "{:?}", frequencies);
    }
}
