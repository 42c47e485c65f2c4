use rand::{rngs::StdRng, SeedableRng};

use spatialcoal_core::{
    cogs::{spectrum_sampler::TruncateTail, SpectrumSampler},
    ErrorKind,
};

use super::{memoized::MemoizedSpectrumSampler, on_the_fly::OnTheFlySpectrumSampler};

#[test]
fn memoized_sampler_reuses_its_cache() {
    let mut sampler: MemoizedSpectrumSampler = MemoizedSpectrumSampler::default();
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..10 {
        let spectrum = sampler.sample(4, 6, &mut rng).unwrap();

        assert_eq!(spectrum.balls(), 4);
        assert_eq!(spectrum.urns(), 6);
    }

    let _ = sampler.sample(3, 6, &mut rng).unwrap();

    let cache = sampler.into_cache();

    assert_eq!(cache.len(), 2);
    assert!(cache.contains(4, 6));
    assert!(cache.contains(3, 6));

    let mut sampler = MemoizedSpectrumSampler::with_cache(cache);
    let _ = sampler.sample(4, 6, &mut rng).unwrap();

    assert_eq!(sampler.cache().len(), 2);
}

#[test]
fn memoized_sampler_applies_its_editor() {
    let mut sampler = MemoizedSpectrumSampler::new(|p: f64| p > 0.0, TruncateTail);
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let spectrum = sampler.sample(5, 100, &mut rng).unwrap();

        assert!(spectrum.occupancy_numbers().last().map_or(true, |m| *m > 0));
    }
}

#[test]
fn on_the_fly_sampler_conserves_balls_and_urns() {
    let mut sampler = OnTheFlySpectrumSampler;
    let mut rng = StdRng::seed_from_u64(1);

    for (balls, urns) in [(0, 5), (1, 1), (7, 3), (20, 1_000_000)] {
        let spectrum = sampler.sample(balls, urns, &mut rng).unwrap();

        assert_eq!(spectrum.occupancy_numbers().len(), balls as usize + 1);
        assert_eq!(spectrum.occupancy_numbers().iter().sum::<u64>(), urns);
    }
}

#[test]
fn single_urn_receives_every_ball() {
    let mut sampler = OnTheFlySpectrumSampler;
    let mut rng = StdRng::seed_from_u64(3);

    let spectrum = sampler.sample(4, 1, &mut rng).unwrap();

    assert_eq!(spectrum.occupancy_numbers(), &[0, 0, 0, 0, 1]);
    assert_eq!(spectrum.non_empty_urns(), 1);
}

#[test]
fn no_urns_cannot_receive_balls() {
    let mut sampler = OnTheFlySpectrumSampler;
    let mut rng = StdRng::seed_from_u64(3);

    let err = sampler.sample(2, 0, &mut rng).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Domain);
}
