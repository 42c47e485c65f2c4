use std::collections::BTreeMap;

use rand::{rngs::StdRng, Rng, SeedableRng};

use spatialcoal_core::{cogs::MemoryPolicy, ErrorKind, Generation, SimulationError};

use crate::cogs::{
    dispersal::individual::IndividualBasedDispersal,
    memory::{on_disk::OnDisk, on_ram::OnRam},
};

use super::History;

fn doubling(_rng: &mut StdRng, _x: &u32, _t: Generation, size: u64) -> u64 {
    size * 2
}

fn ring_step(_rng: &mut StdRng, x: &u32, _t: Generation) -> u32 {
    (x + 1) % 4
}

fn random_walk(rng: &mut StdRng, x: &i32, _t: Generation) -> i32 {
    x + rng.gen_range(-1..=1)
}

fn fluctuating(rng: &mut StdRng, _x: &i32, _t: Generation, size: u64) -> u64 {
    size + rng.gen_range(0..=size)
}

#[test]
fn deterministic_ring_history() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut history = History::new(&OnRam, 0_u32, 1, 5).unwrap();

    assert_eq!(history.first_time(), 0);
    assert_eq!(history.last_time(), 0);
    assert_eq!(history.nb_generations(), 5);

    history
        .simulate_forward(doubling, IndividualBasedDispersal::new(ring_step), &mut rng)
        .unwrap();

    assert_eq!(history.last_time(), 5);

    for (t, (x, n)) in [(0, 1), (1, 2), (2, 4), (3, 8), (0, 16), (1, 32)]
        .into_iter()
        .enumerate()
    {
        #[allow(clippy::cast_possible_truncation)]
        let t = t as Generation;

        assert_eq!(history.pop_size(&x, t).unwrap(), n);
        assert_eq!(history.distribution_area(t).unwrap(), vec![x]);
    }

    assert_eq!(history.flux_from_to(&0, &1, 0).unwrap(), Some(2));
    assert_eq!(history.flux_from_to(&0, &1, 4).unwrap(), Some(32));
    assert_eq!(history.flux_from_to(&1, &2, 0).unwrap(), None);
    assert_eq!(
        history.flux_to(&1, 4).unwrap(),
        Some(&BTreeMap::from([(0, 32)]))
    );

    assert_eq!(history.backward_kernel(&1, 5, &mut rng).unwrap(), 0);
    assert_eq!(history.backward_kernel(&0, 4, &mut rng).unwrap(), 3);

    // simulating a completed history again is a no-op
    history
        .simulate_forward(doubling, IndividualBasedDispersal::new(ring_step), &mut rng)
        .unwrap();
    assert_eq!(history.pop_size(&1, 5).unwrap(), 32);
}

#[test]
fn undefined_queries_are_domain_errors() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut history = History::new(&OnRam, 0_u32, 1, 2).unwrap();
    history
        .simulate_forward(doubling, IndividualBasedDispersal::new(ring_step), &mut rng)
        .unwrap();

    let err = history.backward_kernel(&0, 0, &mut rng).unwrap_err();
    assert!(matches!(err, SimulationError::UndefinedFlux { generation: 0, .. }));
    assert_eq!(err.kind(), ErrorKind::Domain);

    let err = history.backward_kernel(&3, 2, &mut rng).unwrap_err();
    assert!(matches!(err, SimulationError::UndefinedFlux { generation: 2, .. }));

    let err = history.pop_size(&3, 1).unwrap_err();
    assert!(matches!(err, SimulationError::UndefinedPopulation { generation: 1, .. }));
    assert_eq!(err.kind(), ErrorKind::Domain);
}

#[test]
fn extinction_stops_the_simulation() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut history = History::new(&OnRam, 0_u32, 10, 5).unwrap();

    let err = history
        .simulate_forward(
            |_rng: &mut StdRng, _x: &u32, t: Generation, size: u64| if t < 2 { size } else { 0 },
            IndividualBasedDispersal::new(ring_step),
            &mut rng,
        )
        .unwrap_err();

    assert!(matches!(err, SimulationError::Extinction { generation: 3 }));
    assert_eq!(history.last_time(), 2);
    assert_eq!(history.pop_size(&2, 2).unwrap(), 10);
}

#[test]
fn empty_founder_population_is_rejected() {
    assert!(matches!(
        History::new(&OnRam, 0_u32, 0, 5),
        Err(SimulationError::NonPositivePopulation { size: 0 })
    ));
}

#[test]
fn backward_kernel_follows_the_flows() {
    let mut rng = StdRng::seed_from_u64(42);

    // demes -1 and 1 both feed into deme 0 at generation 1
    let mut history = History::new(&OnRam, 0_i32, 1, 2).unwrap();
    history
        .simulate_forward(
            |_rng: &mut StdRng, _x: &i32, t: Generation, size: u64| {
                if t == 0 {
                    1_000
                } else {
                    size
                }
            },
            IndividualBasedDispersal::new(|rng: &mut StdRng, _x: &i32, t: Generation| {
                if t > 0 {
                    0
                } else if rng.gen_bool(0.25) {
                    1
                } else {
                    -1
                }
            }),
            &mut rng,
        )
        .unwrap();

    let left = history.flux_from_to(&-1, &0, 1).unwrap().unwrap();
    let right = history.flux_from_to(&1, &0, 1).unwrap().unwrap();

    assert_eq!(left + right, 1_000);
    assert_eq!(history.pop_size(&0, 2).unwrap(), 1_000);

    let from_right = (0..10_000)
        .filter(|_| history.backward_kernel(&0, 2, &mut rng).unwrap() == 1)
        .count();

    #[allow(clippy::cast_precision_loss)]
    let expected = (right as f64) / 1_000.0;
    #[allow(clippy::cast_precision_loss)]
    let observed = (from_right as f64) / 10_000.0;

    assert!((observed - expected).abs() < 0.02, "{} vs {}", observed, expected);
}

fn simulate_fluctuating<M: MemoryPolicy>(memory: &M) -> History<i32, M> {
    let mut rng = StdRng::seed_from_u64(1_234);

    let mut history = History::new(memory, 0_i32, 5, 12).unwrap();

    history
        .simulate_forward(fluctuating, IndividualBasedDispersal::new(random_walk), &mut rng)
        .unwrap();

    history
}

#[test]
fn on_ram_and_on_disk_histories_are_identical() {
    let directory = tempfile::tempdir().unwrap();

    let mut on_ram = simulate_fluctuating(&OnRam);
    let mut on_disk = simulate_fluctuating(&OnDisk::try_new(directory.path()).unwrap());

    for t in (0..=12).rev() {
        let area = on_ram.distribution_area(t).unwrap();

        assert!(!area.is_empty());
        assert_eq!(on_disk.distribution_area(t).unwrap(), area);

        for x in &area {
            assert_eq!(on_disk.pop_size(x, t).unwrap(), on_ram.pop_size(x, t).unwrap());

            if t > 0 {
                assert_eq!(
                    on_disk.flux_to(x, t - 1).unwrap().cloned(),
                    on_ram.flux_to(x, t - 1).unwrap().cloned()
                );
            }
        }
    }

    let mut ram_rng = StdRng::seed_from_u64(99);
    let mut disk_rng = StdRng::seed_from_u64(99);

    for t in [12, 3, 7, 1] {
        for x in on_ram.distribution_area(t).unwrap() {
            assert_eq!(
                on_disk.backward_kernel(&x, t, &mut disk_rng).unwrap(),
                on_ram.backward_kernel(&x, t, &mut ram_rng).unwrap()
            );
        }
    }

    on_disk.flush().unwrap();
}
