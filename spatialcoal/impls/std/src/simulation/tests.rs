use std::collections::BTreeMap;

use rand::{rngs::StdRng, SeedableRng};

use spatialcoal_core::{cogs::MemoryPolicy, ErrorKind, Generation, SimulationError};

use crate::{
    cogs::{
        dispersal::individual::IndividualBasedDispersal,
        memory::{on_disk::OnDisk, on_ram::OnRam},
        merger::{binary::BinaryMerger, simultaneous_multiple::SimultaneousMultipleMerger},
    },
    forest::Forest,
};

use super::{Coalescence, ForwardBackwardSimulator};

#[derive(Debug, PartialEq, Eq)]
struct Node {
    position: u32,
    generation: Generation,
    children: Vec<Node>,
}

impl Node {
    fn leaf(position: &u32, generation: Generation) -> Self {
        Self {
            position: *position,
            generation,
            children: Vec::new(),
        }
    }

    fn leaves(&self) -> usize {
        if self.children.is_empty() {
            1
        } else {
            self.children.iter().map(Node::leaves).sum()
        }
    }
}

fn doubling(_rng: &mut StdRng, _x: &u32, _t: Generation, size: u64) -> u64 {
    size * 2
}

fn ring_step(_rng: &mut StdRng, x: &u32, _t: Generation) -> u32 {
    (x + 1) % 4
}

fn ring_simulator<M: MemoryPolicy>(
    memory: &M,
    rng: &mut StdRng,
) -> ForwardBackwardSimulator<u32, M> {
    let mut simulator = ForwardBackwardSimulator::new(memory, 0, 1, 5).unwrap();

    simulator
        .simulate_forward(doubling, IndividualBasedDispersal::new(ring_step), rng)
        .unwrap();

    simulator
}

fn most_populous_deme<M: MemoryPolicy>(
    simulator: &mut ForwardBackwardSimulator<u32, M>,
    t: Generation,
) -> u32 {
    let mut demes = simulator.distribution_area(t).unwrap();
    demes.sort_by_key(|x| simulator.history_mut().pop_size(x, t).unwrap());
    demes[demes.len() - 1]
}

#[test]
fn ring_sample_coalesces_into_its_ancestor() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut simulator = ring_simulator(&OnRam, &mut rng);

    let deme = most_populous_deme(&mut simulator, 5);
    assert_eq!(deme, 1);
    assert_eq!(simulator.pop_size(&deme, 5).unwrap(), 32);

    let mut merger: SimultaneousMultipleMerger = SimultaneousMultipleMerger::default();
    let mut absorbed = 0;

    let coalescence = simulator
        .make_forest_and_coalesce(
            BTreeMap::from([(deme, 3)]),
            5,
            &mut merger,
            Node::leaf,
            |mut parent: Node, child: Node| {
                if !parent.children.is_empty() {
                    absorbed += 1;
                }
                parent.children.push(child);
                parent
            },
            &mut rng,
        )
        .unwrap();

    match coalescence {
        Coalescence::MostRecentCommonAncestor {
            position,
            generation,
            tree,
        } => {
            assert_eq!(tree.leaves(), 3);
            assert_eq!(tree.position, position);
            assert_eq!(tree.generation, generation);
            assert!(generation <= 5);
        },
        Coalescence::Unresolved { .. } => panic!("generation 0 has a single parent"),
    }

    assert_eq!(absorbed, 2);
}

#[test]
fn binary_merger_never_loses_lineages() {
    let mut rng = StdRng::seed_from_u64(7);

    let mut simulator = ring_simulator(&OnRam, &mut rng);

    for _ in 0..20 {
        let forest = Forest::from_sample([(1, 3)], 5, Node::leaf);

        let coalescence = simulator
            .coalesce_along_spatial_history(
                forest,
                5,
                &mut BinaryMerger,
                Node::leaf,
                |mut parent: Node, child: Node| {
                    parent.children.push(child);
                    parent
                },
                &mut rng,
            )
            .unwrap();

        match coalescence {
            Coalescence::MostRecentCommonAncestor { tree, .. } => assert_eq!(tree.leaves(), 3),
            Coalescence::Unresolved { generation, forest } => {
                assert_eq!(generation, 0);
                assert_eq!(forest.positions().collect::<Vec<_>>(), vec![&0]);
                assert_eq!(forest.iter().map(|(_, tree)| tree.leaves()).sum::<usize>(), 3);
            },
        }
    }
}

fn coalesce_ring_sample<M: MemoryPolicy>(memory: &M, seed: u64) -> Coalescence<u32, Node> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut simulator = ring_simulator(memory, &mut rng);
    let mut merger: SimultaneousMultipleMerger = SimultaneousMultipleMerger::default();

    simulator
        .make_forest_and_coalesce(
            [(1, 4)],
            5,
            &mut merger,
            Node::leaf,
            |mut parent: Node, child: Node| {
                parent.children.push(child);
                parent
            },
            &mut rng,
        )
        .unwrap()
}

#[test]
fn on_disk_coalescence_matches_on_ram() {
    let directory = tempfile::tempdir().unwrap();

    let on_ram = coalesce_ring_sample(&OnRam, 3);
    let on_disk = coalesce_ring_sample(&OnDisk::try_new(directory.path()).unwrap(), 3);

    match (on_ram, on_disk) {
        (
            Coalescence::MostRecentCommonAncestor {
                position: ram_position,
                generation: ram_generation,
                tree: ram_tree,
            },
            Coalescence::MostRecentCommonAncestor {
                position: disk_position,
                generation: disk_generation,
                tree: disk_tree,
            },
        ) => {
            assert_eq!(ram_position, disk_position);
            assert_eq!(ram_generation, disk_generation);
            assert_eq!(ram_tree, disk_tree);
            assert_eq!(ram_tree.leaves(), 4);
        },
        (on_ram, on_disk) => panic!("{:?} != {:?}", on_ram, on_disk),
    }
}

#[test]
fn oversampling_is_a_domain_error_before_any_merge() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut simulator = ring_simulator(&OnRam, &mut rng);
    let mut merges = 0;

    let err = simulator
        .make_forest_and_coalesce(
            [(1, 33)],
            5,
            &mut BinaryMerger,
            Node::leaf,
            |mut parent: Node, child: Node| {
                merges += 1;
                parent.children.push(child);
                parent
            },
            &mut rng,
        )
        .unwrap_err();

    assert!(matches!(
        err,
        SimulationError::InsufficientPopulation {
            generation: 5,
            recorded: 32,
            sampled: 33,
            ..
        }
    ));
    assert_eq!(err.kind(), ErrorKind::Domain);
    assert_eq!(merges, 0);

    // nobody lives in deme 2 in generation 5
    let err = simulator
        .make_forest_and_coalesce(
            [(1, 2), (2, 1)],
            5,
            &mut BinaryMerger,
            Node::leaf,
            |parent: Node, _child: Node| parent,
            &mut rng,
        )
        .unwrap_err();

    assert!(matches!(
        err,
        SimulationError::InsufficientPopulation {
            recorded: 0,
            sampled: 1,
            ..
        }
    ));
}

#[test]
fn degenerate_samples_are_logic_errors() {
    let mut rng = StdRng::seed_from_u64(42);

    let mut simulator = ring_simulator(&OnRam, &mut rng);

    for (sample, expected) in [
        (Vec::new(), SimulationError::EmptySample),
        (vec![(1, 0)], SimulationError::EmptySample),
        (vec![(1, 1)], SimulationError::SingletonSample),
    ] {
        let err = simulator
            .make_forest_and_coalesce(
                sample,
                5,
                &mut BinaryMerger,
                Node::leaf,
                |parent: Node, _child: Node| parent,
                &mut rng,
            )
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Logic);
        assert_eq!(err.to_string(), expected.to_string());
    }
}
