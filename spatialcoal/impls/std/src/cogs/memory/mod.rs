use std::collections::BTreeMap;

use spatialcoal_core::Coordinate;

pub mod on_disk;
pub mod on_ram;


/// Population sizes of one generation.
pub type PopulationLayer<X> = BTreeMap<X, u64>;

/// Flows of one generation, grouped by their first coordinate.
pub type FlowLayer<X> = BTreeMap<X, BTreeMap<X, u64>>;

fn definition_space<X: Coordinate>(layer: &PopulationLayer<X>) -> Vec<X> {
    layer
        .iter()
        .filter(|(_, size)| **size > 0)
        .map(|(x, _)| x.clone())
        .collect()
}

fn add_to_population<X: Coordinate>(layer: &mut PopulationLayer<X>, x: &X, size: u64) {
    *layer.entry(x.clone()).or_insert(0) += size;
}

fn set_flux<X: Coordinate>(layer: &mut FlowLayer<X>, first: &X, second: &X, flux: u64) {
    layer
        .entry(first.clone())
        .or_default()
        .insert(second.clone(), flux);
}

fn add_to_flux<X: Coordinate>(layer: &mut FlowLayer<X>, first: &X, second: &X, flux: u64) {
    *layer
        .entry(first.clone())
        .or_default()
        .entry(second.clone())
        .or_insert(0) += flux;
}

fn flux<X: Coordinate>(layer: &FlowLayer<X>, first: &X, second: &X) -> Option<u64> {
    layer.get(first).and_then(|fluxes| fluxes.get(second)).copied()
}
