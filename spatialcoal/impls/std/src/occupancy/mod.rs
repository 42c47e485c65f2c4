//! Exact distribution of the occupancy spectra of `k` balls thrown into `N`
//! urns, which describes how `k` lineages find their parents among `N`
//! potential parents within one generation.

mod cache;
mod distribution;
mod generator;
mod probability;

pub use cache::OccupancySpectrumCache;
pub use distribution::OccupancySpectrumDistribution;
pub use generator::generate;
pub use probability::{probability, LogFactorials};
