use std::collections::BTreeMap;

use crate::{
    error::StorageError,
    landscape::{Coordinate, Generation},
};

/// Population sizes `N(x, t)` over the whole simulated history.
#[allow(clippy::module_name_repetitions)]
pub trait PopulationSizeStore<X: Coordinate>: core::fmt::Debug {
    /// # Errors
    ///
    /// Fails if the layer of generation `t` cannot be paged in.
    fn set(&mut self, x: &X, t: Generation, size: u64) -> Result<(), StorageError>;

    /// Adds `size` to `N(x, t)`, treating an undefined size as zero.
    ///
    /// # Errors
    ///
    /// Fails if the layer of generation `t` cannot be paged in.
    fn add(&mut self, x: &X, t: Generation, size: u64) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Fails if the layer of generation `t` cannot be paged in.
    fn get(&mut self, x: &X, t: Generation) -> Result<Option<u64>, StorageError>;

    /// Demes with a positive population size in generation `t`, in order.
    ///
    /// # Errors
    ///
    /// Fails if the layer of generation `t` cannot be paged in.
    fn definition_space(&mut self, t: Generation) -> Result<Vec<X>, StorageError>;

    /// Persists the resident state, if any.
    ///
    /// # Errors
    ///
    /// Fails if the resident state cannot be written.
    fn flush(&mut self) -> Result<(), StorageError>;
}

/// Migration flows `x -> y` keyed by the generation the migrants leave from.
#[allow(clippy::module_name_repetitions)]
pub trait FlowStore<X: Coordinate>: core::fmt::Debug {
    /// # Errors
    ///
    /// Fails if the layer of generation `t` cannot be paged in.
    fn set_flux_from_to(
        &mut self,
        from: &X,
        to: &X,
        t: Generation,
        flux: u64,
    ) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Fails if the layer of generation `t` cannot be paged in.
    fn add_to_flux_from_to(
        &mut self,
        from: &X,
        to: &X,
        t: Generation,
        flux: u64,
    ) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Fails if the layer of generation `t` cannot be paged in.
    fn flux_from_to(
        &mut self,
        from: &X,
        to: &X,
        t: Generation,
    ) -> Result<Option<u64>, StorageError>;

    /// Flux converging into `to`, grouped by origin.
    ///
    /// # Errors
    ///
    /// Fails if the layer of generation `t` cannot be paged in.
    fn flux_to(
        &mut self,
        to: &X,
        t: Generation,
    ) -> Result<Option<&BTreeMap<X, u64>>, StorageError>;

    /// Persists the resident state, if any.
    ///
    /// # Errors
    ///
    /// Fails if the resident state cannot be written.
    fn flush(&mut self) -> Result<(), StorageError>;
}

/// Chooses where the demographic time series live.
#[allow(clippy::module_name_repetitions)]
pub trait MemoryPolicy: core::fmt::Debug {
    type PopulationSizes<X: Coordinate>: PopulationSizeStore<X>;
    type Flows<X: Coordinate>: FlowStore<X>;

    /// # Errors
    ///
    /// Fails if the backing storage cannot be prepared.
    fn population_sizes<X: Coordinate>(&self) -> Result<Self::PopulationSizes<X>, StorageError>;

    /// # Errors
    ///
    /// Fails if the backing storage cannot be prepared.
    fn flows<X: Coordinate>(&self) -> Result<Self::Flows<X>, StorageError>;
}
