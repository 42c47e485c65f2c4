use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use spatialcoal_core::{
    cogs::{FlowStore, MemoryPolicy, PopulationSizeStore},
    Coordinate, Generation, StorageError,
};

use super::{FlowLayer, PopulationLayer};

/// Keeps the whole demographic history in memory.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize)]
pub struct OnRam;

impl MemoryPolicy for OnRam {
    type Flows<X: Coordinate> = InMemoryFlows<X>;
    type PopulationSizes<X: Coordinate> = InMemoryPopulationSizes<X>;

    fn population_sizes<X: Coordinate>(&self) -> Result<Self::PopulationSizes<X>, StorageError> {
        Ok(InMemoryPopulationSizes {
            layers: BTreeMap::new(),
        })
    }

    fn flows<X: Coordinate>(&self) -> Result<Self::Flows<X>, StorageError> {
        Ok(InMemoryFlows {
            forward: BTreeMap::new(),
            backward: BTreeMap::new(),
        })
    }
}

#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct InMemoryPopulationSizes<X: Coordinate> {
    layers: BTreeMap<Generation, PopulationLayer<X>>,
}

impl<X: Coordinate> PopulationSizeStore<X> for InMemoryPopulationSizes<X> {
    fn set(&mut self, x: &X, t: Generation, size: u64) -> Result<(), StorageError> {
        self.layers.entry(t).or_default().insert(x.clone(), size);

        Ok(())
    }

    fn add(&mut self, x: &X, t: Generation, size: u64) -> Result<(), StorageError> {
        super::add_to_population(self.layers.entry(t).or_default(), x, size);

        Ok(())
    }

    fn get(&mut self, x: &X, t: Generation) -> Result<Option<u64>, StorageError> {
        Ok(self.layers.get(&t).and_then(|layer| layer.get(x)).copied())
    }

    fn definition_space(&mut self, t: Generation) -> Result<Vec<X>, StorageError> {
        Ok(self
            .layers
            .get(&t)
            .map_or_else(Vec::new, super::definition_space))
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}

#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct InMemoryFlows<X: Coordinate> {
    forward: BTreeMap<Generation, FlowLayer<X>>,
    backward: BTreeMap<Generation, FlowLayer<X>>,
}

impl<X: Coordinate> FlowStore<X> for InMemoryFlows<X> {
    fn set_flux_from_to(
        &mut self,
        from: &X,
        to: &X,
        t: Generation,
        flux: u64,
    ) -> Result<(), StorageError> {
        super::set_flux(self.forward.entry(t).or_default(), from, to, flux);
        super::set_flux(self.backward.entry(t).or_default(), to, from, flux);

        Ok(())
    }

    fn add_to_flux_from_to(
        &mut self,
        from: &X,
        to: &X,
        t: Generation,
        flux: u64,
    ) -> Result<(), StorageError> {
        super::add_to_flux(self.forward.entry(t).or_default(), from, to, flux);
        super::add_to_flux(self.backward.entry(t).or_default(), to, from, flux);

        Ok(())
    }

    fn flux_from_to(
        &mut self,
        from: &X,
        to: &X,
        t: Generation,
    ) -> Result<Option<u64>, StorageError> {
        Ok(self
            .forward
            .get(&t)
            .and_then(|layer| super::flux(layer, from, to)))
    }

    fn flux_to(
        &mut self,
        to: &X,
        t: Generation,
    ) -> Result<Option<&BTreeMap<X, u64>>, StorageError> {
        Ok(self.backward.get(&t).and_then(|layer| layer.get(to)))
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        Ok(())
    }
}
