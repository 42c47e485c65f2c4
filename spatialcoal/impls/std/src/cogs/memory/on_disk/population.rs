use std::path::Path;

use spatialcoal_core::{cogs::PopulationSizeStore, Coordinate, Generation, StorageError};

use super::{
    super::{add_to_population, definition_space, PopulationLayer},
    LayerKind, LayerPager,
};

#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct OnDiskPopulationSizes<X: Coordinate> {
    pager: LayerPager<PopulationLayer<X>>,
}

impl<X: Coordinate> OnDiskPopulationSizes<X> {
    #[must_use]
    pub fn new(directory: &Path) -> Self {
        Self {
            pager: LayerPager::new(directory, LayerKind::PopulationSizes),
        }
    }

    #[must_use]
    pub fn pager(&self) -> &LayerPager<PopulationLayer<X>> {
        &self.pager
    }
}

impl<X: Coordinate> PopulationSizeStore<X> for OnDiskPopulationSizes<X> {
    fn set(&mut self, x: &X, t: Generation, size: u64) -> Result<(), StorageError> {
        self.pager.layer_mut(t)?.insert(x.clone(), size);

        Ok(())
    }

    fn add(&mut self, x: &X, t: Generation, size: u64) -> Result<(), StorageError> {
        add_to_population(self.pager.layer_mut(t)?, x, size);

        Ok(())
    }

    fn get(&mut self, x: &X, t: Generation) -> Result<Option<u64>, StorageError> {
        Ok(self.pager.layer(t)?.get(x).copied())
    }

    fn definition_space(&mut self, t: Generation) -> Result<Vec<X>, StorageError> {
        Ok(definition_space(self.pager.layer(t)?))
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.pager.flush()
    }
}
