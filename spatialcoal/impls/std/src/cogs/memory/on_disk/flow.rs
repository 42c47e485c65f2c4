use std::{collections::BTreeMap, path::Path};

use spatialcoal_core::{cogs::FlowStore, Coordinate, Generation, StorageError};

use super::{
    super::{add_to_flux, flux, set_flux, FlowLayer},
    LayerKind, LayerPager,
};

/// Forward and backward flows are paged independently, so that forward
/// simulation only touches the forward files and coalescence mostly the
/// backward ones.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub struct OnDiskFlows<X: Coordinate> {
    forward: LayerPager<FlowLayer<X>>,
    backward: LayerPager<FlowLayer<X>>,
}

impl<X: Coordinate> OnDiskFlows<X> {
    #[must_use]
    pub fn new(directory: &Path) -> Self {
        Self {
            forward: LayerPager::new(directory, LayerKind::ForwardFlows),
            backward: LayerPager::new(directory, LayerKind::BackwardFlows),
        }
    }
}

impl<X: Coordinate> FlowStore<X> for OnDiskFlows<X> {
    fn set_flux_from_to(
        &mut self,
        from: &X,
        to: &X,
        t: Generation,
        flux: u64,
    ) -> Result<(), StorageError> {
        set_flux(self.forward.layer_mut(t)?, from, to, flux);
        set_flux(self.backward.layer_mut(t)?, to, from, flux);

        Ok(())
    }

    fn add_to_flux_from_to(
        &mut self,
        from: &X,
        to: &X,
        t: Generation,
        flux: u64,
    ) -> Result<(), StorageError> {
        add_to_flux(self.forward.layer_mut(t)?, from, to, flux);
        add_to_flux(self.backward.layer_mut(t)?, to, from, flux);

        Ok(())
    }

    fn flux_from_to(
        &mut self,
        from: &X,
        to: &X,
        t: Generation,
    ) -> Result<Option<u64>, StorageError> {
        Ok(flux(self.forward.layer(t)?, from, to))
    }

    fn flux_to(
        &mut self,
        to: &X,
        t: Generation,
    ) -> Result<Option<&BTreeMap<X, u64>>, StorageError> {
        Ok(self.backward.layer(t)?.get(to))
    }

    fn flush(&mut self) -> Result<(), StorageError> {
        self.forward.flush()?;
        self.backward.flush()
    }
}
