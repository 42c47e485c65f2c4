use std::{
    convert::TryFrom,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use spatialcoal_core::{cogs::MemoryPolicy, Coordinate, StorageError};

mod flow;
mod pager;
mod population;

pub use flow::OnDiskFlows;
pub use pager::{Layer, LayerKind, LayerPager};
pub use population::OnDiskPopulationSizes;

/// Pages the demographic history through scratch files in `directory`,
/// keeping at most two generations of each store in memory.
///
/// Two histories that are alive at the same time must not share a directory.
#[allow(clippy::module_name_repetitions)]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "OnDiskRaw")]
pub struct OnDisk {
    directory: PathBuf,
}

impl TryFrom<OnDiskRaw> for OnDisk {
    type Error = StorageError;

    fn try_from(raw: OnDiskRaw) -> Result<Self, Self::Error> {
        Self::try_new(raw.directory)
    }
}

impl OnDisk {
    /// # Errors
    ///
    /// Fails to construct iff `directory` is not a writable directory or
    /// cannot be created.
    pub fn try_new<P: Into<PathBuf>>(directory: P) -> Result<Self, StorageError> {
        let directory = directory.into();

        if !directory.exists() {
            fs::create_dir_all(&directory).map_err(|source| StorageError::Io {
                path: directory.clone(),
                source,
            })?;
        }

        let metadata = fs::metadata(&directory).map_err(|source| StorageError::Io {
            path: directory.clone(),
            source,
        })?;

        if !metadata.is_dir() {
            return Err(StorageError::NotADirectory(directory));
        }

        if metadata.permissions().readonly() {
            return Err(StorageError::ReadOnlyDirectory(directory));
        }

        Ok(Self { directory })
    }

    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl MemoryPolicy for OnDisk {
    type Flows<X: Coordinate> = OnDiskFlows<X>;
    type PopulationSizes<X: Coordinate> = OnDiskPopulationSizes<X>;

    fn population_sizes<X: Coordinate>(&self) -> Result<Self::PopulationSizes<X>, StorageError> {
        Ok(OnDiskPopulationSizes::new(&self.directory))
    }

    fn flows<X: Coordinate>(&self) -> Result<Self::Flows<X>, StorageError> {
        Ok(OnDiskFlows::new(&self.directory))
    }
}

#[derive(Deserialize)]
#[serde(rename = "OnDisk")]
#[serde(deny_unknown_fields)]
struct OnDiskRaw {
    #[serde(default = "std::env::temp_dir")]
    directory: PathBuf,
}
