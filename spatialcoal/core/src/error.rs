use std::{io, path::PathBuf};

use thiserror::Error;

use crate::landscape::Generation;

/// Coarse classification of a [`SimulationError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request is well-formed but outside of what the simulated history
    /// can answer, e.g. sampling more lineages than there are individuals.
    Domain,
    /// The caller broke a precondition of the API, e.g. coalescing a single
    /// lineage.
    Logic,
    /// The scratch storage of a memory policy failed.
    Storage,
}

#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum SimulationError {
    #[error("the sample to coalesce is empty")]
    EmptySample,
    #[error("the sample to coalesce only contains one gene copy")]
    SingletonSample,
    #[error("coalescence needs at least two lineages, but only {lineages} were given")]
    InsufficientLineages { lineages: usize },
    #[error("the population size must be positive to evaluate coalescence, found {size}")]
    NonPositivePopulation { size: u64 },
    #[error(
        "the simulated population size {recorded} at {position} in generation {generation} is \
         smaller than the {sampled} sampled lineages"
    )]
    InsufficientPopulation {
        position: String,
        generation: Generation,
        recorded: u64,
        sampled: usize,
    },
    #[error("no migration flux into {position} at generation {generation} was recorded")]
    UndefinedFlux {
        position: String,
        generation: Generation,
    },
    #[error("no population size is recorded at {position} in generation {generation}")]
    UndefinedPopulation {
        position: String,
        generation: Generation,
    },
    #[error("the landscape population went extinct in generation {generation}")]
    Extinction { generation: Generation },
    #[error("no occupancy spectrum for {balls} balls in {urns} urns passed the filter")]
    EmptySpectrumSupport { balls: u32, urns: u64 },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl SimulationError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptySample
            | Self::SingletonSample
            | Self::InsufficientLineages { .. }
            | Self::NonPositivePopulation { .. } => ErrorKind::Logic,
            Self::InsufficientPopulation { .. }
            | Self::UndefinedFlux { .. }
            | Self::UndefinedPopulation { .. }
            | Self::Extinction { .. }
            | Self::EmptySpectrumSupport { .. } => ErrorKind::Domain,
            Self::Storage(_) => ErrorKind::Storage,
        }
    }
}

#[derive(Debug, Error)]
#[allow(clippy::module_name_repetitions)]
pub enum StorageError {
    #[error("{0:?} is not a directory")]
    NotADirectory(PathBuf),
    #[error("{0:?} is read-only")]
    ReadOnlyDirectory(PathBuf),
    #[error("failed to access the layer file {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to encode or decode the layer file {path:?}")]
    Codec {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}
