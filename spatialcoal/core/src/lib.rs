#![deny(clippy::pedantic)]
#![allow(clippy::type_repetition_in_bounds)]

#[macro_use]
extern crate contracts;

pub mod cogs;
pub mod error;
pub mod landscape;
pub mod spectrum;

pub use error::{ErrorKind, SimulationError, StorageError};
pub use landscape::{Coordinate, Generation};
pub use spectrum::OccupancySpectrum;
