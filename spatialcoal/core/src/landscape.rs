use core::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Discrete generation counter, generation `0` is the start of the history.
pub type Generation = u32;

/// Opaque identifier of a deme.
///
/// Demes are totally ordered so that every traversal of the landscape happens
/// in the same order, no matter where the demographic layers are stored.
pub trait Coordinate: Clone + Ord + Debug + Serialize + DeserializeOwned {}

impl<T: Clone + Ord + Debug + Serialize + DeserializeOwned> Coordinate for T {}
