pub mod binary;
pub mod simultaneous_multiple;
