#![deny(clippy::pedantic)]
#![no_std]

//! Floating point numbers whose range is checked once, on construction.

#[macro_use]
mod bounded;

mod closed_unit_f64;
mod non_negative_f64;

pub use closed_unit_f64::{ClosedUnitF64, ClosedUnitF64Error};
pub use non_negative_f64::{NonNegativeF64, NonNegativeF64Error};
