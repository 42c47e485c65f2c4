#![deny(clippy::pedantic)]
#![allow(clippy::type_repetition_in_bounds)]

#[macro_use]
extern crate contracts;

#[macro_use]
extern crate log;

pub mod alias;
pub mod cogs;
pub mod forest;
pub mod history;
pub mod occupancy;
pub mod simulation;
