pub mod dispersal;
pub mod memory;
pub mod merger;
pub mod spectrum_sampler;
