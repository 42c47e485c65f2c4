pub mod dispersal;
pub use dispersal::{DispersalKernel, DispersalPolicy, GrowthProcess, MassKernel};

pub mod memory;
pub use memory::{FlowStore, MemoryPolicy, PopulationSizeStore};

pub mod merger;
pub use merger::Merger;

pub mod spectrum_sampler;
pub use spectrum_sampler::{SpectrumEditor, SpectrumFilter, SpectrumSampler};
