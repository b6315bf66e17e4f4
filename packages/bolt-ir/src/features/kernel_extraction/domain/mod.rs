//! Kernel extraction domain

pub mod kernel_name;
pub mod offload_region;

pub use kernel_name::KernelNameGenerator;
pub use offload_region::{ExternalVariable, ExtractionMode, OffloadRegion};
