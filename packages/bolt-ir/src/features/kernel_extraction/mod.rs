// Kernel extraction and code generation
//
// - domain: offload regions, extraction mode, kernel naming
// - infrastructure: capture computation, host call sites, kernel bodies, unit assembly

pub mod domain;
pub mod infrastructure;

pub use domain::{ExternalVariable, ExtractionMode, KernelNameGenerator, OffloadRegion};
pub use infrastructure::{collect_external_variables, CodeGenerator, CodeWriter};
