//! Compiler configuration
//!
//! One YAML document (versioned) selects the launch geometry, the dead-code
//! policy and the output file names. Every section implements [`Validatable`];
//! [`CompilerConfig::validate`] checks them all.
//!
//! # Examples
//!
//! ```rust,ignore
//! use bolt_ir::config::CompilerConfig;
//!
//! let config = CompilerConfig::from_yaml_file("boltc.yaml")?;
//! let defaults = CompilerConfig::default();
//! ```

pub mod compiler_config;
pub mod error;
pub mod validation;

// Re-exports
pub use compiler_config::{CompilerConfig, DeadCodePolicy, LaunchConfig, OutputConfig};
pub use error::{ConfigError, ConfigResult};
pub use validation::Validatable;
