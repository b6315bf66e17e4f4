//! Shared module - Common types used by every feature
//!
//! Holds the AST and type model handed over by the front end.

pub mod models;

// Re-exports for convenience
pub use models::*;
