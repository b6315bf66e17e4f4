//! Compilation pipeline

pub mod compiler;
pub mod report;

pub use compiler::{CompilationOutput, Compiler};
pub use report::{FunctionReport, NodeReport};
