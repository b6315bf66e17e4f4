//! Kernel extraction and CUDA C++ emission

pub mod captures;
pub mod code_generator;
pub mod code_writer;
pub mod expressions;
pub mod kernels;
pub mod launch;
pub mod scope;
pub mod statements;

pub use captures::collect_external_variables;
pub use code_generator::CodeGenerator;
pub use code_writer::CodeWriter;
pub use kernels::{emit_kernel, kernel_signature};
pub use launch::{DeviceBuffer, KernelCollector};
pub use scope::Scope;
pub use statements::StmtTranspiler;
