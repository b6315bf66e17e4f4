/*
 * Bolt IR - CFG, dataflow and CUDA kernel extraction for the Bolt tensor language
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Input contract (AST, types, global type environment)
 * - features/    : Vertical slices (flow_graph -> data_flow, kernel_extraction)
 * - pipeline/    : Per-function driver and reports
 * - config/      : YAML compiler configuration
 *
 * Single-threaded and synchronous: each function is analysed and emitted in
 * one pass, kernels are flushed once per program.
 */

#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models (AST, types, type environment)
pub mod shared;

/// Feature modules (CFG, dataflow, kernel extraction)
pub mod features;

/// Compilation driver
pub mod pipeline;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

pub use config::{CompilerConfig, DeadCodePolicy, LaunchConfig, OutputConfig};
pub use errors::{CompileError, ErrorKind, Result};
pub use pipeline::{CompilationOutput, Compiler, FunctionReport};
pub use shared::models::{Program, TypeEnvironment};
