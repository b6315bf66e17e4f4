//! Error types for bolt-ir
//!
//! Provides unified error handling across the crate. Every failure reaches the
//! caller as a labelled error (kind + message); nothing is retried or
//! recovered silently.

use thiserror::Error;

use crate::config::ConfigError;

/// Error kind categorization
///
/// - `Structural` aborts the whole compilation (malformed AST, unsupported construct)
/// - `SemanticCapture` aborts the current function (external variable without a type)
/// - `Policy` aborts the current offload region before any of its code is emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Structural,
    SemanticCapture,
    Policy,
    Config,
    Io,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Structural => "structural",
            ErrorKind::SemanticCapture => "semantic_capture",
            ErrorKind::Policy => "policy",
            ErrorKind::Config => "config",
            ErrorKind::Io => "io",
        }
    }
}

/// Main error type for bolt-ir operations
#[derive(Debug, Error)]
pub enum CompileError {
    /// Unrecognized or unsupported construct
    #[error("Structural error: {message}")]
    Structural { message: String },

    /// External variable of an offload block has no resolvable type
    #[error("Cannot resolve type of external variable '{variable}' captured by kernel '{kernel}' in function '{function}'")]
    UnresolvedCapture {
        function: String,
        kernel: String,
        variable: String,
    },

    /// Offload block nested inside another offload block
    #[error("Nested defer blocks are not allowed: kernel '{kernel}' in function '{function}' contains another defer block")]
    NestedOffload { function: String, kernel: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON input
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CompileError {
    /// Create a structural error
    pub fn structural(msg: impl Into<String>) -> Self {
        CompileError::Structural {
            message: msg.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            CompileError::Structural { .. } | CompileError::Json(_) => ErrorKind::Structural,
            CompileError::UnresolvedCapture { .. } => ErrorKind::SemanticCapture,
            CompileError::NestedOffload { .. } => ErrorKind::Policy,
            CompileError::Config(_) => ErrorKind::Config,
            CompileError::Io(_) => ErrorKind::Io,
        }
    }
}

/// Result type alias for bolt-ir operations
pub type Result<T> = std::result::Result<T, CompileError>;
