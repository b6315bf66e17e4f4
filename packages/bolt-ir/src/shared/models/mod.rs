//! Shared models

pub mod ast;
pub mod type_env;
pub mod types;

pub use ast::{BinaryOp, Expr, FuncDef, Param, Program, Stmt, ThreadDim, UnaryOp};
pub use type_env::TypeEnvironment;
pub use types::{ScalarType, SizeParam, Type};
