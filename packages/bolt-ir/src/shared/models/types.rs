//! Bolt types as produced by the type checker

use serde::{Deserialize, Serialize};
use std::fmt;

/// Scalar component type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScalarType {
    Int,
    Double,
    Bool,
    Char,
}

impl ScalarType {
    /// CUDA C++ spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            ScalarType::Int => "int",
            ScalarType::Double => "double",
            ScalarType::Bool => "bool",
            ScalarType::Char => "char",
        }
    }
}

/// Tensor extent: a literal or the name of an int variable
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeParam {
    Int(i64),
    Ident(String),
}

impl SizeParam {
    pub fn ident(name: impl Into<String>) -> Self {
        SizeParam::Ident(name.into())
    }

    pub fn as_ident(&self) -> Option<&str> {
        match self {
            SizeParam::Ident(name) => Some(name),
            SizeParam::Int(_) => None,
        }
    }
}

impl fmt::Display for SizeParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeParam::Int(value) => write!(f, "{}", value),
            SizeParam::Ident(name) => write!(f, "{}", name),
        }
    }
}

/// Bolt type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Scalar(ScalarType),
    Tensor {
        element: ScalarType,
        dims: Vec<SizeParam>,
    },
    Void,
}

impl Type {
    pub fn int() -> Self {
        Type::Scalar(ScalarType::Int)
    }

    pub fn double() -> Self {
        Type::Scalar(ScalarType::Double)
    }

    pub fn bool() -> Self {
        Type::Scalar(ScalarType::Bool)
    }

    pub fn tensor(element: ScalarType, dims: Vec<SizeParam>) -> Self {
        Type::Tensor { element, dims }
    }

    pub fn is_tensor(&self) -> bool {
        matches!(self, Type::Tensor { .. })
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Scalar(scalar) => write!(f, "{}", scalar.as_str()),
            Type::Tensor { element, dims } => {
                let dims: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
                write!(f, "tensor<{}>[{}]", element.as_str(), dims.join(", "))
            }
            Type::Void => write!(f, "void"),
        }
    }
}
