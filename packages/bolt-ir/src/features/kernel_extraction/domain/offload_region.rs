//! Offload regions (kernel descriptors)

use serde::{Deserialize, Serialize};

use crate::shared::models::{Stmt, ThreadDim, Type};

/// Kernel-extraction state
///
/// Host -> (enter offload) -> Device -> (leave offload) -> Host.
/// Entering an offload block while in Device is illegal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMode {
    #[default]
    Host,
    Device,
}

impl ExtractionMode {
    /// `None` when already inside an offload block
    pub fn enter_offload(self) -> Option<ExtractionMode> {
        match self {
            ExtractionMode::Host => Some(ExtractionMode::Device),
            ExtractionMode::Device => None,
        }
    }

    pub fn leave_offload(self) -> ExtractionMode {
        ExtractionMode::Host
    }

    pub fn is_device(&self) -> bool {
        matches!(self, ExtractionMode::Device)
    }
}

/// Name read or written inside an offload body but bound outside it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalVariable {
    pub name: String,
    pub ty: Type,
}

impl ExternalVariable {
    pub fn is_tensor(&self) -> bool {
        self.ty.is_tensor()
    }
}

/// One syntactic offload block, kept until the kernel unit is written
#[derive(Debug, Clone)]
pub struct OffloadRegion<'a> {
    /// Enclosing function
    pub function: String,
    pub kernel_name: String,
    /// 1..=3 axes, mapped to x, y, z
    pub dims: &'a [ThreadDim],
    pub body: &'a Stmt,
    /// Launch-argument order, shared by the call site and the kernel signature
    pub externals: Vec<ExternalVariable>,
    /// Identifier extents passed as trailing `int` parameters
    pub extent_params: Vec<String>,
}

impl<'a> OffloadRegion<'a> {
    pub fn thread_vars(&self) -> impl Iterator<Item = &str> {
        self.dims.iter().map(|d| d.var.as_str())
    }

    pub fn external_names(&self) -> Vec<&str> {
        self.externals.iter().map(|e| e.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_transitions() {
        let device = ExtractionMode::Host.enter_offload().unwrap();
        assert!(device.is_device());
        assert_eq!(device.enter_offload(), None);
        assert_eq!(device.leave_offload(), ExtractionMode::Host);
    }
}
