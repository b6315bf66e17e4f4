//! Host/device boundary crossings between adjacent nodes

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::features::flow_graph::domain::{ExecutionContext, NodeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferDirection {
    HostToDevice,
    DeviceToHost,
}

impl TransferDirection {
    /// Direction implied by leaving `from` for `to`; `None` when nothing changes
    pub fn between(from: ExecutionContext, to: ExecutionContext) -> Option<Self> {
        match (from, to) {
            (ExecutionContext::Host, ExecutionContext::Device) => Some(Self::HostToDevice),
            (ExecutionContext::Device, ExecutionContext::Host) => Some(Self::DeviceToHost),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TransferDirection::HostToDevice => "CPU -> GPU",
            TransferDirection::DeviceToHost => "GPU -> CPU",
        }
    }
}

/// Advisory transfer point between two adjacent nodes of a scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferPoint {
    pub from: NodeId,
    pub to: NodeId,
    pub direction: TransferDirection,
}

impl fmt::Display for TransferPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Memory transfer {} between node {} and node {}",
            self.direction.as_str(),
            self.from,
            self.to
        )
    }
}
