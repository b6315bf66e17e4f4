//! Memory-transfer report
//!
//! Scans nodes in the order given (not necessarily a path through the graph)
//! and reports every adjacent pair whose context differs. Advisory only: the
//! code generator places the real copies around each launch.

use tracing::info;

use crate::features::data_flow::domain::{TransferDirection, TransferPoint};
use crate::features::flow_graph::domain::FlowNode;

pub fn insert_memory_transfers(nodes: &[&FlowNode<'_>]) -> Vec<TransferPoint> {
    let mut points = Vec::new();
    for pair in nodes.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        if let Some(direction) = TransferDirection::between(prev.context, next.context) {
            let point = TransferPoint {
                from: prev.id,
                to: next.id,
                direction,
            };
            info!("{}", point);
            points.push(point);
        }
    }
    points
}
