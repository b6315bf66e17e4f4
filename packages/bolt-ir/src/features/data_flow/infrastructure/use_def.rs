//! Use-def chains from kill sets

use crate::features::data_flow::domain::UseDefIndex;
use crate::features::flow_graph::domain::FlowNode;

/// Every name in a node's `kill` is recorded as defined at that node
pub fn compute_use_def_chains(nodes: &[FlowNode<'_>]) -> UseDefIndex {
    let mut index = UseDefIndex::new();
    for node in nodes {
        for name in &node.kill {
            index.record(name.clone(), node.id);
        }
    }
    index
}
