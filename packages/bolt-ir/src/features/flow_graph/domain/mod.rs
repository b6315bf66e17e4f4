//! Flow graph domain types

pub mod flow_graph;
pub mod flow_node;

pub use flow_graph::FlowGraph;
pub use flow_node::{ExecutionContext, FlowNode, FlowNodeKind, NodeId};
