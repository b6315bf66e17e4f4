// Flow graph construction
//
// - domain: FlowNode / FlowGraph arena with host/device context tags
// - infrastructure: statement tree -> CFG builder, variable-read collection

pub mod domain;
pub mod infrastructure;

pub use domain::{ExecutionContext, FlowGraph, FlowNode, FlowNodeKind, NodeId};
pub use infrastructure::{collect_uses, for_each_read, CfgBuilder};
