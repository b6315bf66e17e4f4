//! Per-function analysis report
//!
//! Serializable summary of what the compiler learned about one function:
//! the flow graph, liveness, use-def chains, dead-code survivors, advisory
//! transfer points and the kernels extracted from it. `Display` renders the
//! plain-text form printed by `boltc --report text`.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::features::data_flow::{Liveness, TransferPoint, UseDefIndex};
use crate::features::flow_graph::{ExecutionContext, FlowGraph, FlowNodeKind, NodeId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeReport {
    pub id: NodeId,
    pub kind: FlowNodeKind,
    pub context: ExecutionContext,
    pub gen: BTreeSet<String>,
    pub kill: BTreeSet<String>,
    pub successors: Vec<NodeId>,
    pub live_in: BTreeSet<String>,
    pub live_out: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionReport {
    pub function: String,
    pub entry: NodeId,
    /// Depth-first pre-order from the entry
    pub nodes: Vec<NodeReport>,
    pub liveness_passes: usize,
    pub use_def: BTreeMap<String, Vec<NodeId>>,
    /// Nodes kept by dead-code elimination, in id order
    pub surviving: Vec<NodeId>,
    pub removed: Vec<NodeId>,
    pub transfers: Vec<TransferPoint>,
    pub kernels: Vec<String>,
}

impl FunctionReport {
    pub fn new(
        graph: &FlowGraph<'_>,
        liveness: &Liveness,
        use_def: &UseDefIndex,
        surviving: Vec<NodeId>,
        transfers: Vec<TransferPoint>,
        kernels: Vec<String>,
    ) -> Self {
        let nodes = graph
            .reachable_order()
            .into_iter()
            .filter_map(|id| graph.node(id))
            .map(|node| {
                let record = liveness.record(node.id).cloned().unwrap_or_default();
                NodeReport {
                    id: node.id,
                    kind: node.kind,
                    context: node.context,
                    gen: node.gen.clone(),
                    kill: node.kill.clone(),
                    successors: node.successors.clone(),
                    live_in: record.live_in,
                    live_out: record.live_out,
                }
            })
            .collect();

        let removed = graph
            .nodes()
            .iter()
            .map(|n| n.id)
            .filter(|id| !surviving.contains(id))
            .collect();

        Self {
            function: graph.function_name.clone(),
            entry: graph.entry(),
            nodes,
            liveness_passes: liveness.passes,
            use_def: use_def
                .iter()
                .map(|(name, defs)| (name.clone(), defs.iter().copied().collect()))
                .collect(),
            surviving,
            removed,
            transfers,
            kernels,
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&NodeReport> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

fn braces(set: &BTreeSet<String>) -> String {
    let items: Vec<&str> = set.iter().map(String::as_str).collect();
    format!("{{{}}}", items.join(", "))
}

fn ids(list: &[NodeId]) -> String {
    let items: Vec<String> = list.iter().map(NodeId::to_string).collect();
    format!("[{}]", items.join(", "))
}

impl fmt::Display for FunctionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Function: {}", self.function)?;

        writeln!(f, "\n-- Control Flow Graph --")?;
        for node in &self.nodes {
            writeln!(
                f,
                "Node {} [{}, {}] GEN: {} KILL: {} -> {}",
                node.id,
                node.kind.as_str(),
                node.context.as_str(),
                braces(&node.gen),
                braces(&node.kill),
                ids(&node.successors)
            )?;
        }

        writeln!(f, "\n-- Liveness Info ({} passes) --", self.liveness_passes)?;
        for node in &self.nodes {
            writeln!(
                f,
                "Node {} IN: {} OUT: {}",
                node.id,
                braces(&node.live_in),
                braces(&node.live_out)
            )?;
        }

        writeln!(f, "\n-- Use-Def Chains --")?;
        for (name, defs) in &self.use_def {
            writeln!(f, "{} defined at nodes: {}", name, ids(defs))?;
        }

        writeln!(f, "\n-- Dead Code Elimination --")?;
        writeln!(f, "Kept: {}", ids(&self.surviving))?;
        writeln!(f, "Removed: {}", ids(&self.removed))?;

        writeln!(f, "\n-- Memory Transfers --")?;
        for point in &self.transfers {
            writeln!(f, "{}", point)?;
        }

        if !self.kernels.is_empty() {
            writeln!(f, "\n-- Kernels --")?;
            for kernel in &self.kernels {
                writeln!(f, "{}", kernel)?;
            }
        }
        Ok(())
    }
}
