/*
 * Liveness Analysis
 *
 * Backward may-analysis over a (possibly cyclic) flow graph:
 *   out(n) = U in(s) for every successor s
 *   in(n)  = gen(n) U (out(n) - kill(n))
 *
 * Full passes repeat until no record changes. Sets only grow and are bounded
 * by the finite variable universe, so the loop terminates without a cap.
 * Visiting order changes the pass count, never the fixpoint.
 */

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use tracing::debug;

use crate::features::data_flow::domain::{Liveness, LivenessRecord};
use crate::features::flow_graph::domain::{FlowGraph, FlowNode, NodeId};

/// Liveness with nodes visited in reverse id order
pub fn perform_liveness(graph: &FlowGraph<'_>) -> Liveness {
    let order: Vec<NodeId> = graph.nodes().iter().rev().map(|n| n.id).collect();
    run(graph.nodes(), &order)
}

/// Liveness with nodes visited in `order` within each pass
///
/// Ids unknown to the graph are skipped; nodes missing from `order` are
/// visited after the listed ones.
pub fn perform_liveness_in_order(graph: &FlowGraph<'_>, order: &[NodeId]) -> Liveness {
    let mut full: Vec<NodeId> = Vec::with_capacity(graph.len());
    for id in order {
        if graph.node(*id).is_some() && !full.contains(id) {
            full.push(*id);
        }
    }
    for node in graph.nodes() {
        if !full.contains(&node.id) {
            full.push(node.id);
        }
    }
    run(graph.nodes(), &full)
}

fn run(nodes: &[FlowNode<'_>], order: &[NodeId]) -> Liveness {
    let position: FxHashMap<NodeId, usize> =
        nodes.iter().enumerate().map(|(pos, n)| (n.id, pos)).collect();
    let mut records: Vec<LivenessRecord> = vec![LivenessRecord::default(); nodes.len()];

    let mut passes = 0;
    loop {
        passes += 1;
        let mut changed = false;

        for id in order {
            let Some(&pos) = position.get(id) else {
                continue;
            };
            let node = &nodes[pos];

            let mut live_out = BTreeSet::new();
            for succ in &node.successors {
                if let Some(&succ_pos) = position.get(succ) {
                    live_out.extend(records[succ_pos].live_in.iter().cloned());
                }
            }

            let mut live_in = node.gen.clone();
            live_in.extend(live_out.difference(&node.kill).cloned());

            let record = &mut records[pos];
            if record.live_in != live_in || record.live_out != live_out {
                record.live_in = live_in;
                record.live_out = live_out;
                changed = true;
            }
        }

        if !changed {
            break;
        }
    }

    debug!(nodes = nodes.len(), passes, "Liveness reached fixpoint");

    Liveness {
        records: nodes.iter().map(|n| n.id).zip(records).collect(),
        passes,
    }
}
