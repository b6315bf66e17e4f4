/*
 * Dead-code elimination
 *
 * A node is dead iff it defines something (kill != {}) and none of what it
 * defines is live after it (kill & out == {}). Guards, expression statements
 * and the exit node have an empty kill and always survive.
 *
 * - eliminate_dead_code: one pass over a finished liveness run
 * - eliminate_dead_code_to_fixpoint: splice, re-run liveness, repeat
 */

use rustc_hash::FxHashSet;
use tracing::debug;

use super::liveness::perform_liveness;
use crate::features::data_flow::domain::Liveness;
use crate::features::flow_graph::domain::{FlowGraph, FlowNode, NodeId};

fn is_dead(node: &FlowNode<'_>, liveness: &Liveness) -> bool {
    if !node.is_definition() {
        return false;
    }
    match liveness.live_out(node.id) {
        Some(out) => node.kill.is_disjoint(out),
        None => true,
    }
}

/// Surviving node ids, in input order
pub fn eliminate_dead_code(nodes: &[FlowNode<'_>], liveness: &Liveness) -> Vec<NodeId> {
    let mut kept = Vec::with_capacity(nodes.len());
    for node in nodes {
        if is_dead(node, liveness) {
            debug!(node = %node.id, kill = ?node.kill, "Dead definition removed");
        } else {
            kept.push(node.id);
        }
    }
    kept
}

/// Surviving node ids after removals stop exposing new dead definitions
pub fn eliminate_dead_code_to_fixpoint(graph: &FlowGraph<'_>) -> Vec<NodeId> {
    let mut current = graph.clone();
    let mut rounds = 0;

    loop {
        rounds += 1;
        let liveness = perform_liveness(&current);
        let removed: FxHashSet<NodeId> = current
            .nodes()
            .iter()
            .filter(|n| is_dead(n, &liveness))
            .map(|n| n.id)
            .collect();

        if removed.is_empty() {
            break;
        }
        debug!(round = rounds, removed = removed.len(), "Splicing dead definitions");
        current = current.without(&removed);
    }

    current.nodes().iter().map(|n| n.id).collect()
}
