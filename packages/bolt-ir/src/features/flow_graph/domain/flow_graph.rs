//! Flow graph - arena of [`FlowNode`]s for one function
//!
//! Nodes are owned by the graph and addressed by [`NodeId`]. A freshly built
//! graph has `nodes[i].id == i`; graphs derived with [`FlowGraph::without`]
//! keep the surviving ids, so lookups go through a binary search on the
//! (always ascending) id order.

use petgraph::dot::{Config, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::{FxHashMap, FxHashSet};

use super::flow_node::{FlowNode, NodeId};

#[derive(Debug, Clone)]
pub struct FlowGraph<'a> {
    pub function_name: String,
    nodes: Vec<FlowNode<'a>>,
    entry: NodeId,
    exit: NodeId,
}

impl<'a> FlowGraph<'a> {
    /// Assemble a graph. `nodes` must be sorted by id and contain `entry` and `exit`.
    pub fn new(
        function_name: impl Into<String>,
        nodes: Vec<FlowNode<'a>>,
        entry: NodeId,
        exit: NodeId,
    ) -> Self {
        debug_assert!(nodes.windows(2).all(|w| w[0].id < w[1].id));
        Self {
            function_name: function_name.into(),
            nodes,
            entry,
            exit,
        }
    }

    pub fn entry(&self) -> NodeId {
        self.entry
    }

    /// Synthetic terminal node
    pub fn exit(&self) -> NodeId {
        self.exit
    }

    pub fn nodes(&self) -> &[FlowNode<'a>] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&FlowNode<'a>> {
        self.nodes
            .binary_search_by_key(&id, |n| n.id)
            .ok()
            .map(|pos| &self.nodes[pos])
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Depth-first pre-order from the entry, successors visited in edge order
    pub fn reachable_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut seen = FxHashSet::default();
        let mut stack = vec![self.entry];

        while let Some(id) = stack.pop() {
            if !seen.insert(id) {
                continue;
            }
            order.push(id);
            if let Some(node) = self.node(id) {
                for succ in node.successors.iter().rev() {
                    if !seen.contains(succ) {
                        stack.push(*succ);
                    }
                }
            }
        }

        order
    }

    /// Copy of this graph with `removed` spliced out
    ///
    /// Every edge into a removed node is redirected to that node's
    /// (transitively resolved) successors. The exit node is never removed.
    pub fn without(&self, removed: &FxHashSet<NodeId>) -> FlowGraph<'a> {
        let mut resolved: FxHashMap<NodeId, Vec<NodeId>> = FxHashMap::default();

        let mut nodes = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if removed.contains(&node.id) && node.id != self.exit {
                continue;
            }
            let mut kept = node.clone();
            kept.successors.clear();
            for succ in &node.successors {
                for target in self.resolve(*succ, removed, &mut resolved) {
                    kept.add_successor(target);
                }
            }
            nodes.push(kept);
        }

        let entry = if removed.contains(&self.entry) && self.entry != self.exit {
            self.resolve(self.entry, removed, &mut resolved)
                .first()
                .copied()
                .unwrap_or(self.exit)
        } else {
            self.entry
        };

        FlowGraph::new(self.function_name.clone(), nodes, entry, self.exit)
    }

    fn resolve(
        &self,
        id: NodeId,
        removed: &FxHashSet<NodeId>,
        cache: &mut FxHashMap<NodeId, Vec<NodeId>>,
    ) -> Vec<NodeId> {
        if !removed.contains(&id) || id == self.exit {
            return vec![id];
        }
        if let Some(hit) = cache.get(&id) {
            return hit.clone();
        }

        let mut targets = Vec::new();
        let mut seen = FxHashSet::default();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                continue;
            }
            if !removed.contains(&current) || current == self.exit {
                if !targets.contains(&current) {
                    targets.push(current);
                }
                continue;
            }
            if let Some(node) = self.node(current) {
                stack.extend(node.successors.iter().rev().copied());
            }
        }

        cache.insert(id, targets.clone());
        targets
    }

    /// petgraph view, one vertex per node labelled with its id and kind
    pub fn to_petgraph(&self) -> DiGraph<String, &'static str> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), self.nodes.len());
        let mut index: FxHashMap<NodeId, NodeIndex> = FxHashMap::default();

        for node in &self.nodes {
            let label = format!(
                "{} {} [{}] gen={:?} kill={:?}",
                node.id,
                node.kind.as_str(),
                node.context.as_str(),
                node.gen,
                node.kill
            );
            index.insert(node.id, graph.add_node(label));
        }
        for node in &self.nodes {
            for succ in &node.successors {
                if let (Some(&from), Some(&to)) = (index.get(&node.id), index.get(succ)) {
                    graph.add_edge(from, to, "");
                }
            }
        }

        graph
    }

    /// Graphviz rendering
    pub fn to_dot(&self) -> String {
        let graph = self.to_petgraph();
        format!("{}", Dot::with_config(&graph, &[Config::EdgeNoLabel]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::flow_graph::domain::{ExecutionContext, FlowNodeKind};

    fn node(id: usize, kind: FlowNodeKind, kill: &[&str], succ: &[usize]) -> FlowNode<'static> {
        let mut n = FlowNode::new(NodeId(id), None, kind, ExecutionContext::Host);
        n.kill = kill.iter().map(|s| s.to_string()).collect();
        for s in succ {
            n.add_successor(NodeId(*s));
        }
        n
    }

    /// 0 -> 1 -> 2(loop) -> {3 -> 2, 4(exit)}
    fn sample() -> FlowGraph<'static> {
        FlowGraph::new(
            "f",
            vec![
                node(0, FlowNodeKind::Declaration, &["a"], &[1]),
                node(1, FlowNodeKind::Declaration, &["b"], &[2]),
                node(2, FlowNodeKind::Loop, &[], &[3, 4]),
                node(3, FlowNodeKind::Assignment, &["b"], &[2]),
                node(4, FlowNodeKind::Exit, &[], &[]),
            ],
            NodeId(0),
            NodeId(4),
        )
    }

    #[test]
    fn test_reachable_order_is_preorder() {
        let graph = sample();
        assert_eq!(
            graph.reachable_order(),
            vec![NodeId(0), NodeId(1), NodeId(2), NodeId(3), NodeId(4)]
        );
    }

    #[test]
    fn test_without_redirects_edges_and_entry() {
        let graph = sample();
        let removed: FxHashSet<NodeId> = [NodeId(0), NodeId(3)].into_iter().collect();
        let spliced = graph.without(&removed);

        assert_eq!(spliced.len(), 3);
        assert_eq!(spliced.entry(), NodeId(1));
        assert!(spliced.node(NodeId(3)).is_none());
        let guard = spliced.node(NodeId(2)).unwrap();
        // back-edge through the removed node collapses onto the guard itself
        assert_eq!(guard.successors, vec![NodeId(2), NodeId(4)]);
    }

    #[test]
    fn test_dot_export_has_every_edge() {
        let graph = sample();
        let pg = graph.to_petgraph();
        assert_eq!(pg.node_count(), 5);
        assert_eq!(pg.edge_count(), 5);
        let dot = graph.to_dot();
        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("Loop"));
        assert_eq!(dot.matches(" -> ").count(), 5);
    }
}
