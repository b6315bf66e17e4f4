/*
 * CFG Builder
 *
 * Structured statement tree -> flow graph of atomic nodes.
 *
 * Each statement kind builds a fragment (entry + open tails) and the
 * fragments are wired together bottom-up:
 * - Seq:     tails of the first half -> entry of the second half
 * - If:      guard -> then/else entries; a missing branch leaves the guard as a tail
 * - While:   guard -> body entry, body tails -> guard; the guard is the only tail
 * - Defer:   body nodes are tagged Device, then the previous tag is restored
 * - Declare/Assign/Expr: exactly one node
 *
 * Function exit is a synthetic node every remaining tail flows into.
 */

use tracing::debug;

use super::variable_uses::collect_uses;
use crate::features::flow_graph::domain::{
    ExecutionContext, FlowGraph, FlowNode, FlowNodeKind, NodeId,
};
use crate::shared::models::{Expr, FuncDef, Stmt};

/// Partially built subgraph
#[derive(Debug, Default)]
struct Fragment {
    entry: Option<NodeId>,
    tails: Vec<NodeId>,
}

impl Fragment {
    fn single(id: NodeId) -> Self {
        Self {
            entry: Some(id),
            tails: vec![id],
        }
    }
}

/// Builds one [`FlowGraph`] per function
///
/// Every build starts a fresh id space at 0 in host context.
pub struct CfgBuilder<'a> {
    nodes: Vec<FlowNode<'a>>,
    context: ExecutionContext,
}

impl<'a> CfgBuilder<'a> {
    pub fn build(func: &'a FuncDef) -> FlowGraph<'a> {
        let mut builder = CfgBuilder {
            nodes: Vec::new(),
            context: ExecutionContext::Host,
        };

        let body = builder.build_stmt(&func.body);

        let exit = builder.push(None, FlowNodeKind::Exit);
        if let Some(expr) = &func.return_expr {
            collect_uses(expr, &mut builder.nodes[exit.index()].gen);
        }
        builder.connect(&body.tails, exit);

        let entry = body.entry.unwrap_or(exit);
        debug!(
            function = %func.name,
            nodes = builder.nodes.len(),
            entry = %entry,
            "Built flow graph"
        );

        FlowGraph::new(func.name.clone(), builder.nodes, entry, exit)
    }

    fn push(&mut self, stmt: Option<&'a Stmt>, kind: FlowNodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(FlowNode::new(id, stmt, kind, self.context));
        id
    }

    fn connect(&mut self, tails: &[NodeId], target: NodeId) {
        for tail in tails {
            self.nodes[tail.index()].add_successor(target);
        }
    }

    fn build_stmt(&mut self, stmt: &'a Stmt) -> Fragment {
        match stmt {
            Stmt::Empty => Fragment::default(),

            Stmt::Seq(first, second) => {
                let first = self.build_stmt(first);
                let second = self.build_stmt(second);
                match (first.entry, second.entry) {
                    (None, _) => second,
                    (_, None) => first,
                    (Some(_), Some(second_entry)) => {
                        self.connect(&first.tails, second_entry);
                        Fragment {
                            entry: first.entry,
                            tails: second.tails,
                        }
                    }
                }
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                let guard = self.push(Some(stmt), FlowNodeKind::Branch);
                collect_uses(cond, &mut self.nodes[guard.index()].gen);

                let mut tails = Vec::new();
                let then_frag = self.build_stmt(then_branch);
                self.attach_branch(guard, then_frag, &mut tails);
                let else_frag = match else_branch {
                    Some(branch) => self.build_stmt(branch),
                    None => Fragment::default(),
                };
                self.attach_branch(guard, else_frag, &mut tails);

                Fragment {
                    entry: Some(guard),
                    tails,
                }
            }

            Stmt::While { cond, body } => {
                let guard = self.push(Some(stmt), FlowNodeKind::Loop);
                collect_uses(cond, &mut self.nodes[guard.index()].gen);

                let body = self.build_stmt(body);
                match body.entry {
                    Some(entry) => {
                        self.nodes[guard.index()].add_successor(entry);
                        self.connect(&body.tails, guard);
                    }
                    None => self.nodes[guard.index()].add_successor(guard),
                }

                Fragment::single(guard)
            }

            Stmt::Defer { body, .. } => {
                let saved = self.context;
                self.context = ExecutionContext::Device;
                let fragment = self.build_stmt(body);
                self.context = saved;
                fragment
            }

            Stmt::Declare { name, init, .. } => {
                let id = self.push(Some(stmt), FlowNodeKind::Declaration);
                let node = &mut self.nodes[id.index()];
                node.kill.insert(name.clone());
                if let Some(init) = init {
                    collect_uses(init, &mut node.gen);
                }
                Fragment::single(id)
            }

            Stmt::Assign { target, value } => {
                let id = self.push(Some(stmt), FlowNodeKind::Assignment);
                let node = &mut self.nodes[id.index()];
                match target {
                    Expr::Ident(name) => {
                        node.kill.insert(name.clone());
                    }
                    Expr::Index { base, indices } => {
                        // element write redefines the whole tensor
                        if let Some(name) = base.as_ident() {
                            node.kill.insert(name.to_string());
                        }
                        for index in indices {
                            collect_uses(index, &mut node.gen);
                        }
                    }
                    other => collect_uses(other, &mut node.gen),
                }
                collect_uses(value, &mut node.gen);
                Fragment::single(id)
            }

            Stmt::Expr(expr) => {
                let id = self.push(Some(stmt), FlowNodeKind::Expression);
                collect_uses(expr, &mut self.nodes[id.index()].gen);
                Fragment::single(id)
            }
        }
    }

    /// Wire `guard` to a branch, or keep the guard open when the branch is empty
    fn attach_branch(&mut self, guard: NodeId, branch: Fragment, tails: &mut Vec<NodeId>) {
        match branch.entry {
            Some(entry) => {
                self.nodes[guard.index()].add_successor(entry);
                for tail in branch.tails {
                    if !tails.contains(&tail) {
                        tails.push(tail);
                    }
                }
            }
            None => {
                if !tails.contains(&guard) {
                    tails.push(guard);
                }
            }
        }
    }
}
