//! Flow node - one atomic unit of execution in a function's CFG

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::shared::models::Stmt;

/// Node identifier, unique within one function compilation (starts at 0)
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct NodeId(pub usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Execution domain of a node, fixed at construction from lexical nesting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionContext {
    #[default]
    Host,
    Device,
}

impl ExecutionContext {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExecutionContext::Host => "host",
            ExecutionContext::Device => "device",
        }
    }

    pub fn is_device(&self) -> bool {
        matches!(self, ExecutionContext::Device)
    }
}

/// What a node stands for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowNodeKind {
    Declaration,
    Assignment,
    /// `if` guard
    Branch,
    /// `while` guard
    Loop,
    /// Expression statement
    Expression,
    /// Synthetic function exit carrying the return expression's reads
    Exit,
}

impl FlowNodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlowNodeKind::Declaration => "Declaration",
            FlowNodeKind::Assignment => "Assignment",
            FlowNodeKind::Branch => "Branch",
            FlowNodeKind::Loop => "Loop",
            FlowNodeKind::Expression => "Expression",
            FlowNodeKind::Exit => "Exit",
        }
    }
}

/// CFG node
///
/// `stmt` borrows the originating statement (the exit node has none).
/// Successors are arena indices, so loops can point backwards freely.
#[derive(Debug, Clone)]
pub struct FlowNode<'a> {
    pub id: NodeId,
    pub stmt: Option<&'a Stmt>,
    pub kind: FlowNodeKind,
    /// Variables read before being (re)defined here
    pub gen: BTreeSet<String>,
    /// Variables (re)defined here
    pub kill: BTreeSet<String>,
    pub context: ExecutionContext,
    pub successors: Vec<NodeId>,
}

impl<'a> FlowNode<'a> {
    pub fn new(
        id: NodeId,
        stmt: Option<&'a Stmt>,
        kind: FlowNodeKind,
        context: ExecutionContext,
    ) -> Self {
        Self {
            id,
            stmt,
            kind,
            gen: BTreeSet::new(),
            kill: BTreeSet::new(),
            context,
            successors: Vec::new(),
        }
    }

    /// Append an edge; repeated edges to the same target are collapsed
    pub fn add_successor(&mut self, target: NodeId) {
        if !self.successors.contains(&target) {
            self.successors.push(target);
        }
    }

    /// True if this node (re)defines at least one variable
    pub fn is_definition(&self) -> bool {
        !self.kill.is_empty()
    }
}
