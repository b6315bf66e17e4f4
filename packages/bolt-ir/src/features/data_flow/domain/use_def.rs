//! Use-def index: variable name -> defining nodes

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::features::flow_graph::domain::NodeId;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UseDefIndex {
    chains: BTreeMap<String, BTreeSet<NodeId>>,
}

impl UseDefIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, name: impl Into<String>, at: NodeId) {
        self.chains.entry(name.into()).or_default().insert(at);
    }

    /// Nodes defining `name`; empty when the name is never defined
    pub fn definitions_of(&self, name: &str) -> BTreeSet<NodeId> {
        self.chains.get(name).cloned().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &BTreeSet<NodeId>)> {
        self.chains.iter()
    }

    /// Number of distinct defined names
    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
