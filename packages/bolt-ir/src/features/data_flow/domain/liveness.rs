//! Liveness results

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::features::flow_graph::domain::NodeId;

/// Live-variable sets at the entry (`live_in`) and exit (`live_out`) of one node
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LivenessRecord {
    pub live_in: BTreeSet<String>,
    pub live_out: BTreeSet<String>,
}

/// Fixpoint of one liveness run, keyed by node id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Liveness {
    pub records: BTreeMap<NodeId, LivenessRecord>,
    /// Full passes executed, including the final pass that changed nothing
    pub passes: usize,
}

impl Liveness {
    pub fn record(&self, id: NodeId) -> Option<&LivenessRecord> {
        self.records.get(&id)
    }

    pub fn live_in(&self, id: NodeId) -> Option<&BTreeSet<String>> {
        self.records.get(&id).map(|r| &r.live_in)
    }

    pub fn live_out(&self, id: NodeId) -> Option<&BTreeSet<String>> {
        self.records.get(&id).map(|r| &r.live_out)
    }

    /// Same fixpoint, ignoring how many passes it took
    pub fn same_sets(&self, other: &Liveness) -> bool {
        self.records == other.records
    }
}
