// Dataflow analysis over flow graphs
//
// - domain: liveness records, use-def index, transfer points
// - infrastructure: fixpoint liveness, use-def, dead-code elimination, transfer report

pub mod domain;
pub mod infrastructure;

pub use domain::{Liveness, LivenessRecord, TransferDirection, TransferPoint, UseDefIndex};
pub use infrastructure::*;
