//! Dataflow domain model

pub mod liveness;
pub mod transfer;
pub mod use_def;

pub use liveness::{Liveness, LivenessRecord};
pub use transfer::{TransferDirection, TransferPoint};
pub use use_def::UseDefIndex;
