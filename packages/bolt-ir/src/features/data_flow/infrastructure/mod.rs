//! Dataflow engine

pub mod dead_code;
pub mod liveness;
pub mod transfers;
pub mod use_def;

pub use dead_code::{eliminate_dead_code, eliminate_dead_code_to_fixpoint};
pub use liveness::{perform_liveness, perform_liveness_in_order};
pub use transfers::insert_memory_transfers;
pub use use_def::compute_use_def_chains;
