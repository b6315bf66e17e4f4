//! Feature modules - Each feature follows Hexagonal Architecture
//!
//! Each feature contains:
//! - domain/         - Pure data (graphs, records, descriptors)
//! - infrastructure/ - Algorithms over the domain types

pub mod data_flow;
pub mod flow_graph;
pub mod kernel_extraction;
