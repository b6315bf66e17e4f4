//! Flow Graph infrastructure

pub mod cfg_builder;
pub mod variable_uses;

pub use cfg_builder::CfgBuilder;
pub use variable_uses::{collect_uses, for_each_read};
