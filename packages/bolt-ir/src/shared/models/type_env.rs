//! Global name → type environment
//!
//! Produced by the (external) type checker. The code generator consults it as
//! the second tier of a two-tier lookup, after the function-local map of
//! declared names.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::ast::Program;
use super::types::Type;
use crate::errors::{CompileError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypeEnvironment {
    bindings: FxHashMap<String, Type>,
}

impl TypeEnvironment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind every function name to its return type
    pub fn from_program(program: &Program) -> Result<Self> {
        let mut env = Self::new();
        for func in &program.functions {
            env.bind(&func.name, func.return_type.clone())?;
        }
        Ok(env)
    }

    /// Bind a name; a second binding of the same name is rejected
    pub fn bind(&mut self, name: impl Into<String>, ty: Type) -> Result<()> {
        let name = name.into();
        if self.bindings.contains_key(&name) {
            return Err(CompileError::structural(format!(
                "'{}' is already bound in the global type environment",
                name
            )));
        }
        self.bindings.insert(name, ty);
        Ok(())
    }

    /// Bind every name of `other`; fails on the first name bound in both
    pub fn merge(&mut self, other: TypeEnvironment) -> Result<()> {
        let mut incoming: Vec<(String, Type)> = other.bindings.into_iter().collect();
        incoming.sort_by(|a, b| a.0.cmp(&b.0));
        for (name, ty) in incoming {
            self.bind(name, ty)?;
        }
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Type)> {
        self.bindings.iter()
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
