//! Two-tier name -> type lookup used during emission
//!
//! Function-local names (parameters and declarations seen so far) shadow the
//! global environment. Kernel bodies have no global tier: everything they see
//! is an external, a thread index, an extent parameter or a local.

use rustc_hash::FxHashMap;

use crate::shared::models::{Type, TypeEnvironment};

#[derive(Debug, Clone, Default)]
pub struct Scope<'a> {
    locals: FxHashMap<String, Type>,
    globals: Option<&'a TypeEnvironment>,
    thread_vars: Vec<String>,
}

impl<'a> Scope<'a> {
    /// Host function scope backed by the global environment
    pub fn host(globals: &'a TypeEnvironment) -> Self {
        Self {
            locals: FxHashMap::default(),
            globals: Some(globals),
            thread_vars: Vec::new(),
        }
    }

    /// Kernel scope: locals only, with the block's thread indices marked read-only
    pub fn kernel(thread_vars: Vec<String>) -> Self {
        let mut scope = Self {
            locals: FxHashMap::default(),
            globals: None,
            thread_vars: Vec::new(),
        };
        for var in &thread_vars {
            scope.declare(var.clone(), Type::int());
        }
        scope.thread_vars = thread_vars;
        scope
    }

    /// Later declarations of the same name replace earlier ones
    pub fn declare(&mut self, name: impl Into<String>, ty: Type) {
        self.locals.insert(name.into(), ty);
    }

    pub fn resolve(&self, name: &str) -> Option<&Type> {
        self.locals
            .get(name)
            .or_else(|| self.globals.and_then(|env| env.lookup(name)))
    }

    pub fn is_tensor(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(Type::is_tensor)
    }

    pub fn is_thread_var(&self, name: &str) -> bool {
        self.thread_vars.iter().any(|v| v == name)
    }
}
