//! External-variable computation for offload bodies
//!
//! externals = (names read or written in the body)
//!           - (names declared inside the body)
//!           - (thread-index names)
//!
//! A plain identifier on the left of `=` is write-only and not recorded.
//! Order is first-encountered in a pre-order walk, the assignment target's
//! tensor base before the assigned value. The call site and the kernel
//! signature both follow this order.

use rustc_hash::FxHashSet;

use crate::features::flow_graph::for_each_read;
use crate::shared::models::{Expr, Stmt, ThreadDim};

pub fn collect_external_variables(dims: &[ThreadDim], body: &Stmt) -> Vec<String> {
    let mut walk = CaptureWalk::default();
    walk.stmt(body);

    let thread_vars: FxHashSet<&str> = dims.iter().map(|d| d.var.as_str()).collect();
    walk.used
        .into_iter()
        .filter(|name| !walk.declared.contains(name.as_str()))
        .filter(|name| !thread_vars.contains(name.as_str()))
        .collect()
}

#[derive(Default)]
struct CaptureWalk {
    used: Vec<String>,
    seen: FxHashSet<String>,
    declared: FxHashSet<String>,
}

impl CaptureWalk {
    fn use_name(&mut self, name: &str) {
        if self.seen.insert(name.to_string()) {
            self.used.push(name.to_string());
        }
    }

    fn expr(&mut self, expr: &Expr) {
        let mut names = Vec::new();
        for_each_read(expr, &mut |name| names.push(name));
        for name in names {
            self.use_name(name);
        }
    }

    fn stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Empty => {}
            Stmt::Seq(first, second) => {
                self.stmt(first);
                self.stmt(second);
            }
            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                self.expr(cond);
                self.stmt(then_branch);
                if let Some(branch) = else_branch {
                    self.stmt(branch);
                }
            }
            Stmt::While { cond, body } => {
                self.expr(cond);
                self.stmt(body);
            }
            Stmt::Defer { body, .. } => self.stmt(body),
            Stmt::Declare { name, init, .. } => {
                if let Some(init) = init {
                    self.expr(init);
                }
                self.declared.insert(name.clone());
            }
            Stmt::Assign { target, value } => {
                match target {
                    Expr::Ident(_) => {}
                    Expr::Index { base, indices } => {
                        self.expr(base);
                        for index in indices {
                            self.expr(index);
                        }
                    }
                    other => self.expr(other),
                }
                self.expr(value);
            }
            Stmt::Expr(expr) => self.expr(expr),
        }
    }
}
