//! Statement transpiler shared by host functions and kernel bodies
//!
//! Host mode hands every offload block to the [`KernelCollector`]; device mode
//! has no collector, so an offload block there is the illegal
//! Device -> Device transition.

use super::code_writer::CodeWriter;
use super::expressions::{
    cuda_type, device_target, emit_expr, emit_list, emit_tensor_literal,
};
use super::launch::KernelCollector;
use super::scope::Scope;
use crate::errors::{CompileError, Result};
use crate::features::kernel_extraction::domain::ExtractionMode;
use crate::shared::models::{Expr, Stmt};

pub struct StmtTranspiler<'s, 'a> {
    mode: ExtractionMode,
    function: &'s str,
    /// Kernel being emitted (device mode only)
    kernel: Option<&'s str>,
    scope: &'s mut Scope<'a>,
    collector: Option<&'s mut KernelCollector<'a>>,
}

impl<'s, 'a> StmtTranspiler<'s, 'a> {
    pub fn host(
        function: &'s str,
        scope: &'s mut Scope<'a>,
        collector: &'s mut KernelCollector<'a>,
    ) -> Self {
        Self {
            mode: ExtractionMode::Host,
            function,
            kernel: None,
            scope,
            collector: Some(collector),
        }
    }

    pub fn device(function: &'s str, kernel: &'s str, scope: &'s mut Scope<'a>) -> Self {
        Self {
            mode: ExtractionMode::Device,
            function,
            kernel: Some(kernel),
            scope,
            collector: None,
        }
    }

    pub fn stmt(&mut self, w: &mut CodeWriter, stmt: &'a Stmt) -> Result<()> {
        match stmt {
            Stmt::Empty => Ok(()),

            Stmt::Seq(first, second) => {
                self.stmt(w, first)?;
                self.stmt(w, second)
            }

            Stmt::If {
                cond,
                then_branch,
                else_branch,
            } => {
                w.open(format!("if ({}) {{", self.expr(cond)?));
                self.stmt(w, then_branch)?;
                match else_branch {
                    Some(branch) => {
                        w.reopen("} else {");
                        self.stmt(w, branch)?;
                        w.close("}");
                    }
                    None => w.close("}"),
                }
                Ok(())
            }

            Stmt::While { cond, body } => {
                w.open(format!("while ({}) {{", self.expr(cond)?));
                self.stmt(w, body)?;
                w.close("}");
                Ok(())
            }

            Stmt::Defer { dims, body } => {
                let Some(device) = self.mode.enter_offload() else {
                    return Err(CompileError::NestedOffload {
                        function: self.function.to_string(),
                        kernel: self.kernel.unwrap_or_default().to_string(),
                    });
                };
                let Some(collector) = self.collector.as_deref_mut() else {
                    return Err(CompileError::structural(
                        "Offload block reached without a kernel collector",
                    ));
                };
                self.mode = device;
                let launched = collector.launch(w, self.function, dims, body, self.scope);
                self.mode = self.mode.leave_offload();
                launched
            }

            Stmt::Declare { ty, name, init } => {
                if self.mode.is_device() && ty.is_tensor() {
                    return Err(CompileError::structural(format!(
                        "Tensor '{}' cannot be declared inside an offload block",
                        name
                    )));
                }
                let spelled = cuda_type(ty)?;
                let line = match init {
                    None => format!("{} {};", spelled, name),
                    Some(literal @ Expr::TensorLiteral(_)) => format!(
                        "{} {} = {};",
                        spelled,
                        name,
                        emit_tensor_literal(literal, ty, self.mode, self.scope)?
                    ),
                    Some(init) => format!("{} {} = {};", spelled, name, self.expr(init)?),
                };
                self.scope.declare(name.clone(), ty.clone());
                w.line(line);
                Ok(())
            }

            Stmt::Assign { target, value } => {
                let line = self.assignment(target, value)?;
                w.line(line);
                Ok(())
            }

            Stmt::Expr(expr) => {
                w.line(format!("{};", self.expr(expr)?));
                Ok(())
            }
        }
    }

    fn expr(&self, expr: &Expr) -> Result<String> {
        emit_expr(expr, self.mode, self.scope)
    }

    fn assignment(&self, target: &Expr, value: &Expr) -> Result<String> {
        match target {
            Expr::Ident(name) => {
                if self.mode.is_device() && self.scope.is_thread_var(name) {
                    return Err(CompileError::structural(format!(
                        "Thread index '{}' cannot be assigned inside an offload block",
                        name
                    )));
                }
                let rhs = match value {
                    Expr::TensorLiteral(_) => {
                        let Some(ty) = self.scope.resolve(name) else {
                            return Err(CompileError::structural(format!(
                                "Tensor literal assigned to '{}', which has no known type",
                                name
                            )));
                        };
                        emit_tensor_literal(value, ty, self.mode, self.scope)?
                    }
                    other => self.expr(other)?,
                };
                Ok(format!("{} = {};", name, rhs))
            }

            Expr::Index { base, indices } => match self.mode {
                ExtractionMode::Host => Ok(format!(
                    "{}.setAt({{{}}}, {});",
                    self.expr(base)?,
                    emit_list(indices, self.mode, self.scope)?,
                    self.expr(value)?
                )),
                ExtractionMode::Device => {
                    let (tensor, rank) = device_target(base, indices)?;
                    let mut args = vec![format!("{}_data", tensor)];
                    for index in indices {
                        args.push(self.expr(index)?);
                    }
                    if rank >= 2 {
                        args.push(format!("{}_dims", tensor));
                    }
                    args.push(self.expr(value)?);
                    Ok(format!("tensor_setAt_{}d({});", rank, args.join(", ")))
                }
            },

            _ => Err(CompileError::structural(
                "Assignment target must be an identifier or an indexed tensor access",
            )),
        }
    }
}
