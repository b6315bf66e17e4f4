/*
 * Code Generator
 *
 * Host unit:   includes, prototypes (every function but main), definitions
 * Kernel unit: #pragma once, includes, every collected kernel
 *
 * Functions are emitted one at a time so the caller can interleave analysis
 * per function. Kernels are flushed once, after every host function, since a
 * kernel's definition lives in a separate unit from its first use.
 */

use tracing::{debug, info};

use super::code_writer::CodeWriter;
use super::expressions::{cuda_type, emit_expr, return_type};
use super::kernels::emit_kernel;
use super::launch::KernelCollector;
use super::scope::Scope;
use super::statements::StmtTranspiler;
use crate::config::{LaunchConfig, OutputConfig};
use crate::errors::{CompileError, Result};
use crate::features::kernel_extraction::domain::{ExtractionMode, OffloadRegion};
use crate::shared::models::{FuncDef, Type, TypeEnvironment};

pub struct CodeGenerator<'a> {
    env: &'a TypeEnvironment,
    output: OutputConfig,
    collector: KernelCollector<'a>,
}

impl<'a> CodeGenerator<'a> {
    pub fn new(env: &'a TypeEnvironment, launch: LaunchConfig, output: OutputConfig) -> Self {
        Self {
            env,
            output,
            collector: KernelCollector::new(launch),
        }
    }

    /// `T name(T1 a, T2 b)`
    pub fn signature(&self, func: &FuncDef) -> Result<String> {
        let params = func
            .params
            .iter()
            .map(|p| Ok(format!("{} {}", cuda_type(&p.ty)?, p.name)))
            .collect::<Result<Vec<_>>>()?;
        Ok(format!(
            "{} {}({})",
            return_type(&func.return_type)?,
            func.name,
            params.join(", ")
        ))
    }

    /// `None` for `main`, which gets no prototype
    pub fn prototype(&self, func: &FuncDef) -> Result<Option<String>> {
        if func.is_main() {
            return Ok(None);
        }
        Ok(Some(format!("{};", self.signature(func)?)))
    }

    /// Host definition of one function; its offload regions are collected
    pub fn emit_function(&mut self, func: &'a FuncDef) -> Result<String> {
        self.collector.begin_function();

        let mut scope = Scope::host(self.env);
        for param in &func.params {
            scope.declare(param.name.clone(), param.ty.clone());
        }

        let mut body = CodeWriter::with_depth(1);
        StmtTranspiler::host(&func.name, &mut scope, &mut self.collector)
            .stmt(&mut body, &func.body)?;

        match (&func.return_expr, &func.return_type) {
            (Some(_), Type::Void) => {
                return Err(CompileError::structural(format!(
                    "Function '{}' returns void but has a return expression",
                    func.name
                )));
            }
            (Some(expr), _) => {
                body.line(format!(
                    "return {};",
                    emit_expr(expr, ExtractionMode::Host, &scope)?
                ));
            }
            (None, Type::Void) => body.line("return;"),
            (None, _) => {}
        }

        let mut w = CodeWriter::new();
        w.open(format!("{} {{", self.signature(func)?));
        for buffer in self.collector.device_buffers() {
            for declaration in buffer.declarations() {
                w.line(declaration);
            }
        }
        w.raw(&body.finish());
        w.close("}");

        debug!(
            function = %func.name,
            hoisted_buffers = self.collector.device_buffers().len(),
            "Emitted host function"
        );
        Ok(w.finish())
    }

    /// Assemble the host unit from prototypes and definitions
    pub fn host_unit(&self, prototypes: &[String], definitions: &[String]) -> String {
        let mut w = CodeWriter::new();
        w.line(format!("#include \"{}\"", self.output.runtime_header));
        w.line(format!("#include \"{}\"", self.output.kernel_unit));
        w.blank();
        if !prototypes.is_empty() {
            for prototype in prototypes {
                w.line(prototype);
            }
            w.blank();
        }
        for (i, definition) in definitions.iter().enumerate() {
            if i > 0 {
                w.blank();
            }
            w.raw(definition);
        }
        w.finish()
    }

    /// Every kernel collected so far, as one unit
    pub fn kernel_unit(&self) -> Result<String> {
        let mut w = CodeWriter::new();
        w.line("#pragma once");
        w.line(format!("#include \"{}\"", self.output.runtime_header));
        for region in self.collector.regions() {
            w.blank();
            emit_kernel(&mut w, region)?;
        }
        info!(kernels = self.collector.regions().len(), "Emitted kernel unit");
        Ok(w.finish())
    }

    pub fn regions(&self) -> &[OffloadRegion<'a>] {
        self.collector.regions()
    }

    /// Kernel names extracted from `function`, in emission order
    pub fn kernels_of(&self, function: &str) -> Vec<String> {
        self.collector
            .regions()
            .iter()
            .filter(|r| r.function == function)
            .map(|r| r.kernel_name.clone())
            .collect()
    }
}
