//! Compiler driver
//!
//! Per function: CFG -> liveness -> use-def -> dead-code -> transfer report ->
//! host code. Kernels for the whole program are flushed once at the end.
//! Compilation is fail-fast: the first error aborts and is returned as-is.

use rustc_hash::FxHashSet;
use std::path::{Path, PathBuf};
use tracing::info;

use super::report::FunctionReport;
use crate::config::{CompilerConfig, DeadCodePolicy};
use crate::errors::{CompileError, Result};
use crate::features::data_flow::{
    compute_use_def_chains, eliminate_dead_code, eliminate_dead_code_to_fixpoint,
    insert_memory_transfers, perform_liveness,
};
use crate::features::flow_graph::{CfgBuilder, FlowNode};
use crate::features::kernel_extraction::CodeGenerator;
use crate::shared::models::{FuncDef, Program, TypeEnvironment};

/// Everything one compilation produces
#[derive(Debug, Clone)]
pub struct CompilationOutput {
    pub host_unit_name: String,
    pub host_unit: String,
    pub kernel_unit_name: String,
    pub kernel_unit: String,
    pub reports: Vec<FunctionReport>,
    /// (function name, Graphviz text) per function
    pub flow_graphs: Vec<(String, String)>,
}

impl CompilationOutput {
    pub fn report(&self, function: &str) -> Option<&FunctionReport> {
        self.reports.iter().find(|r| r.function == function)
    }

    /// Write both units into `dir`, returning the written paths
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let host = dir.join(&self.host_unit_name);
        std::fs::write(&host, &self.host_unit)?;
        let kernels = dir.join(&self.kernel_unit_name);
        std::fs::write(&kernels, &self.kernel_unit)?;

        info!(dir = %dir.display(), "Wrote compilation units");
        Ok(vec![host, kernels])
    }
}

pub struct Compiler<'e> {
    config: CompilerConfig,
    env: &'e TypeEnvironment,
}

impl<'e> Compiler<'e> {
    pub fn new(config: CompilerConfig, env: &'e TypeEnvironment) -> Self {
        Self { config, env }
    }

    pub fn config(&self) -> &CompilerConfig {
        &self.config
    }

    pub fn compile(&self, program: &Program) -> Result<CompilationOutput> {
        self.config.validate()?;

        let mut names = FxHashSet::default();
        for func in &program.functions {
            if !names.insert(func.name.as_str()) {
                return Err(CompileError::structural(format!(
                    "Function '{}' is defined more than once",
                    func.name
                )));
            }
        }

        info!(functions = program.functions.len(), "Compiling program");

        let mut codegen = CodeGenerator::new(
            self.env,
            self.config.launch.clone(),
            self.config.output.clone(),
        );

        let mut prototypes = Vec::new();
        for func in &program.functions {
            if let Some(prototype) = codegen.prototype(func)? {
                prototypes.push(prototype);
            }
        }

        let mut definitions = Vec::with_capacity(program.functions.len());
        let mut reports = Vec::with_capacity(program.functions.len());
        let mut flow_graphs = Vec::with_capacity(program.functions.len());
        for func in &program.functions {
            definitions.push(codegen.emit_function(func)?);
            let (report, dot) = self.analyse(func, codegen.kernels_of(&func.name));
            reports.push(report);
            flow_graphs.push((func.name.clone(), dot));
        }

        let kernel_unit = codegen.kernel_unit()?;
        let host_unit = codegen.host_unit(&prototypes, &definitions);

        info!(
            functions = reports.len(),
            kernels = codegen.regions().len(),
            "Compilation finished"
        );

        Ok(CompilationOutput {
            host_unit_name: self.config.output.host_unit.clone(),
            host_unit,
            kernel_unit_name: self.config.output.kernel_unit.clone(),
            kernel_unit,
            reports,
            flow_graphs,
        })
    }

    /// Dataflow analyses of one function (total: no error conditions)
    pub fn analyse(&self, func: &FuncDef, kernels: Vec<String>) -> (FunctionReport, String) {
        let graph = CfgBuilder::build(func);
        let liveness = perform_liveness(&graph);
        let use_def = compute_use_def_chains(graph.nodes());

        let surviving = match self.config.dead_code {
            DeadCodePolicy::SinglePass => eliminate_dead_code(graph.nodes(), &liveness),
            DeadCodePolicy::Fixpoint => eliminate_dead_code_to_fixpoint(&graph),
        };

        let ordered: Vec<&FlowNode<'_>> = graph
            .reachable_order()
            .into_iter()
            .filter_map(|id| graph.node(id))
            .collect();
        let transfers = insert_memory_transfers(&ordered);

        info!(
            function = %func.name,
            nodes = graph.len(),
            removed = graph.len() - surviving.len(),
            transfers = transfers.len(),
            "Analysed function"
        );

        let report = FunctionReport::new(&graph, &liveness, &use_def, surviving, transfers, kernels);
        (report, graph.to_dot())
    }
}
