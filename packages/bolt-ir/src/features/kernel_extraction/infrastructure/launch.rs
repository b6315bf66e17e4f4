/*
 * Offload call sites
 *
 * For each offload block met on the host side:
 * 1. name the kernel and compute its externals
 * 2. copy every tensor external to the device (payload + shape)
 * 3. compute launch geometry and launch, then synchronize
 * 4. copy tensor payloads back, free both device buffers, reset the pointers
 *
 * Device buffer declarations are hoisted into the function prologue, once per
 * name, so a block executed repeatedly (inside a host loop) reallocates into
 * the same nulled pointers instead of redeclaring them.
 */

use tracing::{debug, info, warn};

use super::captures::collect_external_variables;
use super::code_writer::CodeWriter;
use super::expressions::tensor_element;
use super::scope::Scope;
use crate::config::LaunchConfig;
use crate::errors::{CompileError, Result};
use crate::features::kernel_extraction::domain::{
    ExternalVariable, KernelNameGenerator, OffloadRegion,
};
use crate::shared::models::{ScalarType, SizeParam, Stmt, ThreadDim};

const AXES: [&str; 3] = ["x", "y", "z"];

/// Hoisted device buffer pair for one tensor external
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceBuffer {
    pub name: String,
    pub element: ScalarType,
}

impl DeviceBuffer {
    pub fn declarations(&self) -> [String; 2] {
        [
            format!("{}* d_{}_data = nullptr;", self.element.as_str(), self.name),
            format!("int* d_{}_dims = nullptr;", self.name),
        ]
    }
}

/// Program-wide kernel state plus the per-function buffer list
#[derive(Debug)]
pub struct KernelCollector<'a> {
    launch: LaunchConfig,
    names: KernelNameGenerator,
    regions: Vec<OffloadRegion<'a>>,
    buffers: Vec<DeviceBuffer>,
}

impl<'a> KernelCollector<'a> {
    pub fn new(launch: LaunchConfig) -> Self {
        Self {
            launch,
            names: KernelNameGenerator::new(),
            regions: Vec::new(),
            buffers: Vec::new(),
        }
    }

    /// Reset per-function state; names and regions carry over
    pub fn begin_function(&mut self) {
        self.buffers.clear();
    }

    /// Buffers to hoist into the current function's prologue
    pub fn device_buffers(&self) -> &[DeviceBuffer] {
        &self.buffers
    }

    pub fn regions(&self) -> &[OffloadRegion<'a>] {
        &self.regions
    }

    /// Extract one offload block and emit its host-side call sequence
    pub fn launch(
        &mut self,
        w: &mut CodeWriter,
        function: &str,
        dims: &'a [ThreadDim],
        body: &'a Stmt,
        scope: &Scope<'_>,
    ) -> Result<()> {
        let Some(cap) = self.launch.cap_for(dims.len()) else {
            return Err(CompileError::structural(format!(
                "Offload block in '{}' has {} dimensions; 1 to 3 are supported",
                function,
                dims.len()
            )));
        };
        if body.contains_defer() {
            return Err(CompileError::NestedOffload {
                function: function.to_string(),
                kernel: self.names.peek(),
            });
        }

        let kernel = self.names.next_name();

        let mut externals = Vec::new();
        for name in collect_external_variables(dims, body) {
            let Some(ty) = scope.resolve(&name) else {
                return Err(CompileError::UnresolvedCapture {
                    function: function.to_string(),
                    kernel,
                    variable: name,
                });
            };
            tensor_element(ty)?;
            externals.push(ExternalVariable {
                name,
                ty: ty.clone(),
            });
        }

        let mut extent_params: Vec<String> = Vec::new();
        for dim in dims {
            match &dim.extent {
                SizeParam::Ident(name) => {
                    if !externals.iter().any(|e| &e.name == name) && !extent_params.contains(name) {
                        extent_params.push(name.clone());
                    }
                }
                SizeParam::Int(n) if *n <= 0 => {
                    warn!(kernel = %kernel, var = %dim.var, extent = n, "Offload axis has no iterations");
                }
                SizeParam::Int(_) => {}
            }
        }

        self.emit_copies_in(w, &externals)?;
        emit_geometry(w, &kernel, dims, cap);
        emit_launch(w, &kernel, &externals, &extent_params);
        self.emit_copies_out(w, &externals)?;

        info!(
            function = %function,
            kernel = %kernel,
            dims = dims.len(),
            externals = externals.len(),
            "Extracted offload region"
        );

        self.regions.push(OffloadRegion {
            function: function.to_string(),
            kernel_name: kernel,
            dims,
            body,
            externals,
            extent_params,
        });
        Ok(())
    }

    fn hoist(&mut self, name: &str, element: ScalarType) {
        if !self.buffers.iter().any(|b| b.name == name) {
            debug!(buffer = %name, "Hoisting device buffer declaration");
            self.buffers.push(DeviceBuffer {
                name: name.to_string(),
                element,
            });
        }
    }

    fn emit_copies_in(&mut self, w: &mut CodeWriter, externals: &[ExternalVariable]) -> Result<()> {
        for external in externals {
            let Some(element) = tensor_element(&external.ty)? else {
                continue;
            };
            let v = &external.name;
            let elem = element.as_str();
            self.hoist(v, element);

            w.line(format!(
                "cudaMalloc((void**)&d_{v}_data, {v}.components.size() * sizeof({elem}));"
            ));
            w.line(format!(
                "cudaMalloc((void**)&d_{v}_dims, {v}.dimensions.size() * sizeof(int));"
            ));
            w.line(format!(
                "cudaMemcpy(d_{v}_data, {v}.getData(), {v}.components.size() * sizeof({elem}), cudaMemcpyHostToDevice);"
            ));
            w.line(format!(
                "cudaMemcpy(d_{v}_dims, {v}.getDims(), {v}.dimensions.size() * sizeof(int), cudaMemcpyHostToDevice);"
            ));
        }
        Ok(())
    }

    fn emit_copies_out(&self, w: &mut CodeWriter, externals: &[ExternalVariable]) -> Result<()> {
        for external in externals {
            let Some(element) = tensor_element(&external.ty)? else {
                continue;
            };
            let v = &external.name;
            let elem = element.as_str();

            w.line(format!(
                "cudaMemcpy({v}.getData(), d_{v}_data, {v}.components.size() * sizeof({elem}), cudaMemcpyDeviceToHost);"
            ));
            w.line(format!("cudaFree(d_{v}_data);"));
            w.line(format!("cudaFree(d_{v}_dims);"));
            w.line(format!("d_{v}_data = nullptr;"));
            w.line(format!("d_{v}_dims = nullptr;"));
        }
        Ok(())
    }
}

/// `dim3 <k>_block(..)` / `dim3 <k>_grid(..)`, one capped axis per dimension
fn emit_geometry(w: &mut CodeWriter, kernel: &str, dims: &[ThreadDim], cap: u32) {
    let block: Vec<String> = dims.iter().map(|_| cap.to_string()).collect();
    let grid: Vec<String> = dims
        .iter()
        .map(|d| format!("({} + {} - 1) / {}", d.extent, cap, cap))
        .collect();
    w.line(format!("dim3 {}_block({});", kernel, block.join(", ")));
    w.line(format!("dim3 {}_grid({});", kernel, grid.join(", ")));
}

fn emit_launch(
    w: &mut CodeWriter,
    kernel: &str,
    externals: &[ExternalVariable],
    extent_params: &[String],
) {
    let mut args = Vec::new();
    for external in externals {
        if external.is_tensor() {
            args.push(format!("d_{}_data", external.name));
            args.push(format!("d_{}_dims", external.name));
        } else {
            args.push(external.name.clone());
        }
    }
    args.extend(extent_params.iter().cloned());

    w.line(format!(
        "{k}<<<{k}_grid, {k}_block>>>({});",
        args.join(", "),
        k = kernel
    ));
    w.line("cudaDeviceSynchronize();");
}

/// Hardware axis for dimension `index` (0 -> x, 1 -> y, 2 -> z)
pub fn axis(index: usize) -> Option<&'static str> {
    AXES.get(index).copied()
}
