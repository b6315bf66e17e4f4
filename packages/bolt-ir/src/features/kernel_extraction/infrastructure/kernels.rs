//! Kernel definitions
//!
//! One `__global__` function per collected offload region, written after all
//! host functions. Parameters follow the call-site order: `T* v_data, int* v_dims`
//! per tensor external, `T v` per scalar external, then one `int` per
//! identifier extent not already captured.

use tracing::debug;

use super::code_writer::CodeWriter;
use super::expressions::{cuda_type, tensor_element};
use super::launch::axis;
use super::scope::Scope;
use super::statements::StmtTranspiler;
use crate::errors::{CompileError, Result};
use crate::features::kernel_extraction::domain::OffloadRegion;
use crate::shared::models::Type;

pub fn kernel_signature(region: &OffloadRegion<'_>) -> Result<String> {
    let mut params = Vec::new();
    for external in &region.externals {
        match tensor_element(&external.ty)? {
            Some(element) => {
                params.push(format!("{}* {}_data", element.as_str(), external.name));
                params.push(format!("int* {}_dims", external.name));
            }
            None => params.push(format!("{} {}", cuda_type(&external.ty)?, external.name)),
        }
    }
    for extent in &region.extent_params {
        params.push(format!("int {}", extent));
    }
    Ok(format!(
        "__global__ void {}({})",
        region.kernel_name,
        params.join(", ")
    ))
}

pub fn emit_kernel<'a>(w: &mut CodeWriter, region: &OffloadRegion<'a>) -> Result<()> {
    let mut scope: Scope<'a> = Scope::kernel(region.thread_vars().map(str::to_string).collect());
    for external in &region.externals {
        scope.declare(external.name.clone(), external.ty.clone());
    }
    for extent in &region.extent_params {
        scope.declare(extent.clone(), Type::int());
    }

    w.open(format!("{} {{", kernel_signature(region)?));

    for (index, dim) in region.dims.iter().enumerate() {
        let Some(axis) = axis(index) else {
            return Err(CompileError::structural(format!(
                "Kernel '{}' has more than 3 dimensions",
                region.kernel_name
            )));
        };
        w.line(format!(
            "int {v} = blockIdx.{a} * blockDim.{a} + threadIdx.{a};",
            v = dim.var,
            a = axis
        ));
        w.line(format!("if ({} >= {}) {{ return; }}", dim.var, dim.extent));
    }

    StmtTranspiler::device(&region.function, &region.kernel_name, &mut scope)
        .stmt(w, region.body)?;

    w.close("}");
    debug!(kernel = %region.kernel_name, "Emitted kernel");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::kernel_extraction::domain::ExternalVariable;
    use crate::shared::models::{BinaryOp, Expr, ScalarType, SizeParam, Stmt, ThreadDim};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_dimensional_kernel() {
        let dims = vec![
            ThreadDim::new("i", SizeParam::ident("n")),
            ThreadDim::new("j", SizeParam::Int(16)),
        ];
        // M[i, j] = M[i, j] * k;
        let body = Stmt::assign(
            Expr::index("M", vec![Expr::ident("i"), Expr::ident("j")]),
            Expr::binary(
                BinaryOp::Mul,
                Expr::index("M", vec![Expr::ident("i"), Expr::ident("j")]),
                Expr::ident("k"),
            ),
        );
        let region = OffloadRegion {
            function: "main".to_string(),
            kernel_name: "kernel_A".to_string(),
            dims: &dims,
            body: &body,
            externals: vec![
                ExternalVariable {
                    name: "M".to_string(),
                    ty: Type::tensor(
                        ScalarType::Double,
                        vec![SizeParam::ident("n"), SizeParam::Int(16)],
                    ),
                },
                ExternalVariable {
                    name: "k".to_string(),
                    ty: Type::double(),
                },
            ],
            extent_params: vec!["n".to_string()],
        };

        let mut w = CodeWriter::new();
        emit_kernel(&mut w, &region).unwrap();
        assert_eq!(
            w.finish(),
            "__global__ void kernel_A(double* M_data, int* M_dims, double k, int n) {\n    \
             int i = blockIdx.x * blockDim.x + threadIdx.x;\n    \
             if (i >= n) { return; }\n    \
             int j = blockIdx.y * blockDim.y + threadIdx.y;\n    \
             if (j >= 16) { return; }\n    \
             tensor_setAt_2d(M_data, i, j, M_dims, tensor_access_2d(M_data, i, j, M_dims) * k);\n\
             }\n"
        );
    }

    #[test]
    fn test_tensor_declaration_in_kernel_rejected() {
        let dims = vec![ThreadDim::new("i", SizeParam::Int(4))];
        let body = Stmt::declare(
            Type::tensor(ScalarType::Int, vec![SizeParam::Int(4)]),
            "tmp",
            None,
        );
        let region = OffloadRegion {
            function: "main".to_string(),
            kernel_name: "kernel_B".to_string(),
            dims: &dims,
            body: &body,
            externals: Vec::new(),
            extent_params: Vec::new(),
        };
        let err = emit_kernel(&mut CodeWriter::new(), &region).unwrap_err();
        assert!(err.to_string().contains("tmp"));
    }

    #[test]
    fn test_thread_index_is_read_only() {
        let dims = vec![ThreadDim::new("i", SizeParam::Int(4))];
        let body = Stmt::assign(Expr::ident("i"), Expr::Int(0));
        let region = OffloadRegion {
            function: "main".to_string(),
            kernel_name: "kernel_C".to_string(),
            dims: &dims,
            body: &body,
            externals: Vec::new(),
            extent_params: Vec::new(),
        };
        assert!(emit_kernel(&mut CodeWriter::new(), &region).is_err());
    }
}
