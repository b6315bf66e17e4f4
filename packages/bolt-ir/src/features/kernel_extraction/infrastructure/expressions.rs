/*
 * Expression and type spelling for the CUDA C++ target
 *
 * Host mode:   A[i, j]  ->  A.access({i, j})
 * Device mode: A[i, j]  ->  tensor_access_2d(A_data, i, j, A_dims)
 *
 * Inside a kernel a tensor exists only as its `_data`/`_dims` pointer pair,
 * so a bare tensor name there is rejected.
 */

use super::scope::Scope;
use crate::errors::{CompileError, Result};
use crate::features::kernel_extraction::domain::ExtractionMode;
use crate::shared::models::{Expr, ScalarType, SizeParam, Type};

/// Target spelling of a value type
pub fn cuda_type(ty: &Type) -> Result<String> {
    match ty {
        Type::Scalar(scalar) => Ok(scalar.as_str().to_string()),
        Type::Tensor { element, .. } => Ok(tensor_class(*element)?.to_string()),
        Type::Void => Err(CompileError::structural(
            "'void' is only valid as a function return type",
        )),
    }
}

/// Return-type spelling (allows `void`)
pub fn return_type(ty: &Type) -> Result<String> {
    match ty {
        Type::Void => Ok("void".to_string()),
        other => cuda_type(other),
    }
}

/// Runtime class for a tensor element type
pub fn tensor_class(element: ScalarType) -> Result<&'static str> {
    match element {
        ScalarType::Int => Ok("IntTensor"),
        ScalarType::Double => Ok("DoubleTensor"),
        other => Err(CompileError::structural(format!(
            "Tensors of '{}' are not supported; element type must be int or double",
            other.as_str()
        ))),
    }
}

/// Element type of a tensor type, validated against the runtime classes
pub fn tensor_element(ty: &Type) -> Result<Option<ScalarType>> {
    match ty {
        Type::Tensor { element, .. } => {
            tensor_class(*element)?;
            Ok(Some(*element))
        }
        _ => Ok(None),
    }
}

pub fn emit_expr(expr: &Expr, mode: ExtractionMode, scope: &Scope<'_>) -> Result<String> {
    match expr {
        Expr::Ident(name) => {
            if mode.is_device() && scope.is_tensor(name) {
                return Err(CompileError::structural(format!(
                    "Tensor '{}' cannot be used as a whole value inside an offload block",
                    name
                )));
            }
            Ok(name.clone())
        }
        Expr::Int(value) => Ok(value.to_string()),
        Expr::Double(value) => Ok(format!("{:?}", value)),
        Expr::Bool(value) => Ok(value.to_string()),
        Expr::Char(value) => char_literal(*value),
        Expr::Binary { op, lhs, rhs } => {
            let lhs_text = emit_expr(lhs, mode, scope)?;
            let rhs_text = emit_expr(rhs, mode, scope)?;
            Ok(format!(
                "{} {} {}",
                group_if(lhs_text, binds_looser(lhs, op.precedence(), false)),
                op.as_str(),
                group_if(rhs_text, binds_looser(rhs, op.precedence(), true))
            ))
        }
        Expr::Unary { op, operand } => {
            let text = emit_expr(operand, mode, scope)?;
            let nested = matches!(**operand, Expr::Binary { .. } | Expr::Unary { .. });
            Ok(format!("{}{}", op.as_str(), group_if(text, nested)))
        }
        Expr::Call { name, args } => Ok(format!("{}({})", name, emit_list(args, mode, scope)?)),
        Expr::Paren(inner) => Ok(format!("({})", emit_expr(inner, mode, scope)?)),
        Expr::Index { base, indices } => match mode {
            ExtractionMode::Host => Ok(format!(
                "{}.access({{{}}})",
                emit_expr(base, mode, scope)?,
                emit_list(indices, mode, scope)?
            )),
            ExtractionMode::Device => {
                let (tensor, rank) = device_target(base, indices)?;
                let mut args = vec![format!("{}_data", tensor)];
                for index in indices {
                    args.push(emit_expr(index, mode, scope)?);
                }
                if rank >= 2 {
                    args.push(format!("{}_dims", tensor));
                }
                Ok(format!("tensor_access_{}d({})", rank, args.join(", ")))
            }
        },
        Expr::TensorLiteral(_) => Err(CompileError::structural(
            "Tensor literal needs an annotated tensor type (declare or assign it to a tensor variable)",
        )),
    }
}

/// Operand of a binary operator that would regroup without parentheses.
/// Operators associate to the left, so an equal-precedence right operand
/// needs them too.
fn binds_looser(operand: &Expr, parent: u8, right: bool) -> bool {
    match operand {
        Expr::Binary { op, .. } => {
            let inner = op.precedence();
            inner < parent || (right && inner == parent)
        }
        _ => false,
    }
}

fn group_if(text: String, group: bool) -> String {
    if group {
        format!("({})", text)
    } else {
        text
    }
}

/// C++ `char` literal; only ASCII fits in a single `char`
fn char_literal(value: char) -> Result<String> {
    if !value.is_ascii() {
        return Err(CompileError::structural(format!(
            "Character literal {:?} is not ASCII and has no single-byte 'char' spelling",
            value
        )));
    }
    let body = match value {
        '\'' => "\\'".to_string(),
        '\\' => "\\\\".to_string(),
        '\n' => "\\n".to_string(),
        '\r' => "\\r".to_string(),
        '\t' => "\\t".to_string(),
        '\0' => "\\0".to_string(),
        c if c.is_ascii_control() => format!("\\x{:02x}", c as u32),
        c => c.to_string(),
    };
    Ok(format!("'{}'", body))
}

pub fn emit_list(exprs: &[Expr], mode: ExtractionMode, scope: &Scope<'_>) -> Result<String> {
    let parts = exprs
        .iter()
        .map(|e| emit_expr(e, mode, scope))
        .collect::<Result<Vec<_>>>()?;
    Ok(parts.join(", "))
}

/// Tensor name and rank of a device-side element access
pub fn device_target<'e>(base: &'e Expr, indices: &[Expr]) -> Result<(&'e str, usize)> {
    let Some(tensor) = base.as_ident() else {
        return Err(CompileError::structural(
            "Indexed access inside an offload block must index a tensor variable directly",
        ));
    };
    let rank = indices.len();
    if !(1..=3).contains(&rank) {
        return Err(CompileError::structural(format!(
            "Indexed access of '{}' inside an offload block has rank {}; ranks 1 to 3 are supported",
            tensor, rank
        )));
    }
    Ok((tensor, rank))
}

/// `IntTensor({1, 2, 3, 4}, {2, 2})` for a literal annotated with `ty`
pub fn emit_tensor_literal(
    literal: &Expr,
    ty: &Type,
    mode: ExtractionMode,
    scope: &Scope<'_>,
) -> Result<String> {
    let Type::Tensor { element, dims } = ty else {
        return Err(CompileError::structural(format!(
            "Tensor literal assigned to a value of type '{}'",
            ty
        )));
    };
    let class = tensor_class(*element)?;

    let mut components = Vec::new();
    flatten(literal, mode, scope, &mut components)?;

    let literal_extents: Option<Vec<i64>> = dims
        .iter()
        .map(|d| match d {
            SizeParam::Int(n) => Some(*n),
            SizeParam::Ident(_) => None,
        })
        .collect();
    if let Some(extents) = literal_extents {
        let expected: i64 = extents.iter().product();
        if expected != components.len() as i64 {
            return Err(CompileError::structural(format!(
                "Tensor literal has {} components but type '{}' needs {}",
                components.len(),
                ty,
                expected
            )));
        }
    }

    let shape: Vec<String> = dims.iter().map(|d| d.to_string()).collect();
    Ok(format!(
        "{}({{{}}}, {{{}}})",
        class,
        components.join(", "),
        shape.join(", ")
    ))
}

fn flatten(
    expr: &Expr,
    mode: ExtractionMode,
    scope: &Scope<'_>,
    out: &mut Vec<String>,
) -> Result<()> {
    match expr {
        Expr::TensorLiteral(rows) => {
            for row in rows {
                flatten(row, mode, scope, out)?;
            }
            Ok(())
        }
        other => {
            out.push(emit_expr(other, mode, scope)?);
            Ok(())
        }
    }
}
