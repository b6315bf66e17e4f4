//! Variable-read collection over expressions
//!
//! Recurses through operators, call arguments, indexed access (base and
//! every index), tensor literal elements and parentheses. Literals and
//! callee names contribute nothing.

use std::collections::BTreeSet;

use crate::shared::models::Expr;

/// Visit every identifier read by `expr`, in left-to-right pre-order
pub fn for_each_read<'e>(expr: &'e Expr, visit: &mut impl FnMut(&'e str)) {
    match expr {
        Expr::Ident(name) => visit(name),
        Expr::Int(_) | Expr::Double(_) | Expr::Bool(_) | Expr::Char(_) => {}
        Expr::Binary { lhs, rhs, .. } => {
            for_each_read(lhs, visit);
            for_each_read(rhs, visit);
        }
        Expr::Unary { operand, .. } => for_each_read(operand, visit),
        Expr::Call { args, .. } => {
            for arg in args {
                for_each_read(arg, visit);
            }
        }
        Expr::Index { base, indices } => {
            for_each_read(base, visit);
            for index in indices {
                for_each_read(index, visit);
            }
        }
        Expr::TensorLiteral(elements) => {
            for element in elements {
                for_each_read(element, visit);
            }
        }
        Expr::Paren(inner) => for_each_read(inner, visit),
    }
}

/// Add every name read by `expr` to `into`
pub fn collect_uses(expr: &Expr, into: &mut BTreeSet<String>) {
    for_each_read(expr, &mut |name| {
        if !into.contains(name) {
            into.insert(name.to_string());
        }
    });
}
