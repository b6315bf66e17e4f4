//! Test data builders
//!
//! Fluent construction of Bolt functions without spelling out nested `Seq`s.

use bolt_ir::shared::models::{
    BinaryOp, Expr, FuncDef, Param, ScalarType, SizeParam, Stmt, ThreadDim, Type,
};

/// Builder for FuncDef
#[derive(Debug)]
pub struct FuncBuilder {
    name: String,
    return_type: Type,
    params: Vec<Param>,
    body: Vec<Stmt>,
    return_expr: Option<Expr>,
}

impl FuncBuilder {
    pub fn new(name: &str, return_type: Type) -> Self {
        Self {
            name: name.to_string(),
            return_type,
            params: Vec::new(),
            body: Vec::new(),
            return_expr: None,
        }
    }

    pub fn param(mut self, ty: Type, name: &str) -> Self {
        self.params.push(Param::new(ty, name));
        self
    }

    pub fn stmt(mut self, stmt: Stmt) -> Self {
        self.body.push(stmt);
        self
    }

    /// `int name = init;`
    pub fn int(self, name: &str, init: Expr) -> Self {
        self.stmt(Stmt::declare(Type::int(), name, Some(init)))
    }

    /// `name = value;`
    pub fn set(self, name: &str, value: Expr) -> Self {
        self.stmt(Stmt::assign(Expr::ident(name), value))
    }

    pub fn returns(mut self, expr: Expr) -> Self {
        self.return_expr = Some(expr);
        self
    }

    pub fn build(self) -> FuncDef {
        let mut func = FuncDef::new(self.name, self.return_type, Stmt::sequence(self.body))
            .with_params(self.params);
        func.return_expr = self.return_expr;
        func
    }
}

pub fn var(name: &str) -> Expr {
    Expr::ident(name)
}

pub fn add(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(BinaryOp::Add, lhs, rhs)
}

pub fn mul(lhs: Expr, rhs: Expr) -> Expr {
    Expr::binary(BinaryOp::Mul, lhs, rhs)
}

/// `A[i, ..]` with identifier indices
pub fn at(tensor: &str, indices: &[&str]) -> Expr {
    Expr::index(tensor, indices.iter().map(|i| Expr::ident(*i)).collect())
}

/// `A[i, ..] = value;`
pub fn store(tensor: &str, indices: &[&str], value: Expr) -> Stmt {
    Stmt::assign(at(tensor, indices), value)
}

/// `defer (i < n) { body }` with an identifier extent
pub fn defer_over(var: &str, extent: &str, body: Vec<Stmt>) -> Stmt {
    Stmt::defer(
        vec![ThreadDim::new(var, SizeParam::ident(extent))],
        Stmt::sequence(body),
    )
}

/// `tensor<int>[extent]`
pub fn int_vector(extent: &str) -> Type {
    Type::tensor(ScalarType::Int, vec![SizeParam::ident(extent)])
}

/// `tensor<double>[rows, cols]`
pub fn double_matrix(rows: &str, cols: &str) -> Type {
    Type::tensor(
        ScalarType::Double,
        vec![SizeParam::ident(rows), SizeParam::ident(cols)],
    )
}
