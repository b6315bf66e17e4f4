//! Bolt AST - input contract of the compiler core
//!
//! The parser lives outside this crate. It hands over a [`Program`] built from
//! the closed enums below; every pass dispatches with an exhaustive `match`, so
//! adding a node kind is checked by the compiler in every pass at once.
//!
//! All types are serde-serializable so that an external front end can pass a
//! program as JSON (see the `boltc` binary).

use serde::{Deserialize, Serialize};

use super::types::{SizeParam, Type};

/// Whole compilation input: functions in source order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    pub functions: Vec<FuncDef>,
}

impl Program {
    pub fn new(functions: Vec<FuncDef>) -> Self {
        Self { functions }
    }
}

/// Formal parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Param {
    pub ty: Type,
    pub name: String,
}

impl Param {
    pub fn new(ty: Type, name: impl Into<String>) -> Self {
        Self {
            ty,
            name: name.into(),
        }
    }
}

/// Function definition
///
/// The language has a single trailing `return` per function, so the return
/// expression lives next to the body rather than inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDef {
    pub name: String,
    pub return_type: Type,
    #[serde(default)]
    pub params: Vec<Param>,
    #[serde(default)]
    pub body: Stmt,
    #[serde(default)]
    pub return_expr: Option<Expr>,
}

impl FuncDef {
    pub fn new(name: impl Into<String>, return_type: Type, body: Stmt) -> Self {
        Self {
            name: name.into(),
            return_type,
            params: Vec::new(),
            body,
            return_expr: None,
        }
    }

    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = params;
        self
    }

    pub fn with_return(mut self, expr: Expr) -> Self {
        self.return_expr = Some(expr);
        self
    }

    pub fn is_main(&self) -> bool {
        self.name == "main"
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Statements
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// One thread-index binding of an offload block: `i < n`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThreadDim {
    pub var: String,
    pub extent: SizeParam,
}

impl ThreadDim {
    pub fn new(var: impl Into<String>, extent: SizeParam) -> Self {
        Self {
            var: var.into(),
            extent,
        }
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stmt {
    /// Empty block
    #[default]
    Empty,

    /// `s1; s2`
    Seq(Box<Stmt>, Box<Stmt>),

    /// `if (cond) { .. } else { .. }`
    If {
        cond: Expr,
        then_branch: Box<Stmt>,
        #[serde(default)]
        else_branch: Option<Box<Stmt>>,
    },

    /// `while (cond) { .. }`
    While { cond: Expr, body: Box<Stmt> },

    /// `defer (i < n, j < m) { .. }` - GPU offload block
    Defer { dims: Vec<ThreadDim>, body: Box<Stmt> },

    /// `int x = expr;`
    Declare {
        ty: Type,
        name: String,
        #[serde(default)]
        init: Option<Expr>,
    },

    /// `x = expr;` or `A[i, j] = expr;`
    Assign { target: Expr, value: Expr },

    /// Expression evaluated for its side effect, e.g. `print(x);`
    Expr(Expr),
}

impl Stmt {
    /// Right-fold a statement list into nested `Seq`s. An empty list is `Empty`.
    pub fn sequence(stmts: Vec<Stmt>) -> Stmt {
        let mut iter = stmts.into_iter().rev();
        let Some(last) = iter.next() else {
            return Stmt::Empty;
        };
        iter.fold(last, |rest, stmt| Stmt::Seq(Box::new(stmt), Box::new(rest)))
    }

    pub fn declare(ty: Type, name: impl Into<String>, init: Option<Expr>) -> Stmt {
        Stmt::Declare {
            ty,
            name: name.into(),
            init,
        }
    }

    pub fn assign(target: Expr, value: Expr) -> Stmt {
        Stmt::Assign { target, value }
    }

    pub fn if_then(cond: Expr, then_branch: Stmt, else_branch: Option<Stmt>) -> Stmt {
        Stmt::If {
            cond,
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
        }
    }

    pub fn while_loop(cond: Expr, body: Stmt) -> Stmt {
        Stmt::While {
            cond,
            body: Box::new(body),
        }
    }

    pub fn defer(dims: Vec<ThreadDim>, body: Stmt) -> Stmt {
        Stmt::Defer {
            dims,
            body: Box::new(body),
        }
    }

    /// True if this statement is, or transitively contains, an offload block
    pub fn contains_defer(&self) -> bool {
        match self {
            Stmt::Defer { .. } => true,
            Stmt::Seq(first, second) => first.contains_defer() || second.contains_defer(),
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                then_branch.contains_defer()
                    || else_branch.as_ref().is_some_and(|e| e.contains_defer())
            }
            Stmt::While { body, .. } => body.contains_defer(),
            Stmt::Empty | Stmt::Declare { .. } | Stmt::Assign { .. } | Stmt::Expr(_) => false,
        }
    }
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Expressions
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

/// Binary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Eq,
    Neq,
    Lt,
    Leq,
    Gt,
    Geq,
    And,
    Or,
    /// Element-wise tensor product
    ElemMul,
}

impl BinaryOp {
    /// Target-language spelling
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Leq => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Geq => ">=",
            BinaryOp::And => "&&",
            BinaryOp::Or => "||",
            // tensor.h overloads operator<< as the element-wise product
            BinaryOp::ElemMul => "<<",
        }
    }

    /// C++ binding strength of the emitted operator; higher binds tighter.
    /// All of these associate to the left.
    pub fn precedence(&self) -> u8 {
        match self {
            BinaryOp::Mul | BinaryOp::Div | BinaryOp::Mod => 10,
            BinaryOp::Add | BinaryOp::Sub => 9,
            BinaryOp::ElemMul => 8,
            BinaryOp::Lt | BinaryOp::Leq | BinaryOp::Gt | BinaryOp::Geq => 7,
            BinaryOp::Eq | BinaryOp::Neq => 6,
            BinaryOp::And => 3,
            BinaryOp::Or => 2,
        }
    }
}

/// Unary operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOp {
    Not,
    Neg,
}

impl UnaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expr {
    /// Variable read: `x`
    Ident(String),

    Int(i64),
    Double(f64),
    Bool(bool),
    Char(char),

    /// `a + b`
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },

    /// `-a`, `!b`
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// `f(a, b)`
    Call { name: String, args: Vec<Expr> },

    /// Tensor element access: `A[i, j]`
    Index { base: Box<Expr>, indices: Vec<Expr> },

    /// Tensor literal: `{{1, 2}, {3, 4}}` (rows nest)
    TensorLiteral(Vec<Expr>),

    /// `(e)`
    Paren(Box<Expr>),
}

impl Expr {
    pub fn ident(name: impl Into<String>) -> Expr {
        Expr::Ident(name.into())
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr::Binary {
            op,
            lhs: Box::new(lhs),
            rhs: Box::new(rhs),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn call(name: impl Into<String>, args: Vec<Expr>) -> Expr {
        Expr::Call {
            name: name.into(),
            args,
        }
    }

    /// `base[indices..]` with an identifier base
    pub fn index(base: impl Into<String>, indices: Vec<Expr>) -> Expr {
        Expr::Index {
            base: Box::new(Expr::Ident(base.into())),
            indices,
        }
    }

    pub fn paren(inner: Expr) -> Expr {
        Expr::Paren(Box::new(inner))
    }

    /// Name of the identifier, if this is a bare identifier
    pub fn as_ident(&self) -> Option<&str> {
        match self {
            Expr::Ident(name) => Some(name),
            _ => None,
        }
    }
}
