//! Test fixtures
//!
//! Small Bolt programs with known dataflow and codegen results.

use super::builders::*;
use bolt_ir::shared::models::{Expr, FuncDef, Program, SizeParam, Stmt, ThreadDim, Type};

/// `int x = 5; int y = x + 1; return y;`
pub fn fixture_live_chain() -> FuncDef {
    FuncBuilder::new("chain", Type::int())
        .int("x", Expr::Int(5))
        .int("y", add(var("x"), Expr::Int(1)))
        .returns(var("y"))
        .build()
}

/// `int x = 5; int y = 10; return y;`
pub fn fixture_dead_store() -> FuncDef {
    FuncBuilder::new("dead", Type::int())
        .int("x", Expr::Int(5))
        .int("y", Expr::Int(10))
        .returns(var("y"))
        .build()
}

/// `int x; defer (i < 10) { x = x + 1; } int y;`
pub fn fixture_context_switch() -> FuncDef {
    FuncBuilder::new("switch", Type::Void)
        .stmt(Stmt::declare(Type::int(), "x", None))
        .stmt(Stmt::defer(
            vec![ThreadDim::new("i", SizeParam::Int(10))],
            Stmt::assign(var("x"), add(var("x"), Expr::Int(1))),
        ))
        .stmt(Stmt::declare(Type::int(), "y", None))
        .build()
}

/// `void copy(int n, tensor<int>[n] A, tensor<int>[n] B) { defer (i < n) { int t = A[i]; B[i] = t; } }`
pub fn fixture_copy() -> FuncDef {
    FuncBuilder::new("copy", Type::Void)
        .param(Type::int(), "n")
        .param(int_vector("n"), "A")
        .param(int_vector("n"), "B")
        .stmt(defer_over(
            "i",
            "n",
            vec![
                Stmt::declare(Type::int(), "t", Some(at("A", &["i"]))),
                store("B", &["i"], var("t")),
            ],
        ))
        .build()
}

/// `void twice(int n, tensor<int>[n] A) { defer (i < n) { A[i] = A[i] * 2; } }`
pub fn fixture_vector_double() -> FuncDef {
    FuncBuilder::new("twice", Type::Void)
        .param(Type::int(), "n")
        .param(int_vector("n"), "A")
        .stmt(defer_over(
            "i",
            "n",
            vec![store("A", &["i"], mul(at("A", &["i"]), Expr::Int(2)))],
        ))
        .build()
}

/// An offload block with a second offload block inside
pub fn fixture_nested_offload() -> FuncDef {
    FuncBuilder::new("nested", Type::Void)
        .param(Type::int(), "n")
        .param(int_vector("n"), "A")
        .stmt(defer_over(
            "i",
            "n",
            vec![defer_over(
                "j",
                "n",
                vec![store("A", &["j"], Expr::Int(0))],
            )],
        ))
        .build()
}

/// `main` calling a 2-D kernel over a matrix and a helper with its own kernel
pub fn fixture_two_kernel_program() -> Program {
    let fill = FuncBuilder::new("fill", Type::Void)
        .param(Type::int(), "n")
        .param(int_vector("n"), "V")
        .stmt(defer_over("k", "n", vec![store("V", &["k"], Expr::Int(1))]))
        .build();

    let main = FuncBuilder::new("main", Type::int())
        .param(Type::int(), "rows")
        .param(Type::int(), "cols")
        .param(double_matrix("rows", "cols"), "M")
        .param(Type::double(), "s")
        .stmt(Stmt::defer(
            vec![
                ThreadDim::new("r", SizeParam::ident("rows")),
                ThreadDim::new("c", SizeParam::ident("cols")),
            ],
            store("M", &["r", "c"], mul(at("M", &["r", "c"]), var("s"))),
        ))
        .returns(Expr::Int(0))
        .build();

    Program::new(vec![fill, main])
}
