//! Benchmarks for the dataflow engine
//!
//! Loop-heavy functions stress the liveness fixpoint: every nested `while`
//! adds a back edge, so sets need several passes to settle.

use bolt_ir::config::DeadCodePolicy;
use bolt_ir::features::data_flow::{
    compute_use_def_chains, eliminate_dead_code_to_fixpoint, perform_liveness,
};
use bolt_ir::features::flow_graph::CfgBuilder;
use bolt_ir::shared::models::{BinaryOp, Expr, FuncDef, Stmt, Type};
use bolt_ir::{Compiler, CompilerConfig, TypeEnvironment};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

// ============================================================================
// Fixtures
// ============================================================================

/// `depth` nested loops around `width` accumulators updated in a ring
fn nested_loops(depth: usize, width: usize) -> FuncDef {
    let var = |i: usize| format!("v{}", i);

    let mut body = Stmt::sequence(
        (0..width)
            .map(|i| {
                Stmt::assign(
                    Expr::ident(var(i)),
                    Expr::binary(
                        BinaryOp::Add,
                        Expr::ident(var(i)),
                        Expr::ident(var((i + 1) % width)),
                    ),
                )
            })
            .collect(),
    );
    for level in 0..depth {
        let counter = format!("k{}", level);
        body = Stmt::sequence(vec![
            Stmt::declare(Type::int(), counter.clone(), Some(Expr::Int(0))),
            Stmt::while_loop(
                Expr::binary(BinaryOp::Lt, Expr::ident(counter.clone()), Expr::Int(4)),
                Stmt::sequence(vec![
                    body,
                    Stmt::assign(
                        Expr::ident(counter.clone()),
                        Expr::binary(BinaryOp::Add, Expr::ident(counter), Expr::Int(1)),
                    ),
                ]),
            ),
        ]);
    }

    let mut stmts: Vec<Stmt> = (0..width)
        .map(|i| Stmt::declare(Type::int(), var(i), Some(Expr::Int(i as i64))))
        .collect();
    stmts.push(body);

    FuncDef::new("loops", Type::int(), Stmt::sequence(stmts)).with_return(Expr::ident(var(0)))
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_liveness(c: &mut Criterion) {
    let mut group = c.benchmark_group("liveness");

    for depth in [2usize, 8, 32] {
        let func = nested_loops(depth, 8);
        let graph = CfgBuilder::build(&func);
        group.throughput(Throughput::Elements(graph.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(depth), &graph, |b, graph| {
            b.iter(|| black_box(perform_liveness(graph)));
        });
    }

    group.finish();
}

fn bench_cfg_build(c: &mut Criterion) {
    let func = nested_loops(16, 8);
    c.bench_function("cfg_build", |b| {
        b.iter(|| black_box(CfgBuilder::build(&func).len()));
    });
}

fn bench_use_def_and_dead_code(c: &mut Criterion) {
    let func = nested_loops(16, 8);
    let graph = CfgBuilder::build(&func);

    c.bench_function("use_def", |b| {
        b.iter(|| black_box(compute_use_def_chains(graph.nodes())));
    });
    c.bench_function("dead_code_fixpoint", |b| {
        b.iter(|| black_box(eliminate_dead_code_to_fixpoint(&graph)));
    });
}

fn bench_analyse(c: &mut Criterion) {
    let func = nested_loops(8, 8);
    let env = TypeEnvironment::new();
    let mut group = c.benchmark_group("analyse");

    for policy in [DeadCodePolicy::SinglePass, DeadCodePolicy::Fixpoint] {
        let compiler = Compiler::new(CompilerConfig::default().with_dead_code(policy), &env);
        group.bench_function(format!("{:?}", policy), |b| {
            b.iter(|| black_box(compiler.analyse(&func, Vec::new())));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_liveness,
    bench_cfg_build,
    bench_use_def_and_dead_code,
    bench_analyse,
);

criterion_main!(benches);
