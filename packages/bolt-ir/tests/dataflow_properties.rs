//! Property-based tests for the dataflow engine
//!
//! Invariants that hold for every generated function body:
//! - Confluence: liveness does not depend on the visiting order
//! - Use-def completeness: chains list exactly the nodes killing a name
//! - Dead-code soundness: removal iff kill != {} and kill & out == {}
//! - Fixpoint elimination never keeps more than a single pass

use bolt_ir::features::data_flow::{
    compute_use_def_chains, eliminate_dead_code, eliminate_dead_code_to_fixpoint,
    perform_liveness, perform_liveness_in_order,
};
use bolt_ir::features::flow_graph::{CfgBuilder, NodeId};
use bolt_ir::shared::models::{BinaryOp, Expr, FuncDef, SizeParam, Stmt, ThreadDim, Type};
use proptest::prelude::*;
use std::collections::BTreeSet;

// ============================================================================
// Generators
// ============================================================================

fn name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["a", "b", "c", "d"]).prop_map(String::from)
}

fn expr() -> impl Strategy<Value = Expr> {
    prop_oneof![
        name().prop_map(Expr::Ident),
        (0i64..10).prop_map(Expr::Int),
        (name(), name()).prop_map(|(l, r)| Expr::binary(
            BinaryOp::Add,
            Expr::Ident(l),
            Expr::Ident(r)
        )),
    ]
}

fn stmt() -> impl Strategy<Value = Stmt> {
    let leaf = prop_oneof![
        (name(), expr()).prop_map(|(n, e)| Stmt::assign(Expr::Ident(n), e)),
        (name(), prop::option::of(expr())).prop_map(|(n, e)| Stmt::declare(Type::int(), n, e)),
        expr().prop_map(|e| Stmt::Expr(Expr::call("print", vec![e]))),
    ];

    leaf.prop_recursive(4, 32, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Stmt::sequence),
            (expr(), inner.clone(), prop::option::of(inner.clone()))
                .prop_map(|(c, t, e)| Stmt::if_then(c, t, e)),
            (expr(), inner.clone()).prop_map(|(c, b)| Stmt::while_loop(c, b)),
            inner.prop_map(|b| Stmt::defer(vec![ThreadDim::new("i", SizeParam::Int(8))], b)),
        ]
    })
}

fn function() -> impl Strategy<Value = FuncDef> {
    (prop::collection::vec(stmt(), 0..6), expr()).prop_map(|(body, ret)| {
        FuncDef::new("f", Type::int(), Stmt::sequence(body)).with_return(ret)
    })
}

/// Node ids permuted by `keys`
fn permuted(ids: &[NodeId], keys: &[u32]) -> Vec<NodeId> {
    let mut keyed: Vec<(u32, NodeId)> = ids
        .iter()
        .enumerate()
        .map(|(pos, id)| (keys[pos % keys.len()], *id))
        .collect();
    keyed.sort();
    keyed.into_iter().map(|(_, id)| id).collect()
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_liveness_is_order_independent(
        func in function(),
        keys in prop::collection::vec(any::<u32>(), 1..64),
    ) {
        let graph = CfgBuilder::build(&func);
        let ids: Vec<NodeId> = graph.nodes().iter().map(|n| n.id).collect();

        let reference = perform_liveness(&graph);
        let forward = perform_liveness_in_order(&graph, &ids);
        let shuffled = perform_liveness_in_order(&graph, &permuted(&ids, &keys));

        prop_assert!(reference.same_sets(&forward));
        prop_assert!(reference.same_sets(&shuffled));
    }

    #[test]
    fn prop_use_def_lists_every_killing_node(func in function()) {
        let graph = CfgBuilder::build(&func);
        let chains = compute_use_def_chains(graph.nodes());

        let killed: BTreeSet<&String> = graph.nodes().iter().flat_map(|n| n.kill.iter()).collect();
        prop_assert_eq!(chains.len(), killed.len());
        for name in killed {
            let expected: BTreeSet<NodeId> = graph
                .nodes()
                .iter()
                .filter(|n| n.kill.contains(name))
                .map(|n| n.id)
                .collect();
            prop_assert_eq!(chains.definitions_of(name), expected);
        }
    }

    #[test]
    fn prop_dead_code_removes_exactly_dead_definitions(func in function()) {
        let graph = CfgBuilder::build(&func);
        let liveness = perform_liveness(&graph);
        let surviving: BTreeSet<NodeId> =
            eliminate_dead_code(graph.nodes(), &liveness).into_iter().collect();

        for node in graph.nodes() {
            let out = liveness.live_out(node.id).cloned().unwrap_or_default();
            let dead = !node.kill.is_empty() && node.kill.is_disjoint(&out);
            prop_assert_eq!(surviving.contains(&node.id), !dead, "node {}", node.id);
        }
    }

    #[test]
    fn prop_fixpoint_keeps_subset_of_single_pass(func in function()) {
        let graph = CfgBuilder::build(&func);
        let liveness = perform_liveness(&graph);
        let single: BTreeSet<NodeId> =
            eliminate_dead_code(graph.nodes(), &liveness).into_iter().collect();
        let fixpoint = eliminate_dead_code_to_fixpoint(&graph);

        prop_assert!(fixpoint.contains(&graph.exit()));
        for id in fixpoint {
            prop_assert!(single.contains(&id));
        }
    }
}
