//! Branch handling: every outcome is emitted, none is exclusive.

use super::{events, mine_snippet, tags};
use graph::NodeOp;

#[test]
fn both_branches_bind_the_same_name() {
    let g = mine_snippet("if a:\n    y = 1\nelse:\n    y = 2\n");
    assert_eq!(
        events(&g),
        vec![
            (NodeOp::Becomes, "y".to_string()),
            (NodeOp::Becomes, "y".to_string()),
        ],
        "each branch contributes its own binding, no deaths at the merge"
    );
    assert_eq!(g.nodes[0].src, tags(&["int"]));
    assert_eq!(g.nodes[1].src, tags(&["int"]));
}

#[test]
fn merge_unions_branch_provenance() {
    let g = mine_snippet("if a:\n    y = 1\nelse:\n    y = \"s\"\nz = y\n");
    let z = g.nodes.last().unwrap();
    assert_eq!(z.tgt, "z");
    assert_eq!(
        z.src,
        tags(&["int", "str"]),
        "a read after the merge sees the union of branch outcomes"
    );
}

#[test]
fn elif_chain_emits_one_binding_per_branch() {
    let g = mine_snippet("if a:\n    y = 1\nelif b:\n    y = 2\nelse:\n    y = 3\n");
    let bindings = g
        .nodes
        .iter()
        .filter(|n| n.op == NodeOp::Becomes && n.tgt == "y")
        .count();
    assert_eq!(bindings, 3);
}

#[test]
fn missing_else_keeps_the_prior_binding_alive() {
    let g = mine_snippet("x = 1\nif c:\n    x = 2\ny = x\n");
    assert_eq!(
        events(&g),
        vec![
            (NodeOp::Becomes, "x".to_string()),
            (NodeOp::Becomes, "x".to_string()),
            (NodeOp::Becomes, "y".to_string()),
        ],
        "a conditional rebinding never kills the pre-branch binding"
    );
    assert_eq!(g.nodes[2].src, tags(&["int"]));
}

#[test]
fn loop_body_state_merges_with_zero_iteration_state() {
    let g = mine_snippet("x = 1\nwhile c:\n    x = make()\ny = x\n");
    let y = g.nodes.last().unwrap();
    assert_eq!(y.tgt, "y");
    assert!(
        y.src.contains(&"make".to_string()) && y.src.contains(&"int".to_string()),
        "after a loop both the loop result and the original are possible, got {:?}",
        y.src
    );
}

#[test]
fn loop_variable_is_bound_before_the_body() {
    let g = mine_snippet("for i in items:\n    total.add(i)\n");
    assert_eq!(
        events(&g),
        vec![
            (NodeOp::Becomes, "i".to_string()),
            (NodeOp::Calls, "total.add".to_string()),
        ]
    );
    assert_eq!(g.nodes[0].src, tags(&["unknown"]));
    assert_eq!(g.nodes[1].context, tags(&["i"]));
}

#[test]
fn loop_exit_emits_no_extra_deaths() {
    let g = mine_snippet("for i in items:\n    x = i\n");
    assert!(
        g.nodes.iter().all(|n| n.op != NodeOp::Dies),
        "module-level loop variables live on after the loop"
    );
}
