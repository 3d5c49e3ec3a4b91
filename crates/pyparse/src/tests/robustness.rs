//! Malformed and exotic input never crashes the pipeline.

use super::{events, mine_snippet};
use graph::NodeOp;

#[test]
fn unterminated_expression_is_a_parse_error() {
    let err = crate::parse("x = (").expect_err("unterminated paren must not parse");
    assert!(err.message.contains("syntax error"));
    assert!(crate::mine("x = (").is_err(), "mining aborts before building");
}

#[test]
fn missing_suite_body_is_a_parse_error() {
    let err = crate::parse("if ready:").expect_err("a suite opener with no body must not parse");
    assert!(err.message.contains("syntax error"));
    assert!(
        crate::mine("for i in xs:").is_err(),
        "incomplete constructs abort mining even when no ERROR node is present"
    );
}

#[test]
fn parse_failure_is_idempotent() {
    let a = crate::parse("x = (").unwrap_err();
    let b = crate::parse("x = (").unwrap_err();
    assert_eq!(a, b, "the same malformed input yields equal errors");
}

#[test]
fn empty_source_yields_an_empty_graph() {
    assert_eq!(mine_snippet("").count(), 0);
    assert_eq!(mine_snippet("\n\n").count(), 0);
}

#[test]
fn comment_only_source_yields_an_empty_graph() {
    assert_eq!(mine_snippet("# nothing here\n# at all\n").count(), 0);
}

#[test]
fn async_definitions_are_skipped_without_aborting_siblings() {
    let g = mine_snippet("async def f():\n    x = 1\ny = 2\n");
    assert_eq!(
        events(&g),
        vec![(NodeOp::Becomes, "y".to_string())],
        "the async subtree emits nothing, the sibling statement survives"
    );
}

#[test]
fn walrus_binding_is_skipped() {
    let g = mine_snippet("if (n := 10) > 5:\n    y = n\n");
    assert_eq!(events(&g), vec![(NodeOp::Becomes, "y".to_string())]);
    assert_eq!(
        g.nodes[0].src,
        vec!["unknown".to_string()],
        "the skipped walrus leaves n unresolved"
    );
}

#[test]
fn imports_and_flow_keywords_emit_nothing() {
    let g = mine_snippet("import os\nfrom sys import path\npass\n");
    assert_eq!(g.count(), 0);
}

#[test]
fn mining_never_panics_on_odd_but_valid_code() {
    for code in [
        "x = y[0]\n",
        "(a)\n",
        "x = -1\n",
        "x = not y\n",
        "x = a if b else c\n",
        "def f(*args, **kwargs):\n    pass\n",
        "x = {k: v for k, v in items}\n",
    ] {
        let _ = mine_snippet(code);
    }
}
