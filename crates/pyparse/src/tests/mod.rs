mod branches;
mod robustness;

use graph::{DataFlowGraph, NodeOp};

/// Parses and mines a snippet that is expected to be valid.
pub(crate) fn mine_snippet(code: &str) -> DataFlowGraph {
    crate::mine(code).expect("snippet should parse")
}

/// Flattens a graph to `(op, tgt)` pairs for order assertions.
pub(crate) fn events(graph: &DataFlowGraph) -> Vec<(NodeOp, String)> {
    graph
        .nodes
        .iter()
        .map(|n| (n.op, n.tgt.clone()))
        .collect()
}

pub(crate) fn tags(pairs: &[&str]) -> Vec<String> {
    pairs.iter().map(|s| s.to_string()).collect()
}
