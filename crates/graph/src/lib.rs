//! Data-flow graph model produced by mining Python source.
//!
//! A [`DataFlowGraph`] is the ordered sequence of [`GraphNode`] events for
//! one parsed source unit: variable bindings (`becomes`), call sites
//! (`calls`) and end-of-life events (`dies`). The sequence is a
//! linearization of the source as written, not a control-flow simulation:
//! branches appear one after another and every outcome is treated as
//! simultaneously possible by consumers.

pub mod portable;

use serde::{Deserialize, Serialize};

pub use portable::{from_portable, to_portable, FileGraph, FolderGraphs, PortableGraph};

/// Kind of event a node records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeOp {
    /// A name is bound or rebound to a value.
    Becomes,
    /// A name or attribute chain is invoked.
    Calls,
    /// A name goes out of scope, is deleted or is superseded.
    Dies,
}

/// A single mined event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    pub op: NodeOp,
    /// Provenance tags: where the bound value textually originated.
    /// More than one entry means the node sits after a branch merge.
    pub src: Vec<String>,
    /// Variable name for `becomes`/`dies`, dotted call target for `calls`.
    pub tgt: String,
    /// Raw argument-expression texts for `calls`; empty otherwise.
    #[serde(default)]
    pub context: Vec<String>,
    /// Source line, for diagnostics only.
    #[serde(default)]
    pub line: usize,
    /// Identifier of the scope frame that emitted the node.
    #[serde(default)]
    pub scope_id: usize,
}

impl GraphNode {
    /// Receiver of a call target: the dotted chain minus its final
    /// segment, or the whole target for bare names.
    pub fn receiver(&self) -> &str {
        match self.tgt.rsplit_once('.') {
            Some((head, _)) => head,
            None => &self.tgt,
        }
    }
}

/// Bidirectional dotted-suffix match: `self.x` is found by `x` and a bare
/// `x` binding is found by `self.x`. Middle segments of deep chains do not
/// match (`a.b.c` is not found by `b`).
pub fn name_matches(tgt: &str, name: &str) -> bool {
    if tgt == name {
        return true;
    }
    if tgt.len() > name.len() && tgt.ends_with(name) {
        if tgt.as_bytes()[tgt.len() - name.len() - 1] == b'.' {
            return true;
        }
    }
    if name.len() > tgt.len() && name.ends_with(tgt) {
        if name.as_bytes()[name.len() - tgt.len() - 1] == b'.' {
            return true;
        }
    }
    false
}

/// Ordered collection of mined events for one source unit.
///
/// Built once by the visitor and immutable afterwards; queries never
/// mutate, so a graph can be shared freely across readers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataFlowGraph {
    pub nodes: Vec<GraphNode>,
}

impl DataFlowGraph {
    pub fn new(nodes: Vec<GraphNode>) -> Self {
        Self { nodes }
    }

    /// Number of events in the graph.
    pub fn count(&self) -> usize {
        self.nodes.len()
    }

    /// All binding nodes whose target matches `name`, and all call nodes
    /// whose receiver matches `name`, in emission order.
    ///
    /// Matching tolerates `self.`-style prefixes in either direction, so a
    /// caller can query `x` without knowing the original spelling.
    pub fn find_definitions_and_calls(&self, name: &str) -> (Vec<&GraphNode>, Vec<&GraphNode>) {
        let mut defs = Vec::new();
        let mut calls = Vec::new();
        for node in &self.nodes {
            match node.op {
                NodeOp::Becomes => {
                    if name_matches(&node.tgt, name) {
                        defs.push(node);
                    }
                }
                NodeOp::Calls => {
                    if name_matches(node.receiver(), name) {
                        calls.push(node);
                    }
                }
                NodeOp::Dies => {}
            }
        }
        (defs, calls)
    }

    /// Exports the graph to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Exports the graph to DOT format for quick visual inspection.
    pub fn to_dot(&self) -> String {
        let mut out = String::from("digraph flow {\n");
        for (idx, node) in self.nodes.iter().enumerate() {
            out.push_str(&format!(
                "    n{idx} [label=\"{:?} {} <- {}\"];\n",
                node.op,
                node.tgt,
                node.src.join("|")
            ));
            if idx > 0 {
                out.push_str(&format!("    n{} -> n{idx};\n", idx - 1));
            }
        }
        out.push('}');
        out
    }
}

#[cfg(test)]
mod tests;
