//! Portable representation used for persistence and transport.
//!
//! The bulk harness stores one JSON document per scanned folder:
//! `{ "folder": ..., "files": [ { "file": ..., "graph": { "count": ..., "nodes": [...] } } ] }`.
//! Only the inner `{count, nodes}` object is produced from a
//! [`DataFlowGraph`]; the wrappers exist so producers agree on the schema.

use serde::{Deserialize, Serialize};

use crate::{DataFlowGraph, GraphNode, NodeOp};

/// One node stripped to the fields consumers query on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortableNode {
    pub op: NodeOp,
    pub src: Vec<String>,
    pub tgt: String,
    #[serde(default)]
    pub context: Vec<String>,
}

/// Serialized form of a graph: node count plus node list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortableGraph {
    pub count: usize,
    pub nodes: Vec<PortableNode>,
}

impl PortableGraph {
    /// Graphs with one node or fewer carry no recommendation signal and
    /// are dropped by bulk producers.
    pub fn is_interesting(&self) -> bool {
        self.count > 1
    }
}

/// Graph of a single file inside a folder document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileGraph {
    pub file: String,
    pub graph: PortableGraph,
}

/// Top-level document emitted by the bulk harness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderGraphs {
    pub folder: String,
    pub files: Vec<FileGraph>,
}

/// Converts a graph to its portable form.
pub fn to_portable(graph: &DataFlowGraph) -> PortableGraph {
    PortableGraph {
        count: graph.count(),
        nodes: graph
            .nodes
            .iter()
            .map(|n| PortableNode {
                op: n.op,
                src: n.src.clone(),
                tgt: n.tgt.clone(),
                context: n.context.clone(),
            })
            .collect(),
    }
}

/// Rebuilds a graph from its portable form. Position and scope metadata
/// are not persisted and come back zeroed.
pub fn from_portable(portable: &PortableGraph) -> DataFlowGraph {
    DataFlowGraph::new(
        portable
            .nodes
            .iter()
            .map(|n| GraphNode {
                op: n.op,
                src: n.src.clone(),
                tgt: n.tgt.clone(),
                context: n.context.clone(),
                line: 0,
                scope_id: 0,
            })
            .collect(),
    )
}
