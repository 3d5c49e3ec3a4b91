use super::*;
use serde_json::Value as JsonValue;

fn becomes(tgt: &str, src: &[&str]) -> GraphNode {
    GraphNode {
        op: NodeOp::Becomes,
        src: src.iter().map(|s| s.to_string()).collect(),
        tgt: tgt.into(),
        context: Vec::new(),
        line: 1,
        scope_id: 0,
    }
}

fn calls(tgt: &str, args: &[&str]) -> GraphNode {
    GraphNode {
        op: NodeOp::Calls,
        src: Vec::new(),
        tgt: tgt.into(),
        context: args.iter().map(|s| s.to_string()).collect(),
        line: 2,
        scope_id: 0,
    }
}

#[test]
fn count_tracks_node_sequence() {
    let g = DataFlowGraph::default();
    assert_eq!(g.count(), 0, "empty graph must report zero nodes");
    let g = DataFlowGraph::new(vec![becomes("x", &["int"]), calls("x.bar", &["1"])]);
    assert_eq!(g.count(), 2);
}

#[test]
fn suffix_matching_is_symmetric() {
    let g = DataFlowGraph::new(vec![becomes("self.x", &["int"])]);
    let (defs, _) = g.find_definitions_and_calls("x");
    assert_eq!(defs.len(), 1, "self.x binding should be found by bare x");

    let g = DataFlowGraph::new(vec![becomes("x", &["int"])]);
    let (defs, _) = g.find_definitions_and_calls("self.x");
    assert_eq!(defs.len(), 1, "bare x binding should be found by self.x");
}

#[test]
fn middle_segments_do_not_match() {
    let g = DataFlowGraph::new(vec![becomes("a.b.c", &["unknown"])]);
    let (defs, _) = g.find_definitions_and_calls("b");
    assert!(
        defs.is_empty(),
        "a.b.c must not be found by its middle segment"
    );
    let (defs, _) = g.find_definitions_and_calls("c");
    assert_eq!(defs.len(), 1, "a.b.c should be found by its last segment");
}

#[test]
fn calls_match_by_receiver() {
    let g = DataFlowGraph::new(vec![
        becomes("x", &["Foo"]),
        calls("x.bar", &["1", "2"]),
        calls("y.bar", &[]),
    ]);
    let (defs, found) = g.find_definitions_and_calls("x");
    assert_eq!(defs.len(), 1);
    assert_eq!(found.len(), 1, "only calls received by x should match");
    assert_eq!(found[0].tgt, "x.bar");
    assert_eq!(found[0].context, vec!["1".to_string(), "2".to_string()]);
}

#[test]
fn dies_nodes_are_excluded_from_query_results() {
    let g = DataFlowGraph::new(vec![
        becomes("x", &["int"]),
        GraphNode {
            op: NodeOp::Dies,
            src: vec!["int".into()],
            tgt: "x".into(),
            context: Vec::new(),
            line: 3,
            scope_id: 0,
        },
    ]);
    let (defs, found) = g.find_definitions_and_calls("x");
    assert_eq!(defs.len(), 1);
    assert!(found.is_empty());
}

#[test]
fn portable_round_trip_preserves_event_tuples() {
    let g = DataFlowGraph::new(vec![
        becomes("x", &["Foo"]),
        calls("x.bar", &["1", "b"]),
        becomes("y", &["int", "str"]),
    ]);
    let portable = to_portable(&g);
    assert_eq!(portable.count, g.count());
    let back = from_portable(&portable);
    let tuples = |g: &DataFlowGraph| {
        g.nodes
            .iter()
            .map(|n| (n.op, n.src.clone(), n.tgt.clone(), n.context.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(tuples(&back), tuples(&g));
}

#[test]
fn portable_json_uses_external_schema() {
    let doc = FolderGraphs {
        folder: "proj".into(),
        files: vec![FileGraph {
            file: "a.py".into(),
            graph: to_portable(&DataFlowGraph::new(vec![
                becomes("x", &["int"]),
                calls("x.bar", &[]),
            ])),
        }],
    };
    let json = serde_json::to_string(&doc).unwrap();
    let v: JsonValue = serde_json::from_str(&json).unwrap();
    assert_eq!(v["folder"], "proj");
    assert_eq!(v["files"][0]["file"], "a.py");
    assert_eq!(v["files"][0]["graph"]["count"], 2);
    assert_eq!(v["files"][0]["graph"]["nodes"][0]["op"], "becomes");
    assert_eq!(v["files"][0]["graph"]["nodes"][1]["op"], "calls");
}

#[test]
fn single_node_graphs_are_not_interesting() {
    let one = to_portable(&DataFlowGraph::new(vec![becomes("x", &["int"])]));
    assert!(!one.is_interesting());
    let two = to_portable(&DataFlowGraph::new(vec![
        becomes("x", &["int"]),
        becomes("y", &["int"]),
    ]));
    assert!(two.is_interesting());
}

#[test]
fn dot_export_lists_every_node() {
    let g = DataFlowGraph::new(vec![becomes("x", &["int"]), calls("x.bar", &[])]);
    let dot = g.to_dot();
    assert!(dot.starts_with("digraph flow {"));
    assert!(dot.contains("x.bar"));
    assert!(dot.contains("n0 -> n1"));
}
