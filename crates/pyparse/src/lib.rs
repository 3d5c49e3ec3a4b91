//! Mines data-flow graphs from Python source.
//!
//! The pipeline is `parse` (tree-sitter) then `build` (one visitor pass);
//! fragments from interactive callers take a detour through
//! [`normalizer::normalize`] first. Failures at the single-file
//! granularity are values, never panics, so bulk runs shrug them off.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use graph::{to_portable, DataFlowGraph, FileGraph, FolderGraphs};
use rayon::prelude::*;
use tracing::{debug, warn};

mod builder;
pub mod error;
pub mod normalizer;
mod parse;
#[cfg(test)]
mod tests;

pub use error::{NormalizeError, ParseError};
pub use normalizer::normalize;
pub use parse::{parse, ParsedTree};

/// Builds a graph from an already parsed tree. Never fails: unsupported
/// constructs inside the tree are skipped, not fatal.
pub fn build(tree: &ParsedTree) -> DataFlowGraph {
    builder::build(tree.root(), tree.source())
}

/// Parses `source` and mines its graph. The only failure mode is a parse
/// error; a degenerate but valid source yields an empty graph.
pub fn mine(source: &str) -> Result<DataFlowGraph, ParseError> {
    let tree = parse(source)?;
    Ok(build(&tree))
}

/// Interactive path: repair a partial statement, then mine it.
pub fn mine_fragment(fragment: &str) -> Result<DataFlowGraph, NormalizeError> {
    let repaired = normalize(fragment)?;
    Ok(mine(&repaired)?)
}

/// Mines one file from disk.
pub fn mine_file(path: &Path) -> Result<DataFlowGraph> {
    let content = fs::read_to_string(path)?;
    Ok(mine(&content)?)
}

/// Walks `root` for `.py` files and mines each independently, one
/// pipeline per file with no shared state. Unparseable files are logged
/// and skipped; graphs with one node or fewer carry no signal and are
/// dropped.
pub fn mine_dir(root: &Path) -> Result<FolderGraphs> {
    let mut paths = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    let mut seen = HashSet::new();
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if path.is_dir() {
                if seen.insert(path.clone()) {
                    stack.push(path);
                }
            } else if path.extension().and_then(|e| e.to_str()) == Some("py") {
                paths.push(path);
            }
        }
    }
    let mut files: Vec<FileGraph> = paths
        .par_iter()
        .filter_map(|path| mine_one(root, path))
        .collect();
    files.sort_by(|a, b| a.file.cmp(&b.file));
    Ok(FolderGraphs {
        folder: root.to_string_lossy().into_owned(),
        files,
    })
}

fn mine_one(root: &Path, path: &PathBuf) -> Option<FileGraph> {
    let content = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "failed to read file");
            return None;
        }
    };
    let graph = match mine(&content) {
        Ok(g) => g,
        Err(e) => {
            warn!(file = %path.display(), error = %e, "skipping unparseable file");
            return None;
        }
    };
    let portable = to_portable(&graph);
    if !portable.is_interesting() {
        debug!(file = %path.display(), count = portable.count, "dropping graph with no signal");
        return None;
    }
    let rel = path.strip_prefix(root).unwrap_or(path);
    Some(FileGraph {
        file: rel.to_string_lossy().into_owned(),
        graph: portable,
    })
}
