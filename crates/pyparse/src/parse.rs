//! Thin wrapper around the tree-sitter Python grammar.

use tree_sitter::{Node, Tree};

use crate::error::ParseError;

/// A successfully parsed source unit. Owns both the tree and the text it
/// was parsed from, so the visitor can resolve node spans.
#[derive(Debug)]
pub struct ParsedTree {
    tree: Tree,
    source: String,
}

impl ParsedTree {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}

/// Parses `source` as Python. Any syntax error, including partial or
/// unterminated constructs, comes back as a [`ParseError`] value; nothing
/// is ever propagated as a panic. Empty or comment-only input parses
/// successfully and yields an empty graph downstream.
pub fn parse(source: &str) -> Result<ParsedTree, ParseError> {
    let mut parser = tree_sitter::Parser::new();
    parser
        .set_language(tree_sitter_python::language())
        .map_err(|e| ParseError::new(format!("failed to load python grammar: {e}")))?;
    let Some(tree) = parser.parse(source, None) else {
        return Err(ParseError::new("parser produced no tree"));
    };
    let root = tree.root_node();
    // `has_error` alone misses trees whose only defect is a MISSING node,
    // such as a suite opener with no body.
    let error = first_error(root);
    if root.has_error() || error.is_some() {
        let message = match error {
            Some((line, column)) => format!("syntax error at line {line}, column {column}"),
            None => "syntax error".to_string(),
        };
        return Err(ParseError::new(message));
    }
    Ok(ParsedTree {
        tree,
        source: source.to_string(),
    })
}

fn first_error(node: Node) -> Option<(usize, usize)> {
    if node.is_error() || node.is_missing() {
        let pos = node.start_position();
        return Some((pos.row + 1, pos.column + 1));
    }
    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(found) = first_error(child) {
            return Some(found);
        }
    }
    None
}
