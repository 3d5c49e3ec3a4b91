//! The AST visitor that turns a parsed tree into a [`DataFlowGraph`].
//!
//! One depth-first pass in source order. Bindings, call sites and deaths
//! are appended to a flat node list; scoping is tracked with an explicit
//! stack of frames. No real type inference happens here: provenance is a
//! small vocabulary of textual tags (literal kinds, callee names,
//! `expression`, `unknown`). Unsupported constructs are skipped wholesale
//! rather than failing the file; a partial graph beats no graph for a
//! mining tool.

use std::collections::{HashMap, HashSet};

use graph::{DataFlowGraph, GraphNode, NodeOp};
use tree_sitter::Node;

const UNKNOWN: &str = "unknown";
const EXPRESSION: &str = "expression";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeKind {
    Module,
    Function,
    Class,
    Comprehension,
}

/// One bookkeeping frame: names local to a block, their last known
/// provenance tags, and `global`-declared names that escape it.
#[derive(Debug, Clone)]
struct ScopeFrame {
    id: usize,
    kind: ScopeKind,
    /// First-binding order, so deaths come out deterministically.
    order: Vec<String>,
    tags: HashMap<String, Vec<String>>,
    globals: HashSet<String>,
}

impl ScopeFrame {
    fn new(id: usize, kind: ScopeKind) -> Self {
        Self {
            id,
            kind,
            order: Vec::new(),
            tags: HashMap::new(),
            globals: HashSet::new(),
        }
    }
}

pub(crate) fn build(root: Node, src: &str) -> DataFlowGraph {
    let mut builder = GraphBuilder {
        src,
        nodes: Vec::new(),
        scopes: vec![ScopeFrame::new(0, ScopeKind::Module)],
        scope_counter: 0,
        branch_depth: 0,
    };
    builder.visit(root);
    DataFlowGraph::new(builder.nodes)
}

struct GraphBuilder<'a> {
    src: &'a str,
    nodes: Vec<GraphNode>,
    scopes: Vec<ScopeFrame>,
    scope_counter: usize,
    branch_depth: usize,
}

impl<'a> GraphBuilder<'a> {
    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.src.as_bytes()).unwrap_or("")
    }

    fn line(&self, node: Node) -> usize {
        node.start_position().row + 1
    }

    fn emit(
        &mut self,
        op: NodeOp,
        src: Vec<String>,
        tgt: String,
        context: Vec<String>,
        line: usize,
        scope_id: usize,
    ) {
        self.nodes.push(GraphNode {
            op,
            src,
            tgt,
            context,
            line,
            scope_id,
        });
    }

    fn push_frame(&mut self, kind: ScopeKind) {
        self.scope_counter += 1;
        self.scopes.push(ScopeFrame::new(self.scope_counter, kind));
    }

    /// Closes the top frame: every name still bound to it dies, in
    /// first-binding order.
    fn pop_frame(&mut self, end_line: usize) {
        let Some(frame) = self.scopes.pop() else {
            return;
        };
        for name in &frame.order {
            if let Some(tags) = frame.tags.get(name) {
                self.emit(
                    NodeOp::Dies,
                    tags.clone(),
                    name.clone(),
                    Vec::new(),
                    end_line,
                    frame.id,
                );
            }
        }
    }

    /// Innermost-out lookup of a name's last known provenance tags.
    fn lookup(&self, name: &str) -> Option<&Vec<String>> {
        self.scopes.iter().rev().find_map(|f| f.tags.get(name))
    }

    fn is_bound(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Frame a binding of `name` lands in: dotted targets (`self.attr`)
    /// attach to the nearest class frame so they survive method exit;
    /// `global`-declared names go to the module frame; everything else is
    /// local to the current frame.
    fn bind_index(&self, name: &str) -> usize {
        if name.contains('.') {
            return self
                .scopes
                .iter()
                .rposition(|f| f.kind == ScopeKind::Class)
                .unwrap_or(0);
        }
        if let Some(current) = self.scopes.last() {
            if current.globals.contains(name) {
                return 0;
            }
        }
        self.scopes.len() - 1
    }

    /// Emits a `becomes` for `name`. A rebinding that supersedes an
    /// existing binding in the same frame kills the old one first, but
    /// only outside conditional context: inside a branch both bindings
    /// stay possible.
    fn bind(&mut self, name: &str, tags: Vec<String>, line: usize) {
        let idx = self.bind_index(name);
        let scope_id = self.scopes[idx].id;
        if self.branch_depth == 0 {
            if let Some(old) = self.scopes[idx].tags.get(name).cloned() {
                self.emit(NodeOp::Dies, old, name.to_string(), Vec::new(), line, scope_id);
            }
        }
        self.emit(
            NodeOp::Becomes,
            tags.clone(),
            name.to_string(),
            Vec::new(),
            line,
            scope_id,
        );
        let frame = &mut self.scopes[idx];
        if !frame.tags.contains_key(name) {
            frame.order.push(name.to_string());
        }
        frame.tags.insert(name.to_string(), tags);
    }

    /// Kills `name` explicitly (`del`) and drops its binding.
    fn kill(&mut self, name: &str, line: usize) {
        for i in (0..self.scopes.len()).rev() {
            if let Some(tags) = self.scopes[i].tags.remove(name) {
                let scope_id = self.scopes[i].id;
                self.scopes[i].order.retain(|n| n != name);
                self.emit(NodeOp::Dies, tags, name.to_string(), Vec::new(), line, scope_id);
                return;
            }
        }
        // Deleting an unbound name still marks a death.
        let scope_id = self.scopes.last().map(|f| f.id).unwrap_or(0);
        self.emit(
            NodeOp::Dies,
            vec![UNKNOWN.to_string()],
            name.to_string(),
            Vec::new(),
            line,
            scope_id,
        );
    }

    /// Lightweight right-hand-side classifier: maps an expression to the
    /// closed set of provenance tags.
    fn classify(&self, node: Node) -> Vec<String> {
        let tag = |s: &str| vec![s.to_string()];
        match node.kind() {
            "integer" => tag("int"),
            "float" => tag("float"),
            "string" | "concatenated_string" => tag("str"),
            "true" | "false" => tag("bool"),
            "none" => tag("None"),
            "list" => tag("list"),
            "list_comprehension" => tag("list"),
            "dictionary" | "dictionary_comprehension" => tag("dict"),
            "set" | "set_comprehension" => tag("set"),
            "tuple" => tag("tuple"),
            "lambda" => tag("function"),
            "call" => match node.child_by_field_name("function") {
                Some(func) => tag(self.text(func)),
                None => tag(UNKNOWN),
            },
            "identifier" | "attribute" => match self.lookup(self.text(node)) {
                Some(tags) => tags.clone(),
                None => tag(UNKNOWN),
            },
            "binary_operator" | "boolean_operator" | "comparison_operator" | "not_operator"
            | "unary_operator" | "conditional_expression" | "generator_expression" => {
                tag(EXPRESSION)
            }
            "parenthesized_expression" => match node.named_child(0) {
                Some(inner) => self.classify(inner),
                None => tag(UNKNOWN),
            },
            _ => tag(UNKNOWN),
        }
    }

    /// True when a callee is a pure dotted name chain (`a.b.c`), as
    /// opposed to a call on a subscript or on another call's result.
    fn is_name_chain(&self, node: Node) -> bool {
        match node.kind() {
            "identifier" => true,
            "attribute" => node
                .child_by_field_name("object")
                .map(|obj| self.is_name_chain(obj))
                .unwrap_or(false),
            _ => false,
        }
    }

    /// Walks an expression in as-written order, emitting `calls` events
    /// and handling the binding constructs expressions can contain
    /// (comprehensions and lambdas). Skipped subtrees: walrus bindings
    /// and awaits.
    fn visit_expr(&mut self, node: Node) {
        match node.kind() {
            "call" => {
                self.emit_call(node);
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit_expr(child);
                }
            }
            "list_comprehension" | "dictionary_comprehension" | "set_comprehension"
            | "generator_expression" => {
                self.visit_comprehension(node);
            }
            "lambda" => self.visit_lambda(node),
            "named_expression" | "await" => {}
            _ => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    self.visit_expr(child);
                }
            }
        }
    }

    /// Emits a `calls` node when the callee warrants one. Dotted chains
    /// always do; a bare name only when it resolves to a local binding.
    /// Bare constructor or library calls (`Foo()`, `print(x)`) surface
    /// only as the provenance of whatever binding encloses them.
    fn emit_call(&mut self, call: Node) {
        let Some(func) = call.child_by_field_name("function") else {
            return;
        };
        if !self.is_name_chain(func) {
            return;
        }
        let tgt = self.text(func).to_string();
        let is_attribute = func.kind() == "attribute";
        if !is_attribute && !self.is_bound(&tgt) {
            return;
        }
        let receiver = match tgt.rsplit_once('.') {
            Some((head, _)) => head.to_string(),
            None => tgt.clone(),
        };
        let src = self.lookup(&receiver).cloned().unwrap_or_default();
        let mut context = Vec::new();
        if let Some(args) = call.child_by_field_name("arguments") {
            let mut cursor = args.walk();
            for arg in args.named_children(&mut cursor) {
                if arg.kind() == "comment" {
                    continue;
                }
                context.push(self.text(arg).to_string());
            }
        }
        let line = self.line(call);
        let scope_id = self.scopes.last().map(|f| f.id).unwrap_or(0);
        self.emit(NodeOp::Calls, src, tgt, context, line, scope_id);
    }

    /// Collects bindable target names from an assignment left-hand side:
    /// plain names, dotted attributes, and tuple/list unpacking.
    fn gather_targets(&self, node: Node, out: &mut Vec<String>) {
        match node.kind() {
            "identifier" => out.push(self.text(node).to_string()),
            "attribute" => {
                if self.is_name_chain(node) {
                    out.push(self.text(node).to_string());
                }
            }
            "pattern_list" | "tuple_pattern" | "list_pattern" | "tuple" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.gather_targets(child, out);
                }
            }
            _ => {}
        }
    }

    /// Handles `target = expr` (including chained `a = b = expr`).
    /// Returns the provenance tags of the right-hand side so chained
    /// assignments share them.
    fn handle_assignment(&mut self, node: Node) -> Vec<String> {
        let Some(left) = node.child_by_field_name("left") else {
            return Vec::new();
        };
        let Some(right) = node.child_by_field_name("right") else {
            // Annotation-only statement (`x: int`): nothing is bound.
            return Vec::new();
        };
        let tags = if right.kind() == "assignment" {
            self.handle_assignment(right)
        } else if right.kind() == "lambda" {
            self.visit_lambda(right);
            vec!["function".to_string()]
        } else {
            self.visit_expr(right);
            self.classify(right)
        };
        let tags = if tags.is_empty() {
            vec![UNKNOWN.to_string()]
        } else {
            tags
        };
        let mut targets = Vec::new();
        self.gather_targets(left, &mut targets);
        let line = self.line(left);
        for target in &targets {
            self.bind(target, tags.clone(), line);
        }
        tags
    }

    fn handle_augmented(&mut self, node: Node) {
        let (Some(left), Some(right)) = (
            node.child_by_field_name("left"),
            node.child_by_field_name("right"),
        ) else {
            return;
        };
        self.visit_expr(right);
        let mut targets = Vec::new();
        self.gather_targets(left, &mut targets);
        let line = self.line(left);
        for target in &targets {
            // Old value combines with the new one; the result is an
            // expression, not a fresh binding of the old provenance.
            self.bind(target, vec![EXPRESSION.to_string()], line);
        }
    }

    /// Union-merges per-branch binding states: every name bound in any
    /// branch survives with the union of its per-branch tags. Frames line
    /// up by stack position since branches balance their own pushes.
    fn merge_states(&mut self, states: Vec<Vec<ScopeFrame>>) {
        let Some(first) = states.first() else {
            return;
        };
        let mut merged = first.clone();
        for state in states.iter().skip(1) {
            for (idx, frame) in state.iter().enumerate() {
                let Some(target) = merged.get_mut(idx) else {
                    continue;
                };
                for name in &frame.order {
                    let Some(tags) = frame.tags.get(name) else {
                        continue;
                    };
                    match target.tags.get_mut(name) {
                        Some(existing) => {
                            for tag in tags {
                                if !existing.contains(tag) {
                                    existing.push(tag.clone());
                                }
                            }
                        }
                        None => {
                            target.order.push(name.clone());
                            target.tags.insert(name.clone(), tags.clone());
                        }
                    }
                }
                target.globals.extend(frame.globals.iter().cloned());
            }
        }
        self.scopes = merged;
    }

    fn visit_branch(&mut self, node: Node) {
        self.branch_depth += 1;
        self.visit(node);
        self.branch_depth -= 1;
    }

    /// If/elif/else: branches are visited in source order, each starting
    /// from the pre-branch state. No path exclusivity is tracked; the
    /// merged state is the union of outcomes, which is exactly what the
    /// downstream recommender wants to see.
    fn visit_if(&mut self, node: Node) {
        if let Some(cond) = node.child_by_field_name("condition") {
            self.visit_expr(cond);
        }
        let before = self.scopes.clone();
        let mut states = Vec::new();
        if let Some(consequence) = node.child_by_field_name("consequence") {
            self.visit_branch(consequence);
            states.push(std::mem::replace(&mut self.scopes, before.clone()));
        }
        let mut has_else = false;
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "elif_clause" => {
                    if let Some(cond) = child.child_by_field_name("condition") {
                        self.visit_expr(cond);
                    }
                    if let Some(body) = child.child_by_field_name("consequence") {
                        self.visit_branch(body);
                    }
                    states.push(std::mem::replace(&mut self.scopes, before.clone()));
                }
                "else_clause" => {
                    has_else = true;
                    let body = child
                        .child_by_field_name("body")
                        .or_else(|| child.named_child(0));
                    if let Some(body) = body {
                        self.visit_branch(body);
                    }
                    states.push(std::mem::replace(&mut self.scopes, before.clone()));
                }
                _ => {}
            }
        }
        if !has_else {
            states.push(before);
        }
        self.merge_states(states);
    }

    fn visit_while(&mut self, node: Node) {
        if let Some(cond) = node.child_by_field_name("condition") {
            self.visit_expr(cond);
        }
        let before = self.scopes.clone();
        if let Some(body) = node.child_by_field_name("body") {
            self.visit_branch(body);
        }
        let after = std::mem::replace(&mut self.scopes, Vec::new());
        // The body may run zero times, so the pre-loop state stays live.
        self.merge_states(vec![after, before]);
    }

    fn visit_for(&mut self, node: Node) {
        if node.child(0).map(|c| c.kind() == "async").unwrap_or(false) {
            return;
        }
        if let Some(right) = node.child_by_field_name("right") {
            self.visit_expr(right);
        }
        if let Some(left) = node.child_by_field_name("left") {
            let mut targets = Vec::new();
            self.gather_targets(left, &mut targets);
            let line = self.line(left);
            for target in &targets {
                // Element provenance is opaque without real inference.
                self.bind(target, vec![UNKNOWN.to_string()], line);
            }
        }
        let before = self.scopes.clone();
        if let Some(body) = node.child_by_field_name("body") {
            self.visit_branch(body);
        }
        let after = std::mem::replace(&mut self.scopes, Vec::new());
        self.merge_states(vec![after, before]);
    }

    /// Try body, handlers, else, finally, in source order. A handler's
    /// `as` name lives only inside that handler.
    fn visit_try(&mut self, node: Node) {
        if let Some(body) = node.child_by_field_name("body") {
            self.visit_branch(body);
        }
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "except_clause" => self.visit_except(child),
                "else_clause" => {
                    let body = child
                        .child_by_field_name("body")
                        .or_else(|| child.named_child(0));
                    if let Some(body) = body {
                        self.visit_branch(body);
                    }
                }
                "finally_clause" => {
                    if let Some(body) = child.named_child(0) {
                        self.visit(body);
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_except(&mut self, node: Node) {
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        let body = children.iter().rev().find(|c| c.kind() == "block").copied();
        let mut alias: Option<(String, usize)> = None;
        let mut tags = vec![UNKNOWN.to_string()];
        // `except Type as name:` comes out either as an `as_pattern` child
        // or as positional [type, name] children, depending on grammar
        // minor version.
        match children.first() {
            Some(first) if first.kind() == "as_pattern" => {
                if let Some(ty) = first.named_child(0) {
                    tags = vec![self.text(ty).to_string()];
                }
                if let Some(target) = first.child_by_field_name("alias") {
                    alias = Some((self.text(target).to_string(), self.line(target)));
                }
            }
            Some(first) if first.kind() != "block" => {
                tags = vec![self.text(*first).to_string()];
                if children.len() >= 3 && children[1].kind() == "identifier" {
                    alias = Some((self.text(children[1]).to_string(), self.line(children[1])));
                }
            }
            _ => {}
        }
        if let Some((name, line)) = &alias {
            self.bind(name, tags, *line);
        }
        if let Some(body) = body {
            self.visit_branch(body);
        }
        if let Some((name, _)) = alias {
            let line = node.end_position().row + 1;
            for i in (0..self.scopes.len()).rev() {
                if let Some(tags) = self.scopes[i].tags.remove(&name) {
                    let scope_id = self.scopes[i].id;
                    self.scopes[i].order.retain(|n| n != &name);
                    self.emit(NodeOp::Dies, tags, name.clone(), Vec::new(), line, scope_id);
                    break;
                }
            }
        }
    }

    /// `with expr as name:` binds the name for the duration of the block;
    /// it dies when the block ends.
    fn visit_with(&mut self, node: Node) {
        if node.child(0).map(|c| c.kind() == "async").unwrap_or(false) {
            return;
        }
        let mut bound = Vec::new();
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() != "with_clause" {
                continue;
            }
            let mut items = child.walk();
            for item in child.named_children(&mut items) {
                if item.kind() != "with_item" {
                    continue;
                }
                let Some(value) = item.named_child(0) else {
                    continue;
                };
                if value.kind() == "as_pattern" {
                    let expr = value.named_child(0);
                    if let Some(expr) = expr {
                        self.visit_expr(expr);
                    }
                    if let Some(aliased) = value.child_by_field_name("alias") {
                        let name = self.text(aliased).to_string();
                        let tags = expr.map(|e| self.classify(e)).unwrap_or_default();
                        let tags = if tags.is_empty() {
                            vec![UNKNOWN.to_string()]
                        } else {
                            tags
                        };
                        self.bind(&name, tags, self.line(aliased));
                        bound.push(name);
                    }
                } else {
                    self.visit_expr(value);
                }
            }
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body);
        }
        let end_line = node.end_position().row + 1;
        for name in bound {
            for i in (0..self.scopes.len()).rev() {
                if let Some(tags) = self.scopes[i].tags.remove(&name) {
                    let scope_id = self.scopes[i].id;
                    self.scopes[i].order.retain(|n| n != &name);
                    self.emit(NodeOp::Dies, tags, name.clone(), Vec::new(), end_line, scope_id);
                    break;
                }
            }
        }
    }

    /// Comprehensions open their own scope: binding variables exist only
    /// inside and die when the expression ends.
    fn visit_comprehension(&mut self, node: Node) {
        self.push_frame(ScopeKind::Comprehension);
        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        for child in &children {
            match child.kind() {
                "for_in_clause" => {
                    if let Some(right) = child.child_by_field_name("right") {
                        self.visit_expr(right);
                    }
                    if let Some(left) = child.child_by_field_name("left") {
                        let mut targets = Vec::new();
                        self.gather_targets(left, &mut targets);
                        let line = self.line(left);
                        for target in &targets {
                            self.bind(target, vec![UNKNOWN.to_string()], line);
                        }
                    }
                }
                "if_clause" => {
                    if let Some(cond) = child.named_child(0) {
                        self.visit_expr(cond);
                    }
                }
                _ => {}
            }
        }
        // The element expression comes first syntactically but is
        // evaluated against the clause bindings.
        if let Some(body) = node.child_by_field_name("body").or(children.first().copied()) {
            if !matches!(body.kind(), "for_in_clause" | "if_clause") {
                self.visit_expr(body);
            }
        }
        self.pop_frame(node.end_position().row + 1);
    }

    /// Function definitions: parameters are born at scope entry, every
    /// local still bound at the end of the body dies there, and the
    /// function's own name is a binding in the enclosing scope, emitted
    /// after the body's events.
    fn visit_function(&mut self, node: Node) {
        if node.child(0).map(|c| c.kind() == "async").unwrap_or(false) {
            return;
        }
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node).to_string();
        // Default values run in the enclosing scope.
        if let Some(params) = node.child_by_field_name("parameters") {
            let mut cursor = params.walk();
            for param in params.named_children(&mut cursor) {
                if matches!(param.kind(), "default_parameter" | "typed_default_parameter") {
                    if let Some(value) = param.child_by_field_name("value") {
                        self.visit_expr(value);
                    }
                }
            }
        }
        self.push_frame(ScopeKind::Function);
        if let Some(params) = node.child_by_field_name("parameters") {
            self.bind_parameters(params);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body);
        }
        self.pop_frame(node.end_position().row + 1);
        self.bind(&name, vec!["function".to_string()], self.line(name_node));
    }

    fn bind_parameters(&mut self, params: Node) {
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            let ident = match param.kind() {
                "identifier" => Some(param),
                "typed_parameter" | "list_splat_pattern" | "dictionary_splat_pattern" => {
                    param.named_child(0)
                }
                "default_parameter" | "typed_default_parameter" => {
                    param.child_by_field_name("name")
                }
                _ => None,
            };
            if let Some(ident) = ident {
                if ident.kind() == "identifier" {
                    let name = self.text(ident).to_string();
                    self.bind(&name, vec![UNKNOWN.to_string()], self.line(ident));
                }
            }
        }
    }

    fn visit_lambda(&mut self, node: Node) {
        self.push_frame(ScopeKind::Function);
        if let Some(params) = node.child_by_field_name("parameters") {
            self.bind_parameters(params);
        }
        if let Some(body) = node.child_by_field_name("body") {
            self.visit_expr(body);
        }
        self.pop_frame(node.end_position().row + 1);
    }

    /// Class bodies are scopes for attribute bindings. `self.attr`
    /// targets inside methods land here too (see [`Self::bind_index`]),
    /// so they outlive the method and die with the class body.
    fn visit_class(&mut self, node: Node) {
        let Some(name_node) = node.child_by_field_name("name") else {
            return;
        };
        let name = self.text(name_node).to_string();
        if let Some(superclasses) = node.child_by_field_name("superclasses") {
            self.visit_expr(superclasses);
        }
        self.push_frame(ScopeKind::Class);
        if let Some(body) = node.child_by_field_name("body") {
            self.visit(body);
        }
        self.pop_frame(node.end_position().row + 1);
        self.bind(&name, vec!["class".to_string()], self.line(name_node));
    }

    fn visit_del(&mut self, node: Node) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            let mut targets = Vec::new();
            match child.kind() {
                "expression_list" => {
                    let mut ec = child.walk();
                    for e in child.named_children(&mut ec) {
                        self.gather_targets(e, &mut targets);
                    }
                }
                _ => self.gather_targets(child, &mut targets),
            }
            let line = self.line(child);
            for target in targets {
                self.kill(&target, line);
            }
        }
    }

    fn visit_global(&mut self, node: Node) {
        let mut names = Vec::new();
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            if child.kind() == "identifier" {
                names.push(self.text(child).to_string());
            }
        }
        if let Some(frame) = self.scopes.last_mut() {
            frame.globals.extend(names);
        }
    }

    /// Statement dispatch. Anything not listed is an unsupported or inert
    /// construct and is skipped without aborting its siblings.
    fn visit(&mut self, node: Node) {
        match node.kind() {
            "module" | "block" | "else_clause" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.visit(child);
                }
            }
            "expression_statement" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    match child.kind() {
                        "assignment" => {
                            self.handle_assignment(child);
                        }
                        "augmented_assignment" => self.handle_augmented(child),
                        _ => self.visit_expr(child),
                    }
                }
            }
            "assignment" => {
                self.handle_assignment(node);
            }
            "augmented_assignment" => self.handle_augmented(node),
            "if_statement" => self.visit_if(node),
            "while_statement" => self.visit_while(node),
            "for_statement" => self.visit_for(node),
            "try_statement" => self.visit_try(node),
            "with_statement" => self.visit_with(node),
            "function_definition" => self.visit_function(node),
            "class_definition" => self.visit_class(node),
            "decorated_definition" => {
                let mut cursor = node.walk();
                for child in node.children(&mut cursor) {
                    if child.kind() == "decorator" {
                        self.visit_expr(child);
                    }
                }
                if let Some(definition) = node.child_by_field_name("definition") {
                    self.visit(definition);
                }
            }
            "return_statement" | "raise_statement" | "assert_statement" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    self.visit_expr(child);
                }
            }
            "delete_statement" => self.visit_del(node),
            "global_statement" => self.visit_global(node),
            _ => {}
        }
    }
}
