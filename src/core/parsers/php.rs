//! PHP front-end: tree-sitter parsing and CST lowering.
//!
//! Parsing produces a [`ParsedPhp`] per file; [`lower_expr`] maps argument
//! expression nodes from the concrete syntax tree into the crate's
//! [`Expr`](crate::core::expr::Expr) union so the classifier never depends on
//! tree-sitter node shapes. Lowering is total: unrecognized node kinds become
//! `Expr::Other`.
//!
//! A file with a syntax error is rejected as a whole (one error per file, no
//! partial results), mirroring how a front-end parser failure is handled
//! upstream.

use anyhow::{Result, anyhow};
use tree_sitter::{Node, Parser, Tree};

use crate::core::expr::{ArrayItem, Expr};

/// A successfully parsed PHP source file.
pub struct ParsedPhp {
    pub tree: Tree,
    pub source: String,
}

/// Parse PHP source code into a concrete syntax tree.
///
/// Returns an error if the grammar cannot be loaded or the source contains a
/// syntax error; the error message carries the first error location for the
/// per-file report.
pub fn parse_php_source(source: String, file_path: &str) -> Result<ParsedPhp> {
    let mut parser = Parser::new();
    let language = tree_sitter_php::LANGUAGE_PHP;
    parser
        .set_language(&language.into())
        .map_err(|e| anyhow!("Failed to load PHP grammar: {e}"))?;

    let tree = parser
        .parse(&source, None)
        .ok_or_else(|| anyhow!("Parser produced no tree for {file_path}"))?;

    if let Some(error) = first_syntax_error(tree.root_node()) {
        let point = error.start_position();
        return Err(anyhow!(
            "Syntax error in {} at line {}, column {}",
            file_path,
            point.row + 1,
            point.column + 1
        ));
    }

    Ok(ParsedPhp { tree, source })
}

/// Locate the first ERROR or MISSING node, if any.
fn first_syntax_error(node: Node) -> Option<Node> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_syntax_error)
}

fn node_text<'s>(node: Node, source: &'s str) -> &'s str {
    node.utf8_text(source.as_bytes()).unwrap_or_default()
}

/// Qualified names render as written, minus a leading root separator.
fn trim_namespace(name: &str) -> &str {
    name.trim_start_matches('\\')
}

fn unwrap_parens(mut node: Node) -> Node {
    while node.kind() == "parenthesized_expression" {
        match node.named_child(0) {
            Some(inner) => node = inner,
            None => break,
        }
    }
    node
}

/// The value expression of every argument of a call node, in source order.
pub fn call_argument_nodes(call: Node) -> Vec<Node> {
    let Some(arguments) = call.child_by_field_name("arguments") else {
        return Vec::new();
    };

    let mut cursor = arguments.walk();
    let mut nodes = Vec::new();
    for child in arguments.named_children(&mut cursor) {
        match child.kind() {
            // PHP 8 named arguments carry a leading label; the value is the
            // last named child either way.
            "argument" => {
                let count = child.named_child_count();
                if let Some(value) = child.named_child(count.saturating_sub(1)) {
                    nodes.push(value);
                }
            }
            "variadic_unpacking" => {
                if let Some(value) = child.named_child(0) {
                    nodes.push(value);
                }
            }
            "comment" => {}
            _ => nodes.push(child),
        }
    }
    nodes
}

/// Lower a CST expression node into the `Expr` union.
pub fn lower_expr(node: Node, source: &str) -> Expr {
    let node = unwrap_parens(node);
    match node.kind() {
        "string" | "encapsed_string" => lower_string(node, source),
        "integer" => Expr::IntLit(node_text(node, source).to_string()),
        "float" => Expr::FloatLit(node_text(node, source).to_string()),
        "name" | "qualified_name" | "boolean" | "true" | "false" | "null" => {
            Expr::ConstRef(trim_namespace(node_text(node, source)).to_string())
        }
        "class_constant_access_expression" => lower_class_constant(node, source),
        "binary_expression" => lower_binary(node, source),
        "subscript_expression" => Expr::ArrayIndex,
        "function_call_expression" => lower_function_call(node, source),
        "variable_name" => {
            Expr::Variable(node_text(node, source).trim_start_matches('$').to_string())
        }
        "cast_expression" => lower_cast(node, source),
        "array_creation_expression" => lower_array(node, source),
        "conditional_expression" => Expr::Ternary,
        "member_call_expression" => lower_member_call(node, source),
        "scoped_call_expression" => lower_scoped_call(node, source),
        "member_access_expression" => lower_member_access(node, source),
        _ => Expr::Other,
    }
}

/// Build the value of a quoted string.
///
/// Double-quoted strings with interpolation are not renderable and lower to
/// `Other`; simple content (with escape sequences) is decoded.
fn lower_string(node: Node, source: &str) -> Expr {
    let mut cursor = node.walk();
    let children: Vec<Node> = node.named_children(&mut cursor).collect();

    if children.is_empty() {
        // Older grammars expose no content children; strip the quotes.
        let text = node_text(node, source);
        let trimmed = text
            .strip_prefix(['\'', '"'])
            .and_then(|t| t.strip_suffix(['\'', '"']))
            .unwrap_or(text);
        return Expr::StringLit(trimmed.to_string());
    }

    let mut value = String::new();
    for child in children {
        match child.kind() {
            "string_content" => value.push_str(node_text(child, source)),
            "escape_sequence" => value.push_str(&unescape(node_text(child, source))),
            _ => return Expr::Other,
        }
    }
    Expr::StringLit(value)
}

fn unescape(sequence: &str) -> String {
    match sequence {
        "\\n" => "\n".to_string(),
        "\\t" => "\t".to_string(),
        "\\r" => "\r".to_string(),
        _ => sequence.trim_start_matches('\\').to_string(),
    }
}

fn lower_class_constant(node: Node, source: &str) -> Expr {
    let count = node.named_child_count();
    if count < 2 {
        return Expr::Other;
    }
    let (Some(scope), Some(constant)) = (node.named_child(0), node.named_child(count - 1)) else {
        return Expr::Other;
    };
    Expr::ClassConstRef {
        class: trim_namespace(node_text(scope, source)).to_string(),
        constant: node_text(constant, source).to_string(),
    }
}

/// Only the `.` operator is meaningful here; other binary operators are
/// composite expressions the report cannot say anything about.
fn lower_binary(node: Node, source: &str) -> Expr {
    let operator = node
        .child_by_field_name("operator")
        .map(|op| node_text(op, source));
    if operator != Some(".") {
        return Expr::Other;
    }
    let (Some(left), Some(right)) = (
        node.child_by_field_name("left"),
        node.child_by_field_name("right"),
    ) else {
        return Expr::Other;
    };
    Expr::Concat {
        left: Box::new(lower_expr(left, source)),
        right: Box::new(lower_expr(right, source)),
    }
}

/// `isset(...)` parses as a plain call on the name `isset`; it is the one
/// call shape that stays transparent (PHP treats the name
/// case-insensitively). Everything else collapses to the call sentinel.
fn lower_function_call(node: Node, source: &str) -> Expr {
    if let Some(callee) = node.child_by_field_name("function")
        && callee.kind() == "name"
        && node_text(callee, source).eq_ignore_ascii_case("isset")
        && let Some(first) = call_argument_nodes(node).first()
    {
        return Expr::IssetGuard(Box::new(lower_expr(*first, source)));
    }
    Expr::FunctionCall
}

fn lower_cast(node: Node, source: &str) -> Expr {
    let (Some(cast_type), Some(value)) = (
        node.child_by_field_name("type"),
        node.child_by_field_name("value"),
    ) else {
        return Expr::Other;
    };
    let inner = Box::new(lower_expr(value, source));
    match node_text(cast_type, source).to_ascii_lowercase().as_str() {
        "int" | "integer" => Expr::IntCast(inner),
        "bool" | "boolean" => Expr::BoolCast(inner),
        _ => Expr::Other,
    }
}

fn lower_array(node: Node, source: &str) -> Expr {
    let mut cursor = node.walk();
    let mut items = Vec::new();
    for element in node.named_children(&mut cursor) {
        if element.kind() != "array_element_initializer" {
            continue;
        }
        let mut element_cursor = element.walk();
        let parts: Vec<Node> = element
            .named_children(&mut element_cursor)
            .filter(|part| part.kind() != "comment")
            .collect();
        match parts.as_slice() {
            [value] => items.push(ArrayItem::bare(lower_expr(*value, source))),
            [key, value] => items.push(ArrayItem::keyed(
                lower_expr(*key, source),
                lower_expr(*value, source),
            )),
            _ => items.push(ArrayItem::bare(Expr::Other)),
        }
    }
    Expr::ArrayLit(items)
}

fn lower_member_call(node: Node, source: &str) -> Expr {
    let Some(method) = node
        .child_by_field_name("name")
        .filter(|name| name.kind() == "name")
    else {
        return Expr::MethodCall;
    };
    let method = node_text(method, source).to_string();

    let Some(object) = node.child_by_field_name("object").map(unwrap_parens) else {
        return Expr::MethodCall;
    };

    match object.kind() {
        "object_creation_expression" => {
            let mut cursor = object.walk();
            let class = object
                .named_children(&mut cursor)
                .find(|child| matches!(child.kind(), "name" | "qualified_name"));
            match class {
                Some(class) => Expr::MethodCallOnNew {
                    class: trim_namespace(node_text(class, source)).to_string(),
                    method,
                },
                None => Expr::MethodCall,
            }
        }
        "variable_name" => Expr::MethodCallOnVar {
            var: node_text(object, source).trim_start_matches('$').to_string(),
            method,
        },
        _ => Expr::MethodCall,
    }
}

fn lower_scoped_call(node: Node, source: &str) -> Expr {
    let (Some(scope), Some(method)) = (
        node.child_by_field_name("scope"),
        node.child_by_field_name("name"),
    ) else {
        return Expr::Other;
    };
    let args = call_argument_nodes(node)
        .into_iter()
        .map(|arg| lower_expr(arg, source))
        .collect();
    Expr::StaticCall {
        class: trim_namespace(node_text(scope, source)).to_string(),
        method: node_text(method, source).to_string(),
        args,
    }
}

fn lower_member_access(node: Node, source: &str) -> Expr {
    let object = node.child_by_field_name("object").map(unwrap_parens);
    let name = node
        .child_by_field_name("name")
        .filter(|name| name.kind() == "name");
    match (object, name) {
        (Some(object), Some(name)) if object.kind() == "variable_name" => Expr::PropertyAccess {
            var: node_text(object, source).trim_start_matches('$').to_string(),
            property: node_text(name, source).to_string(),
        },
        _ => Expr::Other,
    }
}
