//! Argument expression classification.
//!
//! `classify` reduces a lowered argument expression to a canonical display
//! string: literals and constant references verbatim, composite expressions
//! flattened, and anything too dynamic to render collapsed to a small fixed
//! sentinel vocabulary a reader recognizes as "inspect manually".
//!
//! The function is total and pure: every `Expr` yields some stable string,
//! never an error, so aggregation downstream cannot fail on exotic input.

use crate::core::expr::{ArrayItem, Expr};

/// Sentinel for expressions whose value depends on user-defined state
/// (array index accesses, ternaries).
pub const USER_DEFINED: &str = "user-defined";

/// Sentinel for plain function calls.
pub const FUNCTION_CALL: &str = "function-call";

/// Sentinel for method calls with an unrenderable receiver.
pub const METHOD_CALL: &str = "method-call";

/// Sentinel for array literals with no renderable scalar item.
pub const ARRAY: &str = "array";

/// Fallback for unrecognized expression shapes.
pub const UNCLASSIFIED: &str = "0";

/// Reduce an argument expression to its canonical display string.
pub fn classify(expr: &Expr) -> String {
    match expr {
        Expr::StringLit(s) => s.clone(),
        Expr::ConstRef(name) => name.clone(),
        Expr::ClassConstRef { class, constant } => format!("{class}::{constant}"),
        Expr::IntLit(value) | Expr::FloatLit(value) => value.clone(),
        Expr::Concat { .. } => {
            let mut flattened = String::new();
            flatten_concat(expr, &mut flattened);
            flattened
        }
        Expr::ArrayIndex | Expr::Ternary => USER_DEFINED.to_string(),
        Expr::FunctionCall => FUNCTION_CALL.to_string(),
        Expr::Variable(name) => format!("${name}"),
        Expr::IntCast(inner) | Expr::BoolCast(inner) => classify(inner),
        Expr::ArrayLit(items) => {
            let rendered = render_array_items(items);
            if rendered.is_empty() {
                ARRAY.to_string()
            } else {
                format!("[{}]", rendered.join(", "))
            }
        }
        Expr::IssetGuard(first) => classify(first),
        Expr::MethodCallOnNew { class, method } => format!("{class}->{method}"),
        Expr::MethodCallOnVar { var, method } => format!("${var}->{method}"),
        Expr::MethodCall => METHOD_CALL.to_string(),
        Expr::StaticCall {
            class,
            method,
            args,
        } => {
            // Only array-literal arguments are rendered; everything else is
            // skipped rather than summarized.
            let rendered: Vec<String> = args
                .iter()
                .filter_map(|arg| match arg {
                    Expr::ArrayLit(items) => {
                        Some(format!("[{}]", render_array_items(items).join(", ")))
                    }
                    _ => None,
                })
                .collect();
            format!("{class}::{method}({})", rendered.join(","))
        }
        Expr::PropertyAccess { var, property } => format!("${var}->{property}"),
        Expr::Other => UNCLASSIFIED.to_string(),
    }
}

/// Flatten a concatenation tree into `out`, classifying leaves in
/// left-to-right order. A single in-order traversal: each leaf is visited
/// exactly once regardless of tree shape.
fn flatten_concat(expr: &Expr, out: &mut String) {
    match expr {
        Expr::Concat { left, right } => {
            flatten_concat(left, out);
            flatten_concat(right, out);
        }
        leaf => out.push_str(&classify(leaf)),
    }
}

/// Render the scalar items of an array literal as single-quoted values.
///
/// Bare items contribute their value, keyed items their key; items that are
/// not scalar literals (nested arrays, calls, variables) are skipped.
fn render_array_items(items: &[ArrayItem]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| match &item.key {
            None => item.value.scalar_text(),
            Some(key) => key.scalar_text(),
        })
        .map(|text| format!("'{text}'"))
        .collect()
}
