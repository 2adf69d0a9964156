//! Source parsing front-ends.
//!
//! Currently a single front-end:
//! - `php`: PHP source parser (tree-sitter) plus the CST → `Expr` lowering
//!   adapter that keeps the classifier independent of parser node shapes.

pub mod php;

pub use php::{ParsedPhp, call_argument_nodes, lower_expr, parse_php_source};
