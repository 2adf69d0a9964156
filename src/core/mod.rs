//! Core scanning engine.
//!
//! The pipeline, leaves first:
//!
//! - `expr` / `classify`: the lowered argument representation and the pure
//!   classifier reducing it to a display string
//! - `matcher`: the (receiver, method) pattern registry and call signatures
//! - `formatter`: post-classification argument transformers
//! - `usage_map`: ordered accumulation of matched call-site arguments
//! - `parsers`: the tree-sitter PHP front-end and lowering adapter
//! - `collector`: single-pass per-file call-site collection
//! - `file_scanner`: `.php` enumeration with excluded-substring filtering
//! - `context`: `Documentor`, the orchestrator tying the above together

pub mod classify;
pub mod collector;
pub mod context;
pub mod expr;
pub mod file_scanner;
pub mod formatter;
pub mod matcher;
pub mod parsers;
pub mod usage_map;

pub use classify::classify;
pub use collector::CallSiteCollector;
pub use context::{Documentor, RetrieveResult};
pub use expr::{ArrayItem, Expr};
pub use formatter::{ArgumentFormatter, FormatterChain};
pub use matcher::{CallKind, CallPatterns, CallSite};
pub use usage_map::{ArgumentList, UsageAccumulator, UsageMap};
