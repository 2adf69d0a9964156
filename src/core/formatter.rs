//! Post-classification argument formatting.
//!
//! Formatters transform the classified argument string before it is stored;
//! they never see the lowered expression tree, so post-processing policy
//! stays decoupled from the classifier's representation. A chain is
//! validated once at construction: candidates that don't resolve to a known
//! formatter are dropped with one warning each, and construction never
//! fails.

use crate::logbuf::LogBuffer;

/// A single argument transformer.
///
/// Receives the matched receiver and method names for context plus the
/// classified value, and returns the (possibly) transformed value.
pub trait ArgumentFormatter: Send + Sync {
    fn format_argument(&self, receiver: &str, method: &str, value: String) -> String;
}

/// Ordered, validated list of argument formatters.
///
/// At call time each retained formatter is applied in order, its output
/// feeding the next formatter's input.
#[derive(Default)]
pub struct FormatterChain {
    formatters: Vec<Box<dyn ArgumentFormatter>>,
}

impl FormatterChain {
    /// A chain that passes values through untouched.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Assemble a chain from trait objects directly. No validation is
    /// needed here: implementing the trait is the capability.
    pub fn from_parts(formatters: Vec<Box<dyn ArgumentFormatter>>) -> Self {
        Self { formatters }
    }

    /// Resolve formatter names against the built-in set, keeping matches in
    /// their original relative order.
    ///
    /// Unknown names are rejected with a single warning each; the chain is
    /// still constructed from whatever remains.
    pub fn from_names<'a>(
        names: impl IntoIterator<Item = &'a str>,
        logbuf: &mut LogBuffer,
    ) -> Self {
        let formatters = names
            .into_iter()
            .filter_map(|name| {
                let formatter = builtin_formatter(name);
                if formatter.is_none() {
                    logbuf.warning(format!("Unknown formatter '{name}', skipping"));
                }
                formatter
            })
            .collect();
        Self { formatters }
    }

    /// Run the value through every retained formatter in order.
    pub fn apply(&self, receiver: &str, method: &str, mut value: String) -> String {
        for formatter in &self.formatters {
            value = formatter.format_argument(receiver, method, value);
        }
        value
    }

    pub fn len(&self) -> usize {
        self.formatters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formatters.is_empty()
    }
}

/// Look up a built-in formatter by name.
fn builtin_formatter(name: &str) -> Option<Box<dyn ArgumentFormatter>> {
    match name {
        "trim" => Some(Box::new(TrimFormatter)),
        "lowercase" => Some(Box::new(LowercaseFormatter)),
        _ => None,
    }
}

/// Strips surrounding whitespace from the classified value.
pub struct TrimFormatter;

impl ArgumentFormatter for TrimFormatter {
    fn format_argument(&self, _receiver: &str, _method: &str, value: String) -> String {
        value.trim().to_string()
    }
}

/// ASCII-lowercases the classified value.
pub struct LowercaseFormatter;

impl ArgumentFormatter for LowercaseFormatter {
    fn format_argument(&self, _receiver: &str, _method: &str, value: String) -> String {
        value.to_ascii_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::*;

    /// Prefixes values with the signature, for asserting order and context
    /// propagation.
    struct TagFormatter;

    impl ArgumentFormatter for TagFormatter {
        fn format_argument(&self, receiver: &str, method: &str, value: String) -> String {
            format!("{receiver}.{method}:{value}")
        }
    }

    #[test]
    fn test_empty_chain_passes_through() {
        let chain = FormatterChain::empty();
        assert_eq!(chain.apply("logger", "info", "value".into()), "value");
    }

    #[test]
    fn test_formatters_apply_in_order() {
        let chain = FormatterChain::from_parts(vec![Box::new(TagFormatter), Box::new(TrimFormatter)]);
        // TagFormatter runs first, then TrimFormatter trims the result.
        assert_eq!(
            chain.apply("logger", "info", "  x  ".into()),
            "logger.info:  x"
        );
    }

    #[test]
    fn test_unknown_names_rejected_with_one_warning_each() {
        let mut logbuf = LogBuffer::new();
        let chain = FormatterChain::from_names(["trim", "nonsense"], &mut logbuf);

        assert_eq!(chain.len(), 1);
        assert_eq!(logbuf.count(Level::Warn), 1);

        let messages = logbuf.messages(false);
        assert!(messages[&Level::Warn][0].contains("nonsense"));
    }

    #[test]
    fn test_relative_order_preserved_after_rejection() {
        let mut logbuf = LogBuffer::new();
        let chain = FormatterChain::from_names(["lowercase", "bogus", "trim"], &mut logbuf);

        assert_eq!(chain.len(), 2);
        // lowercase then trim: "  ABC  " -> "  abc  " -> "abc"
        assert_eq!(chain.apply("r", "m", "  ABC  ".into()), "abc");
    }

    #[test]
    fn test_construction_never_fails() {
        let mut logbuf = LogBuffer::new();
        let chain = FormatterChain::from_names(["a", "b", "c"], &mut logbuf);
        assert!(chain.is_empty());
        assert_eq!(logbuf.count(Level::Warn), 3);
    }
}
