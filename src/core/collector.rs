//! Per-file call-site collection.
//!
//! `CallSiteCollector` walks one parsed file's syntax tree in document order
//! and, for every node, tries the two recognized call shapes against the
//! pattern registry: a property-qualified instance call
//! (`$x->prop->method(...)`) and a static call (`Class::method(...)`). On a
//! match it lowers and classifies every argument in call-site order, runs the
//! formatter chain per argument, and records the resulting list under the
//! call signature.
//!
//! Collection is a single traversal per file; per-file accumulators are
//! merged by the driver afterwards.

use tree_sitter::Node;

use crate::core::classify::classify;
use crate::core::formatter::FormatterChain;
use crate::core::matcher::{CallPatterns, CallSite};
use crate::core::parsers::php::{call_argument_nodes, lower_expr};
use crate::core::usage_map::UsageAccumulator;

pub struct CallSiteCollector<'a> {
    source: &'a str,
    patterns: &'a CallPatterns,
    chain: &'a FormatterChain,
    usages: UsageAccumulator,
}

impl<'a> CallSiteCollector<'a> {
    pub fn new(source: &'a str, patterns: &'a CallPatterns, chain: &'a FormatterChain) -> Self {
        Self {
            source,
            patterns,
            chain,
            usages: UsageAccumulator::new(),
        }
    }

    /// Walk the tree rooted at `root` and return the recorded usages.
    pub fn collect(mut self, root: Node) -> UsageAccumulator {
        self.visit(root);
        self.usages
    }

    fn visit(&mut self, node: Node) {
        self.handle_property_call(node);
        self.handle_static_call(node);

        let mut cursor = node.walk();
        let children: Vec<Node> = node.named_children(&mut cursor).collect();
        for child in children {
            self.visit(child);
        }
    }

    fn text(&self, node: Node) -> &'a str {
        node.utf8_text(self.source.as_bytes()).unwrap_or_default()
    }

    /// Handle a call like `$obj->{property}->{method}(...)`.
    fn handle_property_call(&mut self, node: Node) {
        if node.kind() != "member_call_expression" {
            return;
        }
        if let Some(object) = node.child_by_field_name("object")
            && object.kind() == "member_access_expression"
            && let Some(property) = object.child_by_field_name("name")
            && property.kind() == "name"
            && let Some(method) = node.child_by_field_name("name")
            && method.kind() == "name"
            && let Some(site) = self
                .patterns
                .match_property_call(self.text(property), self.text(method))
        {
            self.record_call(site, node);
        }
    }

    /// Handle a call like `{Class}::{method}(...)`.
    ///
    /// The registry keys on the first segment of the class reference as
    /// written in source; namespace imports and aliases are not resolved.
    fn handle_static_call(&mut self, node: Node) {
        if node.kind() != "scoped_call_expression" {
            return;
        }
        if let Some(scope) = node.child_by_field_name("scope")
            && matches!(scope.kind(), "name" | "qualified_name")
            && let Some(method) = node.child_by_field_name("name")
            && method.kind() == "name"
        {
            let first_name = self
                .text(scope)
                .trim_start_matches('\\')
                .split('\\')
                .next()
                .unwrap_or_default();
            if let Some(site) = self
                .patterns
                .match_static_call(first_name, self.text(method))
            {
                self.record_call(site, node);
            }
        }
    }

    fn record_call(&mut self, site: CallSite, call: Node) {
        let arguments = call_argument_nodes(call)
            .into_iter()
            .map(|arg| {
                let value = classify(&lower_expr(arg, self.source));
                self.chain.apply(&site.receiver, &site.method, value)
            })
            .collect();
        self.usages.record(site.signature(), arguments);
    }
}
