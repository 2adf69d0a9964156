//! Call pattern registry and call-site matching.
//!
//! A scan is driven by a registry of (receiver, method) pairs: receiver is
//! either a property name (`$obj->logger->info(...)` registers under
//! `logger`) or a class name (`Registry::get(...)` registers under
//! `Registry`). Matching is purely syntactic — a property aliased into a
//! local variable is not resolved back to the property — and method-name
//! membership is exact, case-sensitive equality.

use std::collections::{HashMap, HashSet};

/// How a matched call site was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// Instance call on a property receiver: `$x->prop->method(...)`.
    MethodOnProperty,
    /// Static call: `Class::method(...)`.
    StaticCall,
}

/// A matched call site, identified by receiver and method.
///
/// Call sites with equal signatures aggregate together regardless of where
/// in the corpus they occur.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSite {
    pub kind: CallKind,
    pub receiver: String,
    pub method: String,
}

impl CallSite {
    /// The aggregation key: `receiver->method` for property-qualified calls,
    /// `receiver::method` for static calls.
    pub fn signature(&self) -> String {
        match self.kind {
            CallKind::MethodOnProperty => format!("{}->{}", self.receiver, self.method),
            CallKind::StaticCall => format!("{}::{}", self.receiver, self.method),
        }
    }
}

/// Registry of matchable (receiver, method) pairs.
///
/// Immutable for the duration of a run and freely shareable across parallel
/// workers. Key order is irrelevant; duplicate method names collapse.
#[derive(Debug, Clone, Default)]
pub struct CallPatterns {
    patterns: HashMap<String, HashSet<String>>,
}

impl CallPatterns {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from config-shaped data (receiver → method list).
    pub fn from_map(patterns: &HashMap<String, Vec<String>>) -> Self {
        let mut registry = Self::new();
        for (receiver, methods) in patterns {
            registry.register(receiver, methods.iter().map(String::as_str));
        }
        registry
    }

    /// Register methods under a receiver, merging with any existing entry.
    pub fn register<'a>(
        &mut self,
        receiver: impl Into<String>,
        methods: impl IntoIterator<Item = &'a str>,
    ) {
        self.patterns
            .entry(receiver.into())
            .or_default()
            .extend(methods.into_iter().map(String::from));
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Match a property-qualified instance call: `$x->{property}->{method}(...)`.
    pub fn match_property_call(&self, property: &str, method: &str) -> Option<CallSite> {
        self.match_call(CallKind::MethodOnProperty, property, method)
    }

    /// Match a static call: `{class}::{method}(...)`. `class` is the
    /// first/simple name of the class reference, as written in source.
    pub fn match_static_call(&self, class: &str, method: &str) -> Option<CallSite> {
        self.match_call(CallKind::StaticCall, class, method)
    }

    fn match_call(&self, kind: CallKind, receiver: &str, method: &str) -> Option<CallSite> {
        let allowed = self.patterns.get(receiver)?;
        if !allowed.contains(method) {
            return None;
        }
        Some(CallSite {
            kind,
            receiver: receiver.to_string(),
            method: method.to_string(),
        })
    }
}
