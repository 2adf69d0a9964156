//! Buffered log collection for library consumers.
//!
//! Events are forwarded to the `log` facade as they happen (so `RUST_LOG`
//! works as usual when the binary installs `env_logger`), and retained
//! in-memory keyed by level so callers embedding the scanner can inspect
//! warnings and errors after a run without capturing stderr.

use std::collections::BTreeMap;

use log::Level;

/// In-memory log event buffer keyed by level.
///
/// Retained messages can either be drained (the default, matching
/// one-shot CLI usage) or copied out with `preserve = true` when the
/// caller wants to read them more than once.
#[derive(Debug, Default)]
pub struct LogBuffer {
    messages: BTreeMap<Level, Vec<String>>,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning event.
    pub fn warning(&mut self, message: impl Into<String>) {
        self.push(Level::Warn, message.into());
    }

    /// Record an error event.
    pub fn error(&mut self, message: impl Into<String>) {
        self.push(Level::Error, message.into());
    }

    fn push(&mut self, level: Level, message: String) {
        log::log!(level, "{message}");
        self.messages.entry(level).or_default().push(message);
    }

    /// Retrieve buffered messages keyed by level.
    ///
    /// With `preserve = false` the buffer is cleared; with `preserve = true`
    /// the messages are copied and remain available for later reads.
    pub fn messages(&mut self, preserve: bool) -> BTreeMap<Level, Vec<String>> {
        if preserve {
            self.messages.clone()
        } else {
            std::mem::take(&mut self.messages)
        }
    }

    /// Number of buffered messages at a given level.
    pub fn count(&self, level: Level) -> usize {
        self.messages.get(&level).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.messages.values().all(Vec::is_empty)
    }
}
