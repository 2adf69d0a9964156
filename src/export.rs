//! Report exporters.
//!
//! The scan result is handed to a single-operation exporter; the core stays
//! agnostic to the representation. `JsonExport` preserves signature order in
//! its output, `TextExport` renders a terminal-friendly listing.

use anyhow::{Context as _, Result};

use crate::core::UsageMap;

/// Renders a finalized [`UsageMap`] into some textual artifact.
pub trait UsageExport {
    fn export(&self, usages: &UsageMap) -> Result<String>;
}

/// Pretty-printed JSON: `{ "signature": [["arg", ...], ...], ... }`.
pub struct JsonExport;

impl UsageExport for JsonExport {
    fn export(&self, usages: &UsageMap) -> Result<String> {
        serde_json::to_string_pretty(usages).context("Failed to serialize usages to JSON")
    }
}

/// Plain-text listing, one block per signature:
///
/// ```text
/// logger->info (2 calls)
///   ('started', RETRY_MODE)
///   ('done')
/// ```
pub struct TextExport;

impl UsageExport for TextExport {
    fn export(&self, usages: &UsageMap) -> Result<String> {
        let mut out = String::new();
        for (signature, occurrences) in usages.iter() {
            let calls = occurrences.len();
            let noun = if calls == 1 { "call" } else { "calls" };
            out.push_str(&format!("{signature} ({calls} {noun})\n"));
            for arguments in occurrences {
                let rendered: Vec<String> =
                    arguments.iter().map(|arg| format!("'{arg}'")).collect();
                out.push_str(&format!("  ({})\n", rendered.join(", ")));
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::core::UsageAccumulator;

    fn sample() -> UsageMap {
        let mut acc = UsageAccumulator::new();
        acc.record(
            "logger->info",
            vec!["started".to_string(), "RETRY_MODE".to_string()],
        );
        acc.record("logger->info", vec!["done".to_string()]);
        acc.record("Registry::get", vec!["service".to_string()]);
        acc.finalize(false)
    }

    #[test]
    fn test_json_export_preserves_order() {
        let json = JsonExport.export(&sample()).unwrap();
        let info_pos = json.find("logger->info").unwrap();
        let get_pos = json.find("Registry::get").unwrap();
        assert!(info_pos < get_pos);

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["logger->info"][0][1], "RETRY_MODE");
    }

    #[test]
    fn test_text_export_layout() {
        let text = TextExport.export(&sample()).unwrap();
        assert_eq!(
            text,
            "logger->info (2 calls)\n\
             \x20 ('started', 'RETRY_MODE')\n\
             \x20 ('done')\n\
             Registry::get (1 call)\n\
             \x20 ('service')\n"
        );
    }

    #[test]
    fn test_text_export_empty_map() {
        let text = TextExport.export(&UsageMap::default()).unwrap();
        assert!(text.is_empty());
    }
}
