use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".calldocrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Receiver name (property or class) → allowed method names.
    #[serde(default)]
    pub patterns: HashMap<String, Vec<String>>,
    /// Literal substrings; any file whose absolute path contains one is
    /// skipped.
    #[serde(default)]
    pub excluded_directories: Vec<String>,
    /// Sort signatures lexicographically in the report.
    #[serde(default)]
    pub sorting: bool,
    /// Formatter names applied to each classified argument, in order.
    #[serde(default)]
    pub formatters: Vec<String>,
    #[serde(default = "default_source_root")]
    pub source_root: String,
}

fn default_source_root() -> String {
    "./".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            patterns: HashMap::new(),
            excluded_directories: Vec::new(),
            sorting: false,
            formatters: Vec::new(),
            source_root: default_source_root(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Empty receiver names, empty method lists, and empty excluded
    /// substrings are configuration mistakes (an empty substring would
    /// exclude every file), so they are rejected up front.
    pub fn validate(&self) -> Result<()> {
        for (receiver, methods) in &self.patterns {
            if receiver.is_empty() {
                anyhow::bail!("Empty receiver name in 'patterns'");
            }
            if methods.is_empty() {
                anyhow::bail!("No methods listed for receiver \"{}\" in 'patterns'", receiver);
            }
            if methods.iter().any(String::is_empty) {
                anyhow::bail!("Empty method name for receiver \"{}\" in 'patterns'", receiver);
            }
        }

        if self.excluded_directories.iter().any(String::is_empty) {
            anyhow::bail!("Empty entry in 'excludedDirectories'");
        }

        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config {
        patterns: HashMap::from([(
            "logger".to_string(),
            vec!["info".to_string(), "warning".to_string(), "error".to_string()],
        )]),
        ..Config::default()
    };
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::fs::File;

    use tempfile::tempdir;

    use crate::config::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.patterns.is_empty());
        assert!(config.excluded_directories.is_empty());
        assert!(!config.sorting);
        assert_eq!(config.source_root, "./");
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "patterns": { "logger": ["info", "warn"] },
              "excludedDirectories": ["vendor"],
              "sorting": true
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.patterns["logger"], vec!["info", "warn"]);
        assert_eq!(config.excluded_directories, vec!["vendor"]);
        assert!(config.sorting);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let json = r#"{ "patterns": { "Registry": ["get"] } }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.patterns["Registry"], vec!["get"]);
        assert!(config.excluded_directories.is_empty());
        assert_eq!(config.source_root, "./");
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("Service");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "patterns": { "cache": ["get"] } }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.patterns["cache"], vec!["get"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert!(result.config.patterns.is_empty());
    }

    #[test]
    fn test_validate_rejects_empty_method_list() {
        let config = Config {
            patterns: HashMap::from([("logger".to_string(), Vec::new())]),
            ..Config::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("logger"));
    }

    #[test]
    fn test_validate_rejects_empty_excluded_entry() {
        let config = Config {
            excluded_directories: vec![String::new()],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_config_with_invalid_patterns_fails() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "patterns": { "logger": [] } }"#).unwrap();

        let result = load_config(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_default_config_json_round_trips() {
        let json = default_config_json().unwrap();
        let config: Config = serde_json::from_str(&json).unwrap();
        assert!(config.patterns.contains_key("logger"));
        assert!(json.contains("excludedDirectories"));
    }
}
