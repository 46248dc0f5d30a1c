//! # Service Configuration
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! no file) is a valid configuration. Command-line flags override file
//! values.
//!
//! ```toml
//! [server]
//! addr = "0.0.0.0:8080"
//! path = "/create"
//!
//! [scowl]
//! root = "/srv/scowl"
//! database = "/srv/scowl/wordlist.tsv"
//! # revision = "Tue Mar 5 12:00:00 2024 -0500 [abc1234]"
//!
//! [vocabulary]
//! large_list_threshold = 80
//! ```

use crate::vocab::Vocabulary;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Word table file name looked up under the SCOWL root when not configured.
pub const DEFAULT_DATABASE: &str = "wordlist.tsv";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub server: ServerConfig,
    pub scowl: ScowlConfig,
    pub vocabulary: Vocabulary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address.
    pub addr: String,
    /// Path the create endpoint answers on.
    pub path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "0.0.0.0:8080".to_string(),
            path: "/create".to_string(),
        }
    }
}

/// Where the lexical source and its builder scripts live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScowlConfig {
    pub root: PathBuf,
    /// Word table; defaults to `<root>/wordlist.tsv`.
    pub database: Option<PathBuf>,
    /// Fixed revision string instead of asking git.
    pub revision: Option<String>,
}

impl Default for ScowlConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            database: None,
            revision: None,
        }
    }
}

impl ScowlConfig {
    pub fn database_path(&self) -> PathBuf {
        self.database
            .clone()
            .unwrap_or_else(|| self.root.join(DEFAULT_DATABASE))
    }
}

impl ServiceConfig {
    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&contents).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: ServiceConfig = toml::from_str(contents)?;
        if !config.server.path.starts_with('/') {
            anyhow::bail!("server.path must start with '/': {:?}", config.server.path);
        }
        if let Err(problem) = config.vocabulary.validate() {
            anyhow::bail!("vocabulary: {problem}");
        }
        Ok(config)
    }

    /// Load `path` when given, built-in defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = ServiceConfig::parse("").unwrap();
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.server.path, "/create");
        assert_eq!(config.scowl.database_path(), PathBuf::from("./wordlist.tsv"));
    }

    #[test]
    fn test_sections_override() {
        let config = ServiceConfig::parse(
            r#"
[server]
addr = "127.0.0.1:9000"

[scowl]
root = "/srv/scowl"
revision = "r42"

[vocabulary]
large_list_threshold = 70
"#,
        )
        .unwrap();
        assert_eq!(config.server.addr, "127.0.0.1:9000");
        assert_eq!(config.server.path, "/create");
        assert_eq!(config.scowl.root, PathBuf::from("/srv/scowl"));
        assert_eq!(config.scowl.revision.as_deref(), Some("r42"));
        assert_eq!(
            config.scowl.database_path(),
            PathBuf::from("/srv/scowl/wordlist.tsv")
        );
        assert_eq!(config.vocabulary.large_list_threshold, 70);
        assert_eq!(config.vocabulary.presets.len(), 9);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ServiceConfig::parse("[server]\npath = \"create\"\n").is_err());
        assert!(ServiceConfig::parse("[vocabulary]\ndefault_preset = \"en_XX\"\n").is_err());
        assert!(ServiceConfig::parse("[server]\nport = [").is_err());
        let oversized = r#"
[vocabulary]
default_preset = "big"

[[vocabulary.presets]]
name = "big"
max_size = 120
spelling = ["US"]
variant_level = 1
diacritic = "strip"
"#;
        let err = ServiceConfig::parse(oversized).unwrap_err();
        assert!(err.to_string().contains("max_size must be 0-99"));
    }

    #[test]
    fn test_shipped_example_parses() {
        let config = ServiceConfig::parse(include_str!("../config/scowl-create.toml")).unwrap();
        assert_eq!(config.scowl.root, PathBuf::from("/srv/scowl"));
        assert_eq!(config.vocabulary, Vocabulary::default());
    }

    #[test]
    fn test_load_reports_path() {
        let err = ServiceConfig::load(Path::new("/nonexistent/scowl-create.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/scowl-create.toml"));
    }
}
