//! Structured logging setup.
//!
//! `tracing` events from every module go through one `tracing-subscriber`
//! registry: an [`EnvFilter`], then a JSON or pretty formatter writing to
//! stderr (stdout is reserved for command output such as `dump-params`).
//!
//! | variable                            | default | meaning                              |
//! |-------------------------------------|---------|--------------------------------------|
//! | `SCOWL_CREATE_LOG_LEVEL`            | `info`  | trace/debug/info/warn/error          |
//! | `SCOWL_CREATE_LOG_FORMAT`           | `json`  | `json` or `pretty`                   |
//! | `SCOWL_CREATE_LOG_ASYNC`            | `true`  | buffered writer via tracing-appender |
//! | `SCOWL_CREATE_LOG_TARGET_FILTER`    | unset   | extra directives, comma-separated    |
//! | `SCOWL_CREATE_LOG_INCLUDE_LOCATION` | `false` | add file and line to every event     |
//!
//! `RUST_LOG`, when set, replaces the level.

use anyhow::{Context, Result};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

/// Log format: JSON for production, pretty-print for development
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

impl LogFormat {
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pretty" => LogFormat::Pretty,
            _ => LogFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub log_level: String,
    pub format: LogFormat,
    pub async_logging: bool,
    /// Extra filter directives, comma-separated
    pub target_filter: Option<String>,
    pub include_location: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            format: LogFormat::Json,
            async_logging: true,
            target_filter: None,
            include_location: false,
        }
    }
}

impl LogConfig {
    /// Read the `SCOWL_CREATE_LOG_*` variables, defaulting the rest.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`LogConfig::from_env`] with an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let flag = |key: &str, default: bool| {
            lookup(key)
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        };
        Self {
            log_level: lookup("SCOWL_CREATE_LOG_LEVEL").unwrap_or(defaults.log_level),
            format: lookup("SCOWL_CREATE_LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or(defaults.format),
            async_logging: flag("SCOWL_CREATE_LOG_ASYNC", defaults.async_logging),
            target_filter: lookup("SCOWL_CREATE_LOG_TARGET_FILTER").filter(|f| !f.trim().is_empty()),
            include_location: flag("SCOWL_CREATE_LOG_INCLUDE_LOCATION", defaults.include_location),
        }
    }

    fn level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        }
    }

    /// The filter this configuration installs.
    pub fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(self.level().as_str()));
        // Client disconnects are reported by the HTTP layer at info/debug.
        if let Ok(directive) = "may_minihttp=warn".parse() {
            filter = filter.add_directive(directive);
        }
        for raw in self.target_filter.iter().flat_map(|f| f.split(',')) {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            match raw.parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(_) => eprintln!("Warning: Invalid log filter directive: {raw}"),
            }
        }
        filter
    }
}

/// Keeps the async writer flushing; drop it last, at process exit.
#[must_use = "dropping the guard stops buffered log output"]
pub struct LoggingGuard {
    _worker: Option<WorkerGuard>,
}

/// Install the global subscriber.
///
/// Fails if a subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> Result<LoggingGuard> {
    let (writer, worker) = if config.async_logging {
        let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(writer), Some(guard))
    } else {
        (tracing_subscriber::fmt::writer::BoxMakeWriter::new(std::io::stderr), None)
    };

    let fmt_layer = match config.format {
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
        LogFormat::Pretty => tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_writer(writer)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(config.env_filter())
        .with(fmt_layer)
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(LoggingGuard { _worker: worker })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_log_format_parse() {
        assert_eq!(LogFormat::parse("pretty"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("PRETTY"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse("json"), LogFormat::Json);
        assert_eq!(LogFormat::parse("yaml"), LogFormat::Json);
    }

    #[test]
    fn test_defaults_without_env() {
        assert_eq!(LogConfig::from_lookup(lookup(&[])), LogConfig::default());
    }

    #[test]
    fn test_reads_every_variable() {
        let config = LogConfig::from_lookup(lookup(&[
            ("SCOWL_CREATE_LOG_LEVEL", "debug"),
            ("SCOWL_CREATE_LOG_FORMAT", "pretty"),
            ("SCOWL_CREATE_LOG_ASYNC", "false"),
            ("SCOWL_CREATE_LOG_TARGET_FILTER", "scowl_create::builder=trace"),
            ("SCOWL_CREATE_LOG_INCLUDE_LOCATION", "true"),
        ]));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.level(), Level::DEBUG);
        assert_eq!(config.format, LogFormat::Pretty);
        assert!(!config.async_logging);
        assert_eq!(
            config.target_filter.as_deref(),
            Some("scowl_create::builder=trace")
        );
        assert!(config.include_location);
    }

    #[test]
    fn test_unparsable_flags_fall_back() {
        let config = LogConfig::from_lookup(lookup(&[
            ("SCOWL_CREATE_LOG_ASYNC", "sometimes"),
            ("SCOWL_CREATE_LOG_LEVEL", "loud"),
        ]));
        assert!(config.async_logging);
        assert_eq!(config.level(), Level::INFO);
    }
}
