// ============================================================
// Layer 6 — Logging Setup
// ============================================================
// Installs the tracing subscriber for the process. Every event
// goes to stdout and, without ANSI colours, to a log file that
// is truncated at startup.
//
// The level comes from an explicit LogConfig handed in by the
// CLI. RUST_LOG still overrides it when set.
//
//   minimal → concept_classifier=info
//   verbose → concept_classifier=debug

use std::fs::File;
use std::path::PathBuf;

use clap::ValueEnum;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter, Registry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    /// Progress and results only
    #[default]
    Minimal,
    /// Adds per-step debug detail
    Verbose,
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub level:    LogLevel,
    pub log_file: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level:    LogLevel::Minimal,
            log_file: PathBuf::from("training.log"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Failed to create log file at {path}: {source}")]
    CreateLogFile {
        path:   PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to install global tracing subscriber: {0}")]
    SetGlobal(#[from] tracing::subscriber::SetGlobalDefaultError),
}

/// Default filter directive for a level
pub fn directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Minimal => "concept_classifier=info",
        LogLevel::Verbose => "concept_classifier=debug",
    }
}

/// RUST_LOG wins when it is set and parses; otherwise the level's
/// default directive applies.
fn build_filter(rust_log: Option<&str>, level: LogLevel) -> EnvFilter {
    rust_log
        .filter(|spec| !spec.trim().is_empty())
        .and_then(|spec| EnvFilter::try_new(spec).ok())
        .unwrap_or_else(|| EnvFilter::new(directive(level)))
}

/// Install the subscriber. Keep the returned guard alive until
/// exit or buffered file output is lost.
pub fn init(config: &LogConfig) -> Result<WorkerGuard, LoggingError> {
    if let Some(dir) = config.log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir).map_err(|source| LoggingError::CreateLogFile {
            path: config.log_file.clone(),
            source,
        })?;
    }
    let file = File::create(&config.log_file).map_err(|source| LoggingError::CreateLogFile {
        path: config.log_file.clone(),
        source,
    })?;
    let (file_writer, guard) = tracing_appender::non_blocking(file);

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter   = build_filter(rust_log.as_deref(), config.level);

    let subscriber = Registry::default()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .with(fmt::layer().with_ansi(false).with_writer(file_writer));

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directives_parse() {
        for level in [LogLevel::Minimal, LogLevel::Verbose] {
            assert!(directive(level).parse::<tracing_subscriber::filter::Directive>().is_ok());
        }
        assert!(directive(LogLevel::Verbose).ends_with("debug"));
    }

    #[test]
    fn test_rust_log_overrides_level() {
        let filter = build_filter(Some("concept_classifier=trace"), LogLevel::Minimal);
        assert_eq!(filter.to_string(), "concept_classifier=trace");

        let filter = build_filter(Some("warn"), LogLevel::Verbose);
        assert_eq!(filter.to_string(), "warn");
    }

    #[test]
    fn test_level_used_without_rust_log() {
        assert_eq!(build_filter(None, LogLevel::Minimal).to_string(), "concept_classifier=info");
        assert_eq!(build_filter(Some("  "), LogLevel::Verbose).to_string(), "concept_classifier=debug");
        assert_eq!(
            build_filter(Some("concept_classifier=loud"), LogLevel::Minimal).to_string(),
            "concept_classifier=info"
        );
    }

    #[test]
    fn test_default_config() {
        let cfg = LogConfig::default();
        assert_eq!(cfg.level, LogLevel::Minimal);
        assert_eq!(cfg.log_file, PathBuf::from("training.log"));
    }
}
