use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Logging configuration options.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Flush logs asynchronously.
    #[serde(default = "Config::default_async_flush", rename = "async")]
    pub async_flush: bool,

    /// The backend to send logs to.
    #[serde(default)]
    pub backend: LoggingBackend,

    /// The minimum logging level.
    #[serde(default)]
    pub level: LoggingLevel,

    /// Advanced level configuration by module prefix.
    ///
    /// The keys in this map are used as prefix matches against log event modules.
    /// If more than one key matches, the longest one wins.
    /// If no match is found the `level` value is used as the filter.
    #[serde(default)]
    pub modules: BTreeMap<String, LoggingLevel>,

    /// Enable verbose debug logs.
    ///
    /// Unless verbose mode is on, only application events are emitted at DEBUG level
    /// while dependency events are filtered at INFO level.
    #[serde(default = "Config::default_verbose")]
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            async_flush: Config::default_async_flush(),
            backend: LoggingBackend::default(),
            level: LoggingLevel::default(),
            modules: BTreeMap::new(),
            verbose: Config::default_verbose(),
        }
    }
}

impl Config {
    fn default_async_flush() -> bool {
        true
    }
    fn default_verbose() -> bool {
        false
    }
}

/// List of supported logging backends.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(tag = "name", content = "options", deny_unknown_fields)]
pub enum LoggingBackend {
    /// Append JSON objects to a file.
    #[serde(rename = "file")]
    File { path: PathBuf },

    /// Log objects to systemd journal (journald).
    #[cfg(feature = "journald")]
    #[serde(rename = "journald")]
    Journald,

    /// Log JSON objects to standard output.
    #[serde(rename = "json")]
    Json,
}

impl Default for LoggingBackend {
    fn default() -> LoggingBackend {
        LoggingBackend::Json
    }
}

/// Possible logging levels.
#[derive(Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub enum LoggingLevel {
    #[serde(rename = "critical")]
    Critical,

    #[serde(rename = "error")]
    Error,

    #[serde(rename = "warning")]
    Warning,

    #[serde(rename = "info")]
    Info,

    #[serde(rename = "debug")]
    Debug,
}

impl Default for LoggingLevel {
    #[cfg(debug_assertions)]
    fn default() -> LoggingLevel {
        LoggingLevel::Debug
    }

    #[cfg(not(debug_assertions))]
    fn default() -> LoggingLevel {
        LoggingLevel::Info
    }
}

impl From<LoggingLevel> for slog::Level {
    fn from(level: LoggingLevel) -> Self {
        match level {
            LoggingLevel::Critical => slog::Level::Critical,
            LoggingLevel::Error => slog::Level::Error,
            LoggingLevel::Warning => slog::Level::Warning,
            LoggingLevel::Info => slog::Level::Info,
            LoggingLevel::Debug => slog::Level::Debug,
        }
    }
}
