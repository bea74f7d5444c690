//! Logging utilities
//!
//! Thin layer over `tracing`: a one-shot subscriber initializer driven by
//! [`LoggerConfig`], and named [`Logger`] handles so every component logs
//! under a stable name (`measurehud.viz`, `measurehud.tui`, ...).

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::{
    filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

/// Log levels accepted in configuration files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    #[serde(alias = "warn")]
    Warning,
    Error,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warning => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Subscriber setup
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    pub level: LogLevel,
    /// Source file and line on every event
    pub include_location: bool,
    pub include_thread_id: bool,
    pub colored_output: bool,
    /// Write to stderr so stdout stays clean for previews
    pub to_stderr: bool,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            include_location: false,
            include_thread_id: false,
            colored_output: true,
            to_stderr: true,
        }
    }
}

/// Install the global subscriber once. `RUST_LOG` wins over `config.level`.
pub fn init_logging(config: LoggerConfig) -> crate::Result<()> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.level.into()).into())
        .from_env_lossy();

    let layer = fmt::layer()
        .with_target(false)
        .with_ansi(config.colored_output)
        .with_thread_ids(config.include_thread_id)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    let installed = if config.to_stderr {
        tracing_subscriber::registry()
            .with(filter)
            .with(layer.with_writer(std::io::stderr))
            .try_init()
    } else {
        tracing_subscriber::registry().with(filter).with(layer).try_init()
    };

    installed.map_err(|e| crate::UtilError::Config(format!("Logging already initialized: {}", e)))
}

/// Named logging handle with its own minimum level
#[derive(Debug, Clone)]
pub struct Logger {
    name: String,
    threshold: LogLevel,
}

impl Logger {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            threshold: LogLevel::Trace,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Local threshold; the subscriber filter still applies on top
    pub fn set_level(&mut self, level: LogLevel) {
        self.threshold = level;
    }

    pub fn level(&self) -> LogLevel {
        self.threshold
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.threshold
    }

    pub fn debug(&self, message: &str) {
        if self.is_enabled(LogLevel::Debug) {
            tracing::debug!(logger = %self.name, "{}", message);
        }
    }

    pub fn info(&self, message: &str) {
        if self.is_enabled(LogLevel::Info) {
            tracing::info!(logger = %self.name, "{}", message);
        }
    }

    pub fn warning(&self, message: &str) {
        if self.is_enabled(LogLevel::Warning) {
            tracing::warn!(logger = %self.name, "{}", message);
        }
    }

    pub fn error(&self, message: &str) {
        if self.is_enabled(LogLevel::Error) {
            tracing::error!(logger = %self.name, "{}", message);
        }
    }
}

pub fn get_logger(name: &str) -> Logger {
    Logger::new(name)
}
