//! Configuration types for the logging subsystem.

use std::path::PathBuf;

use tracing_appender::rolling::Rotation;
use tracing_subscriber::fmt::format::FmtSpan;

/// File suffix of rolled log files.
pub const LOG_FILE_SUFFIX: &str = "log";

/// Configuration for the console layer.
///
/// Console output goes to stderr so stdout stays free for command output.
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    /// Use JSON format instead of compact format
    pub json_format: bool,
    /// Span events to log (ENTER, EXIT, CLOSE, etc.)
    pub fmt_span: FmtSpan,
    /// Emit ANSI colour codes
    pub ansi: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            json_format: false,
            fmt_span: FmtSpan::NONE,
            ansi: true,
        }
    }
}

/// Configuration for file-based logging with rotation
#[derive(Debug, Clone)]
pub struct FileLoggingConfig {
    /// Directory where log files will be written
    pub directory: PathBuf,
    /// Base filename prefix (e.g., "genesis-tool" -> "genesis-tool.2026-01-01.log")
    pub file_name_prefix: String,
    /// Rotation strategy
    pub rotation: Rotation,
    /// Use JSON format for file logs
    pub json_format: bool,
}

impl FileLoggingConfig {
    pub fn new(directory: PathBuf, file_name_prefix: String) -> Self {
        Self {
            directory,
            file_name_prefix,
            rotation: Rotation::NEVER,
            json_format: false,
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_json_format(mut self, json_format: bool) -> Self {
        self.json_format = json_format;
        self
    }
}

/// Main logger configuration
#[derive(Debug, Clone)]
pub struct LoggerConfig {
    /// Name reported in the startup event
    pub service_name: String,
    /// Console layer configuration
    pub console_config: ConsoleConfig,
    /// File logging configuration (optional)
    pub file_logging_config: Option<FileLoggingConfig>,
}

impl LoggerConfig {
    pub fn new(service_name: String) -> Self {
        Self {
            service_name,
            console_config: ConsoleConfig::default(),
            file_logging_config: None,
        }
    }

    /// Enable JSON console format
    pub fn with_json_logging(mut self, enabled: bool) -> Self {
        self.console_config.json_format = enabled;
        self
    }

    pub fn with_file_logging(mut self, config: FileLoggingConfig) -> Self {
        self.file_logging_config = Some(config);
        self
    }

    pub fn with_fmt_span(mut self, fmt_span: FmtSpan) -> Self {
        self.console_config.fmt_span = fmt_span;
        self
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.console_config.ansi = ansi;
        self
    }
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self::new("(strata-tool)".to_string())
    }
}
