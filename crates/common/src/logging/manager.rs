//! Logging initialization.

use std::io;

use thiserror::Error;
use tracing::*;
use tracing_appender::rolling::{InitError, RollingFileAppender};
use tracing_subscriber::{
    fmt::layer, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter,
    Layer,
};

use super::types::{FileLoggingConfig, LoggerConfig, LOG_FILE_SUFFIX};

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("creating log file in {dir}: {source}")]
    FileAppender {
        dir: String,
        #[source]
        source: InitError,
    },

    #[error("installing global subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Initializes the logging subsystem with the provided config.
///
/// The filter defaults to `INFO` and can be overridden with `RUST_LOG`. Fails if a global
/// subscriber is already installed or the log directory cannot be used.
pub fn init(config: LoggerConfig) -> Result<(), LoggingError> {
    let filt = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    let console = &config.console_config;
    let console_sub = if console.json_format {
        layer()
            .json()
            .with_writer(io::stderr)
            .with_span_events(console.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed()
    } else {
        layer()
            .compact()
            .with_writer(io::stderr)
            .with_ansi(console.ansi)
            .with_span_events(console.fmt_span.clone())
            .with_filter(filt.clone())
            .boxed()
    };

    let file_layer = match &config.file_logging_config {
        Some(file_config) => {
            let appender = build_file_appender(file_config)?;
            let sub = if file_config.json_format {
                layer()
                    .json()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_filter(filt)
                    .boxed()
            } else {
                layer()
                    .compact()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_filter(filt)
                    .boxed()
            };
            Some(sub)
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console_sub)
        .with(file_layer)
        .try_init()?;

    debug!(service_name = %config.service_name, "logging initialized");
    Ok(())
}

pub(crate) fn build_file_appender(
    config: &FileLoggingConfig,
) -> Result<RollingFileAppender, LoggingError> {
    RollingFileAppender::builder()
        .rotation(config.rotation.clone())
        .filename_prefix(&config.file_name_prefix)
        .filename_suffix(LOG_FILE_SUFFIX)
        .build(&config.directory)
        .map_err(|source| LoggingError::FileAppender {
            dir: config.directory.display().to_string(),
            source,
        })
}
