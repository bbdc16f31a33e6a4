//! Unit tests for the logging subsystem.

use std::{fs, path::PathBuf};

use tempfile::TempDir;
use tracing_subscriber::fmt::format::FmtSpan;

use super::{
    format_service_name,
    manager::build_file_appender,
    service::{build_logger_config, LoggingInitConfig},
    types::*,
    Rotation,
};

fn init_config(log_dir: Option<&PathBuf>) -> LoggingInitConfig<'_> {
    LoggingInitConfig {
        service_base_name: "genesis-tool",
        service_label: None,
        log_dir,
        log_file_prefix: None,
        json_format: None,
        default_log_prefix: "genesis-tool",
    }
}

#[test]
fn test_format_service_name() {
    assert_eq!(format_service_name("genesis-tool", None), "genesis-tool");
    assert_eq!(
        format_service_name("genesis-tool", Some("dev")),
        "genesis-tool%dev"
    );
}

#[test]
fn test_logger_config_defaults() {
    let config = LoggerConfig::new("test-service".to_string());
    assert_eq!(config.service_name, "test-service");
    assert!(!config.console_config.json_format);
    assert!(config.console_config.ansi);
    assert!(config.file_logging_config.is_none());
}

#[test]
fn test_logger_config_builder_pattern() {
    let config = LoggerConfig::new("test-service".to_string())
        .with_json_logging(true)
        .with_ansi(false)
        .with_fmt_span(FmtSpan::CLOSE)
        .with_file_logging(
            FileLoggingConfig::new(PathBuf::from("/tmp/logs"), "svc".to_string())
                .with_rotation(Rotation::DAILY)
                .with_json_format(true),
        );

    assert!(config.console_config.json_format);
    assert!(!config.console_config.ansi);
    let file = config.file_logging_config.unwrap();
    assert_eq!(file.directory, PathBuf::from("/tmp/logs"));
    assert_eq!(file.file_name_prefix, "svc");
    assert!(file.json_format);
}

#[test]
fn test_init_config_without_log_dir() {
    let lconfig = build_logger_config(&init_config(None), "genesis-tool".to_string());
    assert!(lconfig.file_logging_config.is_none());
    assert!(!lconfig.console_config.json_format);
}

#[test]
fn test_init_config_with_log_dir_and_json() {
    let dir = PathBuf::from("/var/log/strata");
    let mut config = init_config(Some(&dir));
    config.log_file_prefix = Some("custom");
    config.json_format = Some(true);

    let lconfig = build_logger_config(&config, "genesis-tool".to_string());
    assert!(lconfig.console_config.json_format);
    let file = lconfig.file_logging_config.unwrap();
    assert_eq!(file.directory, dir);
    assert_eq!(file.file_name_prefix, "custom");
    assert!(file.json_format);
}

#[test]
fn test_file_appender_creates_log_file() {
    let dir = TempDir::new().unwrap();
    let config = FileLoggingConfig::new(dir.path().to_path_buf(), "genesis-tool".to_string());

    let _appender = build_file_appender(&config).unwrap();
    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec![format!("genesis-tool.{LOG_FILE_SUFFIX}")]);
}
