// schemata: typed views over strings, mappings and the environment
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogFormat, LogLevel, init_logging};

#[test]
fn test_log_level_bounds() {
    assert!(LogLevel::new(0).is_ok());
    assert!(LogLevel::new(6).is_ok());
    insta::assert_snapshot!(
        LogLevel::new(7).unwrap_err(),
        @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 7"
    );
}

#[test]
fn test_log_level_filters() {
    let filters: Vec<_> = (0..=6)
        .map(|level| LogLevel::new(level).unwrap().to_filter_string())
        .collect();
    insta::assert_debug_snapshot!(filters, @r#"
    [
        "off",
        "error",
        "warn",
        "info",
        "warn,schemata=debug",
        "warn,schemata=trace",
        "trace",
    ]
    "#);
}

#[test]
fn test_log_level_serde() {
    let level: LogLevel = serde_json::from_str("4").unwrap();
    assert_eq!(level, LogLevel::DEBUG);
    assert_eq!(serde_json::to_string(&LogLevel::TRACE).unwrap(), "5");
    assert!(serde_json::from_str::<LogLevel>("9").is_err());
    assert_eq!(u8::from(LogLevel::try_from(2).unwrap()), 2);
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::WARN);
    assert_eq!(config.file_level(), LogLevel::TRACE);
    assert_eq!(config.log_file(), None);
    assert_eq!(config.file_format(), LogFormat::Text);
    assert!(!config.show_target());
}

#[test]
fn test_init_logging_creates_log_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("schemata.log");
    let config = LogConfig::builder()
        .with_console_level(LogLevel::SILENT)
        .with_log_file(path.display().to_string())
        .with_file_format(LogFormat::Json)
        .build();

    let guard = init_logging(&config).unwrap();
    tracing::info!(target: "schemata", "Logging initialized");
    drop(guard);

    assert!(path.exists());
    // A second subscriber cannot be installed in the same process.
    assert!(init_logging(&LogConfig::default()).is_err());
}
