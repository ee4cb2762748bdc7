use complication_config::config::LoggingConfig;
use complication_config::constants::LOG_FILE_NAME;
use complication_config::logger;

#[test]
fn test_dispatch_to_stderr_when_disabled() {
    let config = LoggingConfig::default();
    assert!(logger::build_dispatch(&config).is_ok());
}

#[test]
fn test_invalid_level_is_rejected() {
    let config = LoggingConfig {
        enabled: false,
        level: "loud".to_string(),
    };
    assert!(logger::build_dispatch(&config).is_err());
}

#[test]
fn test_level_parsing() {
    let config = LoggingConfig {
        enabled: false,
        level: "DEBUG".to_string(),
    };
    assert_eq!(config.level_filter().unwrap(), log::LevelFilter::Debug);
}

#[test]
fn test_log_file_path() {
    if let Ok(path) = logger::get_log_file_path() {
        assert!(path.ends_with(LOG_FILE_NAME));
    }
}
