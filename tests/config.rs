use complication_config::config::{Config, ProviderEntryConfig};
use complication_config::constants::PREFERENCE_FILE_KEY;

#[test]
fn test_default_config() {
    let config = Config::default();
    assert_eq!(config.preferences.namespace, PREFERENCE_FILE_KEY);
    assert!(config.preferences.path.is_none());
    assert_eq!(config.gateway.worker_threads, 2);
    assert!(!config.logging.enabled);
    assert_eq!(config.logging.level, "info");
    assert!(config.providers.is_empty());
}

#[test]
fn test_config_validation() {
    let mut config = Config::default();

    // Valid config should pass
    assert!(config.validate().is_ok());

    // Worker pool must not be empty
    config.gateway.worker_threads = 0;
    assert!(config.validate().is_err());

    // Nor oversized
    config.gateway.worker_threads = 64;
    assert!(config.validate().is_err());

    // Reset and test an unknown log level
    config.gateway.worker_threads = 4;
    config.logging.level = "chatty".to_string();
    assert!(config.validate().is_err());

    config.logging.level = "debug".to_string();
    config.preferences.namespace = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_provider_slot_names_are_validated() {
    let mut config = Config::default();
    config.providers.insert(
        "left".to_string(),
        ProviderEntryConfig {
            app_name: "Clock".to_string(),
            label: "World time".to_string(),
            icon: None,
            delay_ms: 0,
        },
    );
    assert!(config.validate().is_ok());

    config.providers.insert(
        "top".to_string(),
        ProviderEntryConfig {
            app_name: "Clock".to_string(),
            label: "Date".to_string(),
            icon: None,
            delay_ms: 0,
        },
    );
    let err = config.validate().unwrap_err().to_string();
    assert!(err.contains("Unknown provider slot 'top'"));
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let toml_str = toml::to_string_pretty(&config).unwrap();
    assert!(toml_str.contains("worker_threads = 2"));
    assert!(toml_str.contains("level = \"info\""));
}

#[test]
fn test_partial_config_deserialization() {
    let partial_toml = r#"
[gateway]
worker_threads = 4

[logging]
enabled = true

[providers.background]
app_name = "Gallery"
label = "Photos"
icon = "ic_photo"
delay_ms = 250
"#;

    let config: Config = toml::from_str(partial_toml).unwrap();

    // Check that specified values are used
    assert_eq!(config.gateway.worker_threads, 4);
    assert!(config.logging.enabled);
    let background = &config.providers["background"];
    assert_eq!(background.app_name, "Gallery");
    assert_eq!(background.icon.as_deref(), Some("ic_photo"));
    assert_eq!(background.delay_ms, 250);

    // Check that unspecified values use defaults
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.preferences.namespace, PREFERENCE_FILE_KEY);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_config_deserialization() {
    let config: Config = toml::from_str("").unwrap();
    let default_config = Config::default();

    assert_eq!(config.gateway.worker_threads, default_config.gateway.worker_threads);
    assert_eq!(config.logging.enabled, default_config.logging.enabled);
    assert_eq!(config.preferences.namespace, default_config.preferences.namespace);
}

#[test]
fn test_preferences_path_override() {
    let mut config = Config::default();
    let custom = std::env::temp_dir().join("complication_config_prefs_override.toml");
    config.preferences.path = Some(custom.clone());
    assert_eq!(config.preferences_path().unwrap(), custom);
}

#[test]
fn test_generate_config_creates_directory() {
    use std::fs;

    let temp_dir = std::env::temp_dir().join("complication_config_test_config");
    let config_path = temp_dir.join("nested").join("config.toml");

    if temp_dir.exists() {
        let _ = fs::remove_dir_all(&temp_dir);
    }
    assert!(!temp_dir.exists());

    let result = Config::generate_default_config(&config_path);
    assert!(result.is_ok());
    assert!(config_path.exists());

    let content = fs::read_to_string(&config_path).unwrap();
    assert!(content.contains("# Complication Config Configuration File"));
    assert!(content.contains("worker_threads = 2"));

    // The generated file loads back cleanly
    let loaded = Config::load_from_file(&config_path).unwrap();
    assert_eq!(loaded.gateway.worker_threads, 2);

    let _ = fs::remove_dir_all(&temp_dir);
}

#[test]
fn test_default_config_path_is_under_xdg_dir() {
    use complication_config::constants::CONFIG_DIR_NAME;

    // Headless CI boxes may have no config dir at all
    let Ok(dir) = Config::get_xdg_config_dir() else {
        return;
    };
    assert!(dir.ends_with(CONFIG_DIR_NAME));

    let path = Config::get_default_config_path().unwrap();
    assert_eq!(path, dir.join("config.toml"));
    assert!(path.ends_with("complication-config/config.toml"));
}
