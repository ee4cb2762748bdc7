//! Configuration management for the complication configuration screen
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::complications::Slot;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, GATEWAY_DEFAULT_WORKERS, GATEWAY_MAX_WORKERS,
    GATEWAY_MIN_WORKERS, PREFERENCE_FILE_KEY,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub preferences: PreferencesConfig,
    pub gateway: GatewayConfig,
    pub logging: LoggingConfig,
    /// Static provider assignments keyed by slot name
    pub providers: HashMap<String, ProviderEntryConfig>,
}

/// Preference storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    /// Namespace the preference keys are stored under
    pub namespace: String,
    /// Preferences file; defaults to the platform data directory
    pub path: Option<PathBuf>,
}

/// Provider gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Worker threads used for provider lookups
    pub worker_threads: usize,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Write logs to a file instead of stderr
    pub enabled: bool,
    /// One of "off", "error", "warn", "info", "debug", "trace"
    pub level: String,
}

/// A provider assigned to a slot by the static provider source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderEntryConfig {
    pub app_name: String,
    pub label: String,
    #[serde(default)]
    pub icon: Option<String>,
    /// Artificial resolution latency in milliseconds
    #[serde(default)]
    pub delay_ms: u64,
}

impl Default for PreferencesConfig {
    fn default() -> Self {
        Self {
            namespace: PREFERENCE_FILE_KEY.to_string(),
            path: None,
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            worker_threads: GATEWAY_DEFAULT_WORKERS,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Ok(xdg_config) = Self::get_default_config_path() {
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.preferences.namespace.trim().is_empty() {
            anyhow::bail!("preferences.namespace cannot be empty");
        }

        if self.gateway.worker_threads < GATEWAY_MIN_WORKERS || self.gateway.worker_threads > GATEWAY_MAX_WORKERS {
            anyhow::bail!(
                "worker_threads must be between {} and {}, got {}",
                GATEWAY_MIN_WORKERS,
                GATEWAY_MAX_WORKERS,
                self.gateway.worker_threads
            );
        }

        self.logging.level_filter()?;

        for (slot_name, entry) in &self.providers {
            if Slot::from_name(slot_name).is_none() {
                let known: Vec<&str> = Slot::ALL.iter().map(|slot| slot.name()).collect();
                anyhow::bail!("Unknown provider slot '{}'. Known slots: {}", slot_name, known.join(", "));
            }
            if entry.app_name.is_empty() {
                anyhow::bail!("Provider for slot '{}': app_name cannot be empty", slot_name);
            }
        }

        Ok(())
    }

    /// Preferences file to use, falling back to the platform data directory
    pub fn preferences_path(&self) -> Result<PathBuf> {
        match &self.preferences.path {
            Some(path) => Ok(path.clone()),
            None => crate::preferences::FilePreferencesStore::default_path(),
        }
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        let header = format!(
            "# Complication Config Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format("%Y-%m-%d")
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(CONFIG_DIR_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
