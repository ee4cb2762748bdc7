//! Durable appearance preferences.
//!
//! The configuration screen and the watch face renderer run in different
//! processes, so every change is written through immediately. Stores are
//! synchronous and keyed by a fixed namespace; there is no schema versioning.

use crate::constants::{
    PREFERENCE_FILE_KEY, SAVED_BACKGROUND_COLOR, SAVED_MARKERS_COLOR, SAVED_UNREAD_NOTIFICATIONS,
};
use crate::utils::color::{HandPalette, Rgb};
use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// User appearance preferences shared with the watch face renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearancePreferences {
    pub background_color: Rgb,
    pub highlight_color: Rgb,
    pub unread_notifications_enabled: bool,
}

impl Default for AppearancePreferences {
    fn default() -> Self {
        Self {
            background_color: Rgb::BLACK,
            highlight_color: Rgb::RED,
            unread_notifications_enabled: true,
        }
    }
}

impl AppearancePreferences {
    pub fn hand_palette(&self) -> HandPalette {
        HandPalette::for_background(self.background_color)
    }
}

/// Load/save boundary for appearance preferences.
pub trait PreferencesStore: Send {
    fn load(&self) -> Result<AppearancePreferences>;
    fn save(&self, preferences: &AppearancePreferences) -> Result<()>;
}

/// Preferences persisted as one TOML table per namespace.
///
/// ```toml
/// ["com.deviantdev.wearable.watchface.PREFERENCE_FILE_KEY"]
/// saved_background_color = "#000000"
/// saved_markers_color = "#FF0000"
/// saved_unread_notifications = true
/// ```
#[derive(Debug, Clone)]
pub struct FilePreferencesStore {
    path: PathBuf,
    namespace: String,
}

impl FilePreferencesStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self::with_namespace(path, PREFERENCE_FILE_KEY)
    }

    pub fn with_namespace<P: AsRef<Path>>(path: P, namespace: &str) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            namespace: namespace.to_string(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Default location under the platform data directory
    pub fn default_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join(crate::constants::CONFIG_DIR_NAME).join("preferences.toml"))
    }

    fn read_document(&self) -> Result<toml::Table> {
        if !self.path.exists() {
            return Ok(toml::Table::new());
        }

        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read preferences file: {}", self.path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse preferences file: {}", self.path.display()))
    }
}

impl PreferencesStore for FilePreferencesStore {
    fn load(&self) -> Result<AppearancePreferences> {
        let document = self.read_document()?;
        let defaults = AppearancePreferences::default();

        let Some(table) = document.get(&self.namespace).and_then(|value| value.as_table()) else {
            debug!("No saved preferences under '{}', using defaults", self.namespace);
            return Ok(defaults);
        };

        let color = |key: &str, fallback: Rgb| match table.get(key).and_then(|v| v.as_str()) {
            Some(raw) => raw.parse().unwrap_or_else(|e| {
                warn!("Ignoring saved '{}': {}", key, e);
                fallback
            }),
            None => fallback,
        };

        Ok(AppearancePreferences {
            background_color: color(SAVED_BACKGROUND_COLOR, defaults.background_color),
            highlight_color: color(SAVED_MARKERS_COLOR, defaults.highlight_color),
            unread_notifications_enabled: table
                .get(SAVED_UNREAD_NOTIFICATIONS)
                .and_then(|v| v.as_bool())
                .unwrap_or(defaults.unread_notifications_enabled),
        })
    }

    fn save(&self, preferences: &AppearancePreferences) -> Result<()> {
        // A damaged file must not block every later save.
        let mut document = self.read_document().unwrap_or_else(|e| {
            warn!("Rewriting unreadable preferences file: {:#}", e);
            toml::Table::new()
        });

        let mut table = toml::Table::new();
        table.insert(
            SAVED_BACKGROUND_COLOR.to_string(),
            toml::Value::String(preferences.background_color.to_hex()),
        );
        table.insert(
            SAVED_MARKERS_COLOR.to_string(),
            toml::Value::String(preferences.highlight_color.to_hex()),
        );
        table.insert(
            SAVED_UNREAD_NOTIFICATIONS.to_string(),
            toml::Value::Boolean(preferences.unread_notifications_enabled),
        );
        document.insert(self.namespace.clone(), toml::Value::Table(table));

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create preferences directory: {}", parent.display()))?;
        }

        let content = toml::to_string_pretty(&document).context("Failed to serialize preferences")?;

        // Write beside the target and rename so readers never see a partial file.
        let staging = self.path.with_extension("toml.tmp");
        std::fs::write(&staging, content)
            .with_context(|| format!("Failed to write preferences file: {}", staging.display()))?;
        std::fs::rename(&staging, &self.path)
            .with_context(|| format!("Failed to replace preferences file: {}", self.path.display()))?;

        debug!("Saved preferences to {}", self.path.display());
        Ok(())
    }
}

/// In-memory store; clones share the same preferences.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferencesStore {
    inner: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    preferences: AppearancePreferences,
    saves: usize,
}

impl MemoryPreferencesStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_preferences(preferences: AppearancePreferences) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoryState { preferences, saves: 0 })),
        }
    }

    /// Current stored preferences
    pub fn snapshot(&self) -> AppearancePreferences {
        self.inner
            .lock()
            .map(|state| state.preferences)
            .unwrap_or_default()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.inner.lock().map(|state| state.saves).unwrap_or(0)
    }
}

impl PreferencesStore for MemoryPreferencesStore {
    fn load(&self) -> Result<AppearancePreferences> {
        self.inner
            .lock()
            .map(|state| state.preferences)
            .map_err(|_| anyhow::anyhow!("Preferences lock poisoned"))
    }

    fn save(&self, preferences: &AppearancePreferences) -> Result<()> {
        let mut state = self
            .inner
            .lock()
            .map_err(|_| anyhow::anyhow!("Preferences lock poisoned"))?;
        state.preferences = *preferences;
        state.saves += 1;
        Ok(())
    }
}
