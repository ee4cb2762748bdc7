//! Complication Config - watch face complication and appearance configuration
//!
//! This library holds the state behind a watch face configuration screen:
//! which complication slot the user is editing, which data provider each
//! slot resolves to, and the appearance preferences previewed alongside.
//! Rendering and the system provider chooser live outside this crate and
//! talk to it through plain calls and callbacks.
//!
//! # Modules
//!
//! * [`complications`] - Static catalog of configurable slots
//! * [`config`] - Application configuration management
//! * [`controller`] - Selection and preview state machine
//! * [`preferences`] - Durable appearance preferences
//! * [`provider`] - Asynchronous provider resolution gateway
//! * [`rows`] - Configuration list row descriptors
//! * [`utils`] - Colors and other helpers

/// Static catalog of complication slots
pub mod complications;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Selection and preview state machine
pub mod controller;

/// Error types shared across the crate
pub mod error;

/// Logging setup
pub mod logger;

/// Appearance preference storage
pub mod preferences;

/// Provider lookup boundary
pub mod provider;

/// Row model driving the configuration list
pub mod rows;

/// Utility functions for colors and other helpers
pub mod utils;

pub use complications::{ComplicationSlot, ComplicationSlotRegistry, Slot, SlotId};
pub use controller::SelectionAndPreviewController;
pub use error::{ConfigError, ProviderError};
