//! Constants used throughout the configuration screen
//!
//! This module centralizes preference keys, user-facing notices, and other
//! constant values so the store, the controller and the binary agree on them.

// Preference storage
/// Namespace under which appearance preferences are persisted
pub const PREFERENCE_FILE_KEY: &str = "com.deviantdev.wearable.watchface.PREFERENCE_FILE_KEY";
pub const SAVED_BACKGROUND_COLOR: &str = "saved_background_color";
pub const SAVED_MARKERS_COLOR: &str = "saved_markers_color";
pub const SAVED_UNREAD_NOTIFICATIONS: &str = "saved_unread_notifications";

// User notices
pub const NOTICE_COLOR_BACKGROUND_CONFLICT: &str = "Selected image overrides background color.";
pub const NOTICE_UNREAD_ENABLED: &str = "Unread notification indicator enabled";
pub const NOTICE_UNREAD_DISABLED: &str = "Unread notification indicator disabled";

// Row labels
pub const LABEL_MARKER_COLOR: &str = "Marker color";
pub const LABEL_BACKGROUND_COLOR: &str = "Background color";
pub const LABEL_UNREAD_NOTIFICATIONS: &str = "Unread notifications";
pub const LABEL_BACKGROUND_IMAGE: &str = "Background image";

// Icon references handed to the rendering layer
pub const ICON_ADD_COMPLICATION: &str = "add_complication";
pub const ICON_EXPAND_MORE: &str = "ic_expand_more_white_18dp";
pub const ICON_STYLES: &str = "icn_styles";
pub const ICON_NOTIFICATIONS_ON: &str = "ic_notifications_white_24dp";
pub const ICON_NOTIFICATIONS_OFF: &str = "ic_notifications_off_white_24dp";
pub const ICON_LANDSCAPE: &str = "ic_landscape_white";

// Configuration file
pub const CONFIG_FILE_NAME: &str = "complication-config.toml";
pub const CONFIG_DIR_NAME: &str = "complication-config";
pub const CONFIG_GENERATED: &str = "Generated default configuration file";
pub const LOG_FILE_NAME: &str = "complication-config.log";

// Provider gateway
/// Minimum worker threads for the provider lookup pool
pub const GATEWAY_MIN_WORKERS: usize = 1;
/// Maximum worker threads for the provider lookup pool
pub const GATEWAY_MAX_WORKERS: usize = 16;
/// Default worker threads for the provider lookup pool
pub const GATEWAY_DEFAULT_WORKERS: usize = 2;
