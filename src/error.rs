//! Error types for the configuration core.

use crate::complications::SlotId;

/// Errors surfaced by the complication registry, controller and stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Complication slot not found: {0}")]
    SlotNotFound(SlotId),

    #[error("Configuration row not found: {0}")]
    RowNotFound(usize),

    #[error("Background complication is active, background color not applied")]
    ColorBackgroundConflict,

    #[error("Provider gateway has not been opened")]
    GatewayNotOpen,

    #[error("Provider gateway is closed")]
    GatewayClosed,

    #[error("Gateway runtime error: {0}")]
    Runtime(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}

/// Errors reported by a provider source. These never leave the gateway:
/// a failed slot is reported as having no provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider service unavailable: {0}")]
    Unavailable(String),
}
