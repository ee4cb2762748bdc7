//! Provider resolution layer.
//!
//! A provider is the external app or service supplying live data for a
//! complication slot. This module defines the provider data types, the
//! [`ProviderSource`] trait every resolution service implements, and the
//! [`ProviderInfoGateway`] that fans lookups out onto a worker pool.

use crate::complications::SlotId;
use crate::error::ProviderError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod gateway;
pub mod static_source;

pub use gateway::{LookupCallback, ProviderInfoGateway};
pub use static_source::StaticProviderSource;

/// Opaque handle to a provider icon, resolved by the rendering layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IconRef(pub String);

/// The provider currently feeding a slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderInfo {
    pub app_name: String,
    pub label: String,
    pub icon: Option<IconRef>,
}

impl ProviderInfo {
    pub fn new(app_name: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            label: label.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(IconRef(icon.into()));
        self
    }

    /// Accessibility description used by the rendering layer
    pub fn description(&self) -> String {
        format!("{} {}", self.app_name, self.label)
    }
}

/// Assignment of a provider to a slot. `provider == None` means the slot is
/// empty and the default placeholder is shown.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderAssignment {
    pub slot_id: SlotId,
    pub provider: Option<ProviderInfo>,
}

impl ProviderAssignment {
    pub fn new(slot_id: SlotId, provider: Option<ProviderInfo>) -> Self {
        Self { slot_id, provider }
    }

    pub fn empty(slot_id: SlotId) -> Self {
        Self { slot_id, provider: None }
    }

    pub fn is_empty(&self) -> bool {
        self.provider.is_none()
    }
}

/// External service that resolves which provider is assigned to a slot.
#[async_trait]
pub trait ProviderSource: Send + Sync {
    /// Returns the source type identifier (e.g., "static").
    fn source_type(&self) -> &str;

    async fn resolve(&self, slot_id: SlotId) -> Result<Option<ProviderInfo>, ProviderError>;
}
