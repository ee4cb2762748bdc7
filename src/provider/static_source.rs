//! Provider source backed by a fixed table of assignments.

use super::{ProviderInfo, ProviderSource};
use crate::complications::{Slot, SlotId};
use crate::config::ProviderEntryConfig;
use crate::error::ProviderError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct StaticEntry {
    provider: Option<ProviderInfo>,
    delay: Duration,
}

/// Resolves slots from a fixed table, optionally after a per-slot delay.
/// Slots missing from the table resolve to no provider.
#[derive(Debug, Clone, Default)]
pub struct StaticProviderSource {
    entries: HashMap<SlotId, StaticEntry>,
}

impl StaticProviderSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from the `[providers.<slot>]` configuration tables
    pub fn from_config(providers: &HashMap<String, ProviderEntryConfig>) -> Self {
        let mut source = Self::new();
        for (slot_name, entry) in providers {
            let Some(slot) = Slot::from_name(slot_name) else {
                continue;
            };

            let mut provider = ProviderInfo::new(entry.app_name.clone(), entry.label.clone());
            if let Some(icon) = &entry.icon {
                provider = provider.with_icon(icon.clone());
            }
            source = source.with_delayed(slot.id(), Some(provider), Duration::from_millis(entry.delay_ms));
        }
        source
    }

    pub fn with(self, slot_id: SlotId, provider: Option<ProviderInfo>) -> Self {
        self.with_delayed(slot_id, provider, Duration::ZERO)
    }

    pub fn with_delayed(mut self, slot_id: SlotId, provider: Option<ProviderInfo>, delay: Duration) -> Self {
        self.entries.insert(slot_id, StaticEntry { provider, delay });
        self
    }
}

#[async_trait]
impl ProviderSource for StaticProviderSource {
    fn source_type(&self) -> &str {
        "static"
    }

    async fn resolve(&self, slot_id: SlotId) -> Result<Option<ProviderInfo>, ProviderError> {
        let Some(entry) = self.entries.get(&slot_id) else {
            return Ok(None);
        };

        if !entry.delay.is_zero() {
            tokio::time::sleep(entry.delay).await;
        }
        Ok(entry.provider.clone())
    }
}
