use crate::complications::{ComplicationSlotRegistry, Slot, SlotId};
use crate::preferences::AppearancePreferences;
use crate::provider::ProviderInfo;
use crate::utils::color::Rgb;
use serde::Serialize;
use std::collections::BTreeMap;

/// Preview of a single slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(tag = "state", content = "provider", rename_all = "snake_case")]
pub enum SlotPreview {
    /// No lookup result or user choice has arrived yet
    #[default]
    Unresolved,
    /// Resolved; `None` means no provider is assigned
    Resolved(Option<ProviderInfo>),
}

impl SlotPreview {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, SlotPreview::Unresolved)
    }

    pub fn provider(&self) -> Option<&ProviderInfo> {
        match self {
            SlotPreview::Resolved(provider) => provider.as_ref(),
            SlotPreview::Unresolved => None,
        }
    }

    pub fn has_provider(&self) -> bool {
        self.provider().is_some()
    }
}

/// In-memory preview of the watch face being configured.
///
/// `background_complication_active` always mirrors whether the background
/// slot has a provider; it is only recomputed through [`PreviewState::set_slot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewState {
    per_slot: BTreeMap<SlotId, SlotPreview>,
    background_complication_active: bool,
    pub highlight_color: Rgb,
    pub background_color: Rgb,
}

impl PreviewState {
    /// Every catalog slot unresolved, colors from preferences
    pub fn new(registry: &ComplicationSlotRegistry, preferences: &AppearancePreferences) -> Self {
        Self {
            per_slot: registry
                .all_slots()
                .iter()
                .map(|slot| (slot.id, SlotPreview::Unresolved))
                .collect(),
            background_complication_active: false,
            highlight_color: preferences.highlight_color,
            background_color: preferences.background_color,
        }
    }

    pub fn slot(&self, slot_id: SlotId) -> Option<&SlotPreview> {
        self.per_slot.get(&slot_id)
    }

    pub fn slots(&self) -> &BTreeMap<SlotId, SlotPreview> {
        &self.per_slot
    }

    pub fn background_complication_active(&self) -> bool {
        self.background_complication_active
    }

    pub(crate) fn set_slot(&mut self, slot_id: SlotId, provider: Option<ProviderInfo>) {
        self.per_slot.insert(slot_id, SlotPreview::Resolved(provider));
        if slot_id == Slot::Background.id() {
            self.background_complication_active = self
                .per_slot
                .get(&slot_id)
                .is_some_and(SlotPreview::has_provider);
        }
    }
}

/// The slot currently being edited through the external chooser, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct EditSession {
    target_slot_id: Option<SlotId>,
}

impl EditSession {
    pub fn target_slot_id(&self) -> Option<SlotId> {
        self.target_slot_id
    }

    pub fn is_active(&self) -> bool {
        self.target_slot_id.is_some()
    }

    pub(crate) fn begin(&mut self, slot_id: SlotId) -> Option<SlotId> {
        self.target_slot_id.replace(slot_id)
    }

    pub(crate) fn finish(&mut self) -> Option<SlotId> {
        self.target_slot_id.take()
    }
}
