//! Static catalog of the watch face's configurable complication slots.
//!
//! The slot set is closed and fixed at process start: a background image
//! slot plus a left and right icon slot. Slot ids are what the external
//! provider chooser and the provider service key on, so they must be >= 0
//! and stable.

use crate::error::ConfigError;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a complication slot.
pub type SlotId = i32;

/// Kinds of complication data a slot can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataKind {
    RangedValue,
    Icon,
    ShortText,
    SmallImage,
    LargeImage,
}

/// The fixed complication positions on the watch face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    Background,
    Left,
    Right,
}

impl Slot {
    pub const ALL: [Slot; 3] = [Slot::Background, Slot::Left, Slot::Right];

    #[must_use]
    pub const fn id(self) -> SlotId {
        match self {
            Slot::Background => 0,
            Slot::Left => 100,
            Slot::Right => 101,
        }
    }

    #[must_use]
    pub fn from_id(id: SlotId) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.id() == id)
    }

    /// Lowercase name used in configuration files
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Slot::Background => "background",
            Slot::Left => "left",
            Slot::Right => "right",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Slot> {
        Slot::ALL.into_iter().find(|slot| slot.name() == name)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A configurable complication slot and the data kinds it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplicationSlot {
    pub slot: Slot,
    pub id: SlotId,
    pub supported_kinds: BTreeSet<DataKind>,
}

static SLOTS: Lazy<[ComplicationSlot; 3]> = Lazy::new(|| {
    let icon_kinds: BTreeSet<DataKind> = [
        DataKind::RangedValue,
        DataKind::Icon,
        DataKind::ShortText,
        DataKind::SmallImage,
    ]
    .into_iter()
    .collect();

    [
        ComplicationSlot {
            slot: Slot::Background,
            id: Slot::Background.id(),
            supported_kinds: [DataKind::LargeImage].into_iter().collect(),
        },
        ComplicationSlot {
            slot: Slot::Left,
            id: Slot::Left.id(),
            supported_kinds: icon_kinds.clone(),
        },
        ComplicationSlot {
            slot: Slot::Right,
            id: Slot::Right.id(),
            supported_kinds: icon_kinds,
        },
    ]
});

/// Read-only catalog of complication slots.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplicationSlotRegistry;

impl ComplicationSlotRegistry {
    pub fn new() -> Self {
        Self
    }

    /// All slots in catalog order: background, left, right
    pub fn all_slots(&self) -> &'static [ComplicationSlot] {
        SLOTS.as_slice()
    }

    /// Ids of every slot, in catalog order
    pub fn all_ids(&self) -> Vec<SlotId> {
        self.all_slots().iter().map(|slot| slot.id).collect()
    }

    /// Look up a slot by id
    pub fn slot_by_id(&self, id: SlotId) -> Result<&'static ComplicationSlot, ConfigError> {
        self.all_slots()
            .iter()
            .find(|slot| slot.id == id)
            .ok_or(ConfigError::SlotNotFound(id))
    }

    pub fn slot(&self, slot: Slot) -> &'static ComplicationSlot {
        &SLOTS[slot as usize]
    }
}
