//! Row descriptors for the configuration list.
//!
//! The list is static per screen: six rows in a fixed order. Each row's
//! [`RowKind`] selects how the rendering layer draws it and what a tap does.

use crate::complications::Slot;
use crate::constants::{
    ICON_ADD_COMPLICATION, ICON_EXPAND_MORE, ICON_LANDSCAPE, ICON_NOTIFICATIONS_OFF, ICON_NOTIFICATIONS_ON,
    ICON_STYLES, LABEL_BACKGROUND_COLOR, LABEL_BACKGROUND_IMAGE, LABEL_MARKER_COLOR, LABEL_UNREAD_NOTIFICATIONS,
};
use crate::provider::IconRef;
use crate::utils::color::{Rgb, MATERIAL_PALETTE};
use serde::Serialize;

/// Discriminant of a configuration row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    PreviewAndComplications,
    MoreOptions,
    MarkerColor,
    BackgroundColor,
    UnreadNotifications,
    BackgroundComplication,
}

impl RowKind {
    /// Every kind, in display order
    pub const ALL: [RowKind; 6] = [
        RowKind::PreviewAndComplications,
        RowKind::MoreOptions,
        RowKind::MarkerColor,
        RowKind::BackgroundColor,
        RowKind::UnreadNotifications,
        RowKind::BackgroundComplication,
    ];

    /// What tapping a row of this kind does
    pub fn tap_action(self) -> RowAction {
        match self {
            // Complication taps inside the preview are dispatched per slot.
            RowKind::PreviewAndComplications => RowAction::None,
            RowKind::MoreOptions => RowAction::None,
            RowKind::MarkerColor => RowAction::OpenColorPicker(ColorTarget::Highlight),
            RowKind::BackgroundColor => RowAction::OpenColorPicker(ColorTarget::Background),
            RowKind::UnreadNotifications => RowAction::ToggleUnreadNotifications,
            RowKind::BackgroundComplication => RowAction::ChooseProvider(Slot::Background),
        }
    }
}

/// Which preview color a color picker edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorTarget {
    Highlight,
    Background,
}

/// Behavior bound to a row tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    None,
    OpenColorPicker(ColorTarget),
    ToggleUnreadNotifications,
    ChooseProvider(Slot),
}

/// Row descriptor with the data its renderer needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConfigRow {
    PreviewAndComplications {
        default_complication_icon: IconRef,
    },
    MoreOptions {
        icon: IconRef,
    },
    Color {
        target: ColorTarget,
        label: String,
        icon: IconRef,
    },
    UnreadNotifications {
        label: String,
        enabled_icon: IconRef,
        disabled_icon: IconRef,
    },
    BackgroundComplication {
        label: String,
        icon: IconRef,
    },
}

impl ConfigRow {
    pub fn kind(&self) -> RowKind {
        match self {
            ConfigRow::PreviewAndComplications { .. } => RowKind::PreviewAndComplications,
            ConfigRow::MoreOptions { .. } => RowKind::MoreOptions,
            ConfigRow::Color {
                target: ColorTarget::Highlight,
                ..
            } => RowKind::MarkerColor,
            ConfigRow::Color {
                target: ColorTarget::Background,
                ..
            } => RowKind::BackgroundColor,
            ConfigRow::UnreadNotifications { .. } => RowKind::UnreadNotifications,
            ConfigRow::BackgroundComplication { .. } => RowKind::BackgroundComplication,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            ConfigRow::Color { label, .. }
            | ConfigRow::UnreadNotifications { label, .. }
            | ConfigRow::BackgroundComplication { label, .. } => Some(label.as_str()),
            ConfigRow::PreviewAndComplications { .. } | ConfigRow::MoreOptions { .. } => None,
        }
    }

    /// Swatches offered when this row opens a color picker
    pub fn palette(&self) -> Option<&'static [Rgb]> {
        match self {
            ConfigRow::Color { .. } => Some(&MATERIAL_PALETTE),
            _ => None,
        }
    }
}

fn icon(name: &str) -> IconRef {
    IconRef(name.to_string())
}

/// The ordered, fixed list of configuration rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigRowModel {
    rows: Vec<ConfigRow>,
}

impl Default for ConfigRowModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigRowModel {
    pub fn new() -> Self {
        let rows = vec![
            ConfigRow::PreviewAndComplications {
                default_complication_icon: icon(ICON_ADD_COMPLICATION),
            },
            ConfigRow::MoreOptions {
                icon: icon(ICON_EXPAND_MORE),
            },
            ConfigRow::Color {
                target: ColorTarget::Highlight,
                label: LABEL_MARKER_COLOR.to_string(),
                icon: icon(ICON_STYLES),
            },
            ConfigRow::Color {
                target: ColorTarget::Background,
                label: LABEL_BACKGROUND_COLOR.to_string(),
                icon: icon(ICON_STYLES),
            },
            ConfigRow::UnreadNotifications {
                label: LABEL_UNREAD_NOTIFICATIONS.to_string(),
                enabled_icon: icon(ICON_NOTIFICATIONS_ON),
                disabled_icon: icon(ICON_NOTIFICATIONS_OFF),
            },
            ConfigRow::BackgroundComplication {
                label: LABEL_BACKGROUND_IMAGE.to_string(),
                icon: icon(ICON_LANDSCAPE),
            },
        ];

        Self { rows }
    }

    pub fn rows(&self) -> &[ConfigRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ConfigRow> {
        self.rows.get(index)
    }

    pub fn kind_at(&self, index: usize) -> Option<RowKind> {
        self.get(index).map(ConfigRow::kind)
    }

    /// Position of the first row of the given kind
    pub fn position_of(&self, kind: RowKind) -> Option<usize> {
        self.rows.iter().position(|row| row.kind() == kind)
    }
}
