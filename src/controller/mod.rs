//! Complication selection and preview synchronization.
//!
//! [`SelectionAndPreviewController`] owns the preview shown on the
//! configuration screen. Two paths write slot assignments into it:
//!
//! 1. The user taps a slot, the external provider chooser runs, and its
//!    result comes back through [`SelectionAndPreviewController::apply_chosen_provider`].
//! 2. The bulk lookup issued at construction resolves each slot on the
//!    gateway's worker pool. Results are queued on a channel and applied on
//!    the owner's context by [`SelectionAndPreviewController::process_lookup_results`].
//!
//! A slot set by the user is never overwritten by a later bulk result for
//! the lifetime of the controller, whatever order the results arrive in.

use crate::complications::{ComplicationSlotRegistry, DataKind, Slot, SlotId};
use crate::constants::{NOTICE_COLOR_BACKGROUND_CONFLICT, NOTICE_UNREAD_DISABLED, NOTICE_UNREAD_ENABLED};
use crate::error::ConfigError;
use crate::preferences::{AppearancePreferences, PreferencesStore};
use crate::provider::{ProviderAssignment, ProviderInfo, ProviderInfoGateway};
use crate::rows::{ColorTarget, ConfigRowModel, RowAction};
use crate::utils::color::{HandPalette, Rgb, MATERIAL_PALETTE};
use log::{debug, error, info, warn};
use std::collections::{BTreeSet, HashSet};
use tokio::sync::mpsc;

pub mod state;

pub use state::{EditSession, PreviewState, SlotPreview};

/// Request handed to the external provider chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChooserRequest {
    pub slot_id: SlotId,
    pub supported_kinds: BTreeSet<DataKind>,
}

/// Result of delivering a chooser result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied { slot_id: SlotId },
    /// No edit session was open; nothing changed
    StaleSessionIgnored,
}

/// Result of applying a bulk lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    Applied { slot_id: SlotId },
    /// The user already chose a provider for this slot; nothing changed
    SupersededByUserChoice { slot_id: SlotId },
}

/// What a row tap led to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowOutcome {
    Nothing,
    OpenColorPicker { target: ColorTarget, palette: &'static [Rgb] },
    UnreadNotificationsToggled(bool),
    ChooserRequested(ChooserRequest),
}

pub struct SelectionAndPreviewController {
    registry: ComplicationSlotRegistry,
    rows: ConfigRowModel,
    store: Box<dyn PreferencesStore>,
    preferences: AppearancePreferences,
    preview: PreviewState,
    session: EditSession,
    // Slots set by a chooser result; bulk results for these are ignored.
    user_chosen: HashSet<SlotId>,
    gateway: ProviderInfoGateway,
    lookup_rx: mpsc::UnboundedReceiver<ProviderAssignment>,
    last_notice: Option<String>,
}

impl SelectionAndPreviewController {
    /// Load preferences, open the gateway and issue the bulk lookup for every slot.
    pub fn new(store: Box<dyn PreferencesStore>, mut gateway: ProviderInfoGateway) -> Result<Self, ConfigError> {
        let registry = ComplicationSlotRegistry::new();

        let preferences = store.load().unwrap_or_else(|e| {
            warn!("Failed to load preferences, using defaults: {:#}", e);
            AppearancePreferences::default()
        });
        let preview = PreviewState::new(&registry, &preferences);

        gateway.open()?;

        let (lookup_tx, lookup_rx) = mpsc::unbounded_channel();
        let slot_ids: BTreeSet<SlotId> = registry.all_ids().into_iter().collect();
        gateway.lookup_all(&slot_ids, move |assignment| {
            // The receiver is gone once the controller is dropped.
            let _ = lookup_tx.send(assignment);
        })?;

        info!("Configuration controller ready, bulk lookup issued for {} slots", slot_ids.len());

        Ok(Self {
            registry,
            rows: ConfigRowModel::new(),
            store,
            preferences,
            preview,
            session: EditSession::default(),
            user_chosen: HashSet::new(),
            gateway,
            lookup_rx,
            last_notice: None,
        })
    }

    pub fn preview(&self) -> &PreviewState {
        &self.preview
    }

    pub fn edit_session(&self) -> EditSession {
        self.session
    }

    pub fn preferences(&self) -> &AppearancePreferences {
        &self.preferences
    }

    pub fn rows(&self) -> &ConfigRowModel {
        &self.rows
    }

    pub fn registry(&self) -> &ComplicationSlotRegistry {
        &self.registry
    }

    /// Last user-visible notice, such as the color/background conflict
    pub fn last_notice(&self) -> Option<&str> {
        self.last_notice.as_deref()
    }

    /// Start editing a slot. The returned request goes to the external chooser.
    pub fn begin_edit(&mut self, slot_id: SlotId) -> Result<ChooserRequest, ConfigError> {
        let slot = self.registry.slot_by_id(slot_id)?;

        if let Some(previous) = self.session.begin(slot_id) {
            debug!("Edit session for slot {} replaced by slot {}", previous, slot_id);
        }
        debug!("Edit session started for {} (slot {})", slot.slot, slot_id);

        Ok(ChooserRequest {
            slot_id,
            supported_kinds: slot.supported_kinds.clone(),
        })
    }

    /// Tap on a complication inside the preview row
    pub fn tap_slot(&mut self, slot: Slot) -> Result<ChooserRequest, ConfigError> {
        self.begin_edit(slot.id())
    }

    /// Deliver the chooser's result to the slot the open session targets.
    pub fn apply_chosen_provider(&mut self, provider: Option<ProviderInfo>) -> ApplyOutcome {
        let Some(slot_id) = self.session.finish() else {
            warn!("Chooser result arrived with no open edit session, ignoring");
            return ApplyOutcome::StaleSessionIgnored;
        };

        debug!(
            "Chooser result for slot {}: {}",
            slot_id,
            provider.as_ref().map_or_else(|| "none".to_string(), ProviderInfo::description)
        );
        self.preview.set_slot(slot_id, provider);
        self.user_chosen.insert(slot_id);

        ApplyOutcome::Applied { slot_id }
    }

    /// Close the edit session without a result (chooser dismissed).
    pub fn cancel_edit(&mut self) -> Option<SlotId> {
        let cancelled = self.session.finish();
        if let Some(slot_id) = cancelled {
            debug!("Edit session for slot {} cancelled", slot_id);
        }
        cancelled
    }

    /// Merge a bulk lookup result. Leaves the edit session untouched.
    pub fn reconcile_from_bulk_lookup(
        &mut self,
        slot_id: SlotId,
        provider: Option<ProviderInfo>,
    ) -> Result<ReconcileOutcome, ConfigError> {
        self.registry.slot_by_id(slot_id)?;

        if self.user_chosen.contains(&slot_id) {
            debug!("Ignoring bulk lookup result for slot {}, user choice wins", slot_id);
            return Ok(ReconcileOutcome::SupersededByUserChoice { slot_id });
        }

        if provider.is_none() {
            debug!("No provider assigned to slot {}", slot_id);
        }
        self.preview.set_slot(slot_id, provider);
        Ok(ReconcileOutcome::Applied { slot_id })
    }

    /// Apply every queued bulk lookup result. Returns how many were received.
    pub fn process_lookup_results(&mut self) -> usize {
        let mut received = 0;
        while let Ok(assignment) = self.lookup_rx.try_recv() {
            received += 1;
            let _ = self.apply_lookup_result(assignment);
        }
        received
    }

    /// Wait for the next bulk lookup result and apply it.
    ///
    /// Returns `None` only once no more results can arrive. A result that
    /// could not be applied is `Some(Err(_))`, so callers draining the queue
    /// keep going past it.
    pub async fn wait_for_lookup_result(&mut self) -> Option<Result<ReconcileOutcome, ConfigError>> {
        let assignment = self.lookup_rx.recv().await?;
        Some(self.apply_lookup_result(assignment))
    }

    fn apply_lookup_result(&mut self, assignment: ProviderAssignment) -> Result<ReconcileOutcome, ConfigError> {
        self.reconcile_from_bulk_lookup(assignment.slot_id, assignment.provider)
            .inspect_err(|e| warn!("Discarding lookup result: {}", e))
    }

    /// Change a preview color and persist it.
    ///
    /// A background color cannot be shown while the background complication
    /// is active; that case leaves everything unchanged and records a notice.
    pub fn apply_color_preference(&mut self, target: ColorTarget, color: Rgb) -> Result<(), ConfigError> {
        match target {
            ColorTarget::Background if self.preview.background_complication_active() => {
                warn!("Background color {} not applied: background complication active", color);
                self.last_notice = Some(NOTICE_COLOR_BACKGROUND_CONFLICT.to_string());
                return Err(ConfigError::ColorBackgroundConflict);
            }
            ColorTarget::Background => {
                self.preview.background_color = color;
                self.preferences.background_color = color;
            }
            ColorTarget::Highlight => {
                self.preview.highlight_color = color;
                self.preferences.highlight_color = color;
            }
        }

        debug!("{:?} color set to {}", target, color);
        self.persist()
    }

    /// Flip the unread-notification indicator, persist, and return the new value.
    pub fn toggle_unread_notifications(&mut self) -> Result<bool, ConfigError> {
        let enabled = !self.preferences.unread_notifications_enabled;
        self.preferences.unread_notifications_enabled = enabled;
        self.last_notice = Some(
            if enabled {
                NOTICE_UNREAD_ENABLED
            } else {
                NOTICE_UNREAD_DISABLED
            }
            .to_string(),
        );

        self.persist()?;
        Ok(enabled)
    }

    /// Dispatch a tap on the row at `index`.
    pub fn activate_row(&mut self, index: usize) -> Result<RowOutcome, ConfigError> {
        let kind = self.rows.kind_at(index).ok_or(ConfigError::RowNotFound(index))?;
        debug!("Row {} ({:?}) activated", index, kind);

        match kind.tap_action() {
            RowAction::None => Ok(RowOutcome::Nothing),
            RowAction::OpenColorPicker(target) => Ok(RowOutcome::OpenColorPicker {
                target,
                palette: &MATERIAL_PALETTE,
            }),
            RowAction::ToggleUnreadNotifications => {
                self.toggle_unread_notifications().map(RowOutcome::UnreadNotificationsToggled)
            }
            RowAction::ChooseProvider(slot) => self.tap_slot(slot).map(RowOutcome::ChooserRequested),
        }
    }

    /// Color the rendering layer should paint the preview background with.
    /// Gray while the background complication's icon is shown.
    pub fn background_preview_color(&self) -> Rgb {
        if self.preview.background_complication_active() {
            Rgb::GRAY
        } else {
            self.preview.background_color
        }
    }

    pub fn hand_palette(&self) -> HandPalette {
        HandPalette::for_background(self.preview.background_color)
    }

    /// Provider lookups still in flight
    pub fn pending_lookups(&self) -> usize {
        self.gateway.pending_lookups()
    }

    pub fn is_dismissed(&self) -> bool {
        self.gateway.is_closed()
    }

    /// Tear down the screen: close the gateway. Later calls are no-ops.
    pub fn dismiss(&mut self) {
        if self.gateway.is_closed() {
            return;
        }
        self.gateway.close();
        info!("Configuration controller dismissed");
    }

    fn persist(&self) -> Result<(), ConfigError> {
        self.store.save(&self.preferences).map_err(|e| {
            error!("Failed to save preferences: {:#}", e);
            ConfigError::Persistence(e.to_string())
        })
    }
}

impl Drop for SelectionAndPreviewController {
    fn drop(&mut self) {
        self.dismiss();
    }
}
