//! Layout store: the single source of truth for widget layout.
//!
//! The store keeps the canonical in-memory layout and mirrors it to a
//! [`KeyValueStorage`] under [`LAYOUT_STORAGE_KEY`]. Storage is read once, at
//! construction. Mutations update memory synchronously and schedule a
//! debounced write of the full snapshot.
//!
//! # Debounce
//!
//! Each mutation aborts the pending write task (if any) and spawns a new one
//! that sleeps for the debounce window and then writes the snapshot captured
//! at mutation time. Only the last mutation in a burst reaches storage.
//!
//! Every scheduled or immediate write carries a generation number taken from
//! a shared gate. A timer task writes only if its generation is still the
//! latest when it acquires the gate, so an aborted task that was already
//! running on another worker thread can never overwrite a newer snapshot.
//!
//! When no tokio runtime is active the write happens synchronously instead.
//!
//! # Failures
//!
//! Storage errors are logged and swallowed. A failed read yields the default
//! layout; a failed write leaves memory authoritative for the session.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::descriptor::{self, default_layout, enabled_sorted, id_set, WidgetDescriptor, WidgetKind};
use super::LayoutError;
use crate::storage::KeyValueStorage;

/// Storage key holding the serialized layout.
pub const LAYOUT_STORAGE_KEY: &str = "school-dashboard.widget-layout";

/// Default window for coalescing layout writes.
pub const DEFAULT_PERSIST_DEBOUNCE: Duration = Duration::from_millis(500);

/// Owns the widget layout and its persistence.
pub struct LayoutStore {
    widgets: Vec<WidgetDescriptor>,
    storage: Arc<dyn KeyValueStorage>,
    debounce: Duration,
    /// Timer task for the pending debounced write.
    pending: Option<JoinHandle<()>>,
    /// Latest write generation; held while writing.
    gate: Arc<Mutex<u64>>,
}

impl std::fmt::Debug for LayoutStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayoutStore")
            .field("widgets", &self.widgets)
            .field("debounce", &self.debounce)
            .field("pending_write", &self.has_pending_write())
            .finish()
    }
}

impl LayoutStore {
    /// Builds the store, reading the persisted layout once.
    ///
    /// Falls back to [`default_layout`] when the key is absent, unreadable,
    /// unparseable, or structurally invalid. Never fails.
    pub fn load(storage: Arc<dyn KeyValueStorage>, debounce: Duration) -> Self {
        let widgets = read_persisted(storage.as_ref());
        Self {
            widgets,
            storage,
            debounce,
            pending: None,
            gate: Arc::new(Mutex::new(0)),
        }
    }

    /// Full layout in stored order, enabled and disabled.
    pub fn layout(&self) -> &[WidgetDescriptor] {
        &self.widgets
    }

    /// Enabled widgets sorted by `order` (ties keep array position).
    pub fn enabled_widgets(&self) -> Vec<WidgetDescriptor> {
        enabled_sorted(&self.widgets)
    }

    /// Looks up one descriptor.
    pub fn get(&self, id: WidgetKind) -> Option<&WidgetDescriptor> {
        self.widgets.iter().find(|d| d.id == id)
    }

    /// Debounce window in use.
    pub fn debounce(&self) -> Duration {
        self.debounce
    }

    /// Replaces the whole layout and schedules a debounced write.
    ///
    /// The replacement must be structurally valid and contain exactly the
    /// current set of ids. Otherwise nothing changes and an error is returned.
    pub fn update_layout(&mut self, new_layout: Vec<WidgetDescriptor>) -> Result<(), LayoutError> {
        descriptor::validate(&new_layout).map_err(LayoutError::Invalid)?;

        let current = id_set(&self.widgets);
        let incoming = id_set(&new_layout);
        if current != incoming {
            let mut missing: Vec<WidgetKind> = current.difference(&incoming).copied().collect();
            let mut unexpected: Vec<WidgetKind> = incoming.difference(&current).copied().collect();
            missing.sort();
            unexpected.sort();
            tracing::warn!(?missing, ?unexpected, "rejected layout update with mismatched ids");
            return Err(LayoutError::IdSetMismatch {
                missing,
                unexpected,
            });
        }

        self.widgets = new_layout;
        tracing::debug!("layout updated");
        self.schedule_persist();
        Ok(())
    }

    /// Flips `enabled` for `id` and schedules a debounced write.
    ///
    /// Returns the new `enabled` value, or `None` (and does nothing) if the
    /// layout has no such widget.
    pub fn toggle_widget(&mut self, id: WidgetKind) -> Option<bool> {
        let descriptor = self.widgets.iter_mut().find(|d| d.id == id)?;
        descriptor.enabled = !descriptor.enabled;
        let enabled = descriptor.enabled;
        tracing::debug!(widget = %id, enabled, "widget toggled");
        self.schedule_persist();
        Some(enabled)
    }

    /// Restores the default layout and writes it immediately.
    pub fn reset_layout(&mut self) {
        self.widgets = default_layout();
        tracing::info!("layout reset to defaults");
        self.persist_now();
    }

    /// Writes a pending debounced snapshot now instead of waiting.
    ///
    /// No-op when nothing is pending.
    pub fn flush(&mut self) {
        match self.pending.take() {
            Some(handle) if !handle.is_finished() => {
                handle.abort();
                self.persist_now();
            }
            _ => {}
        }
    }

    /// Cancels any pending write without performing it.
    pub fn shutdown(&mut self) {
        if let Some(handle) = self.pending.take() {
            if !handle.is_finished() {
                tracing::debug!("cancelling pending layout write");
            }
            handle.abort();
        }
        // Invalidate a timer that is already past its sleep on another worker.
        self.next_generation();
    }

    /// Whether a debounced write is scheduled and has not fired yet.
    pub fn has_pending_write(&self) -> bool {
        self.pending.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn next_generation(&self) -> u64 {
        let mut gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        *gate += 1;
        *gate
    }

    fn snapshot(&self) -> Option<String> {
        match serde_json::to_string(&self.widgets) {
            Ok(json) => Some(json),
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize widget layout");
                None
            }
        }
    }

    /// Aborts the pending write and schedules a new one for the current state.
    fn schedule_persist(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let Some(payload) = self.snapshot() else {
            return;
        };
        let generation = self.next_generation();

        let Ok(runtime) = Handle::try_current() else {
            tracing::trace!("no async runtime, persisting layout synchronously");
            write_if_current(self.storage.as_ref(), &self.gate, generation, &payload);
            return;
        };

        let storage = Arc::clone(&self.storage);
        let gate = Arc::clone(&self.gate);
        let debounce = self.debounce;
        self.pending = Some(runtime.spawn(async move {
            tokio::time::sleep(debounce).await;
            write_if_current(storage.as_ref(), &gate, generation, &payload);
        }));
    }

    /// Cancels the pending write and persists the current state right away.
    fn persist_now(&mut self) {
        if let Some(handle) = self.pending.take() {
            handle.abort();
        }
        let Some(payload) = self.snapshot() else {
            return;
        };
        let mut gate = self.gate.lock().unwrap_or_else(|e| e.into_inner());
        *gate += 1;
        write_payload(self.storage.as_ref(), &payload);
    }
}

impl Drop for LayoutStore {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Writes `payload` if `generation` is still the latest one.
fn write_if_current(
    storage: &dyn KeyValueStorage,
    gate: &Mutex<u64>,
    generation: u64,
    payload: &str,
) {
    let latest = gate.lock().unwrap_or_else(|e| e.into_inner());
    if *latest != generation {
        tracing::trace!(generation, latest = *latest, "skipping superseded layout write");
        return;
    }
    write_payload(storage, payload);
}

fn write_payload(storage: &dyn KeyValueStorage, payload: &str) {
    match storage.set_item(LAYOUT_STORAGE_KEY, payload) {
        Ok(()) => tracing::debug!(bytes = payload.len(), "widget layout persisted"),
        Err(e) => tracing::warn!(error = %e, "failed to persist widget layout"),
    }
}

/// Reads and validates the persisted layout, or returns the defaults.
fn read_persisted(storage: &dyn KeyValueStorage) -> Vec<WidgetDescriptor> {
    let raw = match storage.get_item(LAYOUT_STORAGE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            tracing::debug!("no persisted layout, using defaults");
            return default_layout();
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read persisted layout, using defaults");
            return default_layout();
        }
    };

    let layout: Vec<WidgetDescriptor> = match serde_json::from_str(&raw) {
        Ok(layout) => layout,
        Err(e) => {
            tracing::warn!(error = %e, "persisted layout is not valid JSON, using defaults");
            return default_layout();
        }
    };

    match descriptor::validate(&layout) {
        Ok(()) => {
            tracing::debug!(widgets = layout.len(), "loaded persisted layout");
            layout
        }
        Err(defect) => {
            tracing::warn!(%defect, "persisted layout is invalid, using defaults");
            default_layout()
        }
    }
}
