//! Per-session owner of the layout store.
//!
//! Build one [`LayoutProvider`] at startup and pass it by `&mut` reference to
//! the views that read or mutate the layout. Call [`LayoutProvider::teardown`]
//! (or drop the provider) when the session ends; any pending debounced write
//! is cancelled so nothing fires after the owning context is gone.

use std::sync::Arc;
use std::time::Duration;

use super::LayoutStore;
use crate::config::error::ConfigError;
use crate::config::schema::Config;
use crate::storage::{FileStorage, KeyValueStorage};

/// Owned handle to the session's [`LayoutStore`].
#[derive(Debug)]
pub struct LayoutProvider {
    store: LayoutStore,
}

impl LayoutProvider {
    /// Builds the store over `storage`, reading the persisted layout once.
    pub fn mount(storage: Arc<dyn KeyValueStorage>, debounce: Duration) -> Self {
        let store = LayoutStore::load(storage, debounce);
        tracing::debug!(
            widgets = store.layout().len(),
            enabled = store.enabled_widgets().len(),
            "layout provider mounted"
        );
        Self { store }
    }

    /// Builds file-backed storage and the store from `[layout]` config.
    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let debounce = config.layout.persist_debounce()?;
        let path = config.layout.storage_path();
        tracing::debug!(path = %path.display(), ?debounce, "opening layout storage");
        Ok(Self::mount(Arc::new(FileStorage::new(path)), debounce))
    }

    /// Read access for rendering.
    pub fn store(&self) -> &LayoutStore {
        &self.store
    }

    /// Mutable access for reorder, toggle and reset.
    pub fn store_mut(&mut self) -> &mut LayoutStore {
        &mut self.store
    }

    /// Ends the session, cancelling any pending write without performing it.
    ///
    /// Callers that want the latest state on disk call
    /// [`LayoutStore::flush`] first.
    pub fn teardown(mut self) {
        self.store.shutdown();
        tracing::debug!("layout provider torn down");
    }
}
