// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Host wiring: settings store, container, and plugin manager.

use std::sync::Arc;

use plumb_config::PlumbConfig;
use plumb_container::TypeMapContainer;
use plumb_core::{PlumbError, SettingsStore};
use plumb_plugin::{PluginManager, PluginManagerSettings};
use plumb_settings::JsonSettingsStore;
use tracing::info;

use crate::catalog::host_catalog;

/// Everything one CLI invocation needs.
pub struct Host {
    pub settings: PluginManagerSettings,
    pub manager: PluginManager,
}

impl Host {
    /// Open the settings store named by `config` and build the manager.
    pub fn open(config: &PlumbConfig) -> Result<Self, PlumbError> {
        let store = JsonSettingsStore::open(&config.settings.path)?;
        Self::with_store(store)
    }

    pub fn with_store(store: JsonSettingsStore) -> Result<Self, PlumbError> {
        let store: Arc<dyn SettingsStore> = Arc::new(store);
        let settings = PluginManagerSettings::new(store.as_ref());
        let container = Arc::new(TypeMapContainer::new());
        let manager = PluginManager::new(container, host_catalog(Arc::clone(&store)), &settings)?;
        info!(
            plugins = manager.plugins().len(),
            disabled = manager.disabled_titles().len(),
            "host ready"
        );
        Ok(Self { settings, manager })
    }
}
