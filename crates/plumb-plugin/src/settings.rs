// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted preferences of the plugin manager.

use std::collections::BTreeSet;
use std::sync::Arc;

use plumb_core::{DeferredChanges, PlumbError, ScopedSettings, SettingsStore};

/// Settings component name the plugin manager's preferences live under.
pub const COMPONENT: &str = "PluginManager";

const DISABLED_PLUGINS: &str = "DisabledPlugins";

/// Typed view of the plugin manager's settings component.
///
/// Titles are stored as given; they are not checked against any catalog, so a
/// title whose plugin no longer exists is kept and simply matches nothing.
#[derive(Clone)]
pub struct PluginManagerSettings {
    scope: Arc<dyn ScopedSettings>,
}

impl PluginManagerSettings {
    pub fn new(store: &dyn SettingsStore) -> Self {
        Self::from_scope(store.component_scope(COMPONENT))
    }

    pub fn from_scope(scope: Arc<dyn ScopedSettings>) -> Self {
        Self { scope }
    }

    /// Titles of disabled plugins. Empty when never written.
    pub fn disabled_plugins(&self) -> Result<BTreeSet<String>, PlumbError> {
        self.scope.get(DISABLED_PLUGINS, BTreeSet::new())
    }

    /// Replace the whole disabled list.
    pub fn set_disabled_plugins<I, S>(&self, titles: I) -> Result<(), PlumbError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let titles: BTreeSet<String> = titles.into_iter().map(Into::into).collect();
        self.scope.update(DISABLED_PLUGINS, &titles)
    }

    /// Hold back writes until the returned batch ends.
    pub fn defer_changes(&self) -> DeferredChanges {
        self.scope.defer_changes()
    }
}

impl std::fmt::Debug for PluginManagerSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManagerSettings")
            .field("component", &self.scope.component())
            .finish()
    }
}
