// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin activation and container wiring.
//!
//! The `PluginManager` owns the activation policy: which catalog entries are
//! active, how they are grouped, and the one-time registration of their
//! component types with the container.
//!
//! The disabled list is read once, when the manager is built. Later edits to
//! the persisted list take effect for the next manager (the next process run),
//! never for this one.

use std::collections::{BTreeSet, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use plumb_core::{ComponentType, Container, Instance, Lifetime, PlumbError, TypeKey};
use tracing::{debug, info, warn};

use crate::descriptor::PluginDescriptor;
use crate::settings::PluginManagerSettings;

/// A behavior instance resolved during initialization.
#[derive(Debug, Clone)]
pub struct ResolvedPlugin {
    /// Title of the descriptor the instance was resolved for.
    pub title: String,
    pub instance: Instance,
}

impl ResolvedPlugin {
    /// The instance as `T`, if it is one.
    pub fn downcast<T: std::any::Any + Send + Sync>(&self) -> Option<Arc<T>> {
        Arc::clone(&self.instance).downcast::<T>().ok()
    }
}

#[derive(Default)]
struct InitState {
    /// Types this manager has registered, across all phases and attempts.
    registered: HashSet<TypeKey>,
    /// `None` until initialization completes.
    resolved: Option<Vec<ResolvedPlugin>>,
}

/// Decides which plugins are active and wires them into a container.
pub struct PluginManager {
    container: Arc<dyn Container>,
    catalog: Arc<[PluginDescriptor]>,
    disabled: BTreeSet<String>,
    state: Mutex<InitState>,
}

impl PluginManager {
    /// Build a manager over `catalog`, taking the disabled list from `settings`.
    ///
    /// Fails if two descriptors share a title or the disabled list cannot be
    /// read.
    pub fn new(
        container: Arc<dyn Container>,
        catalog: impl Into<Arc<[PluginDescriptor]>>,
        settings: &PluginManagerSettings,
    ) -> Result<Self, PlumbError> {
        let disabled = settings.disabled_plugins()?;
        Self::with_disabled(container, catalog, disabled)
    }

    /// Build a manager with an explicit disabled list.
    pub fn with_disabled<I, S>(
        container: Arc<dyn Container>,
        catalog: impl Into<Arc<[PluginDescriptor]>>,
        disabled: I,
    ) -> Result<Self, PlumbError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let catalog = catalog.into();
        check_unique_titles(&catalog)?;
        let disabled: BTreeSet<String> = disabled.into_iter().map(Into::into).collect();

        debug!(
            plugins = catalog.len(),
            disabled = disabled.len(),
            "plugin manager created"
        );

        Ok(Self {
            container,
            catalog,
            disabled,
            state: Mutex::new(InitState::default()),
        })
    }

    /// The full catalog, in catalog order.
    pub fn plugins(&self) -> &[PluginDescriptor] {
        &self.catalog
    }

    /// Look a descriptor up by title.
    pub fn plugin(&self, title: &str) -> Option<&PluginDescriptor> {
        self.catalog.iter().find(|d| d.title() == title)
    }

    /// The disabled list as it was when this manager was built.
    pub fn disabled_titles(&self) -> &BTreeSet<String> {
        &self.disabled
    }

    pub fn is_active(&self, descriptor: &PluginDescriptor) -> bool {
        !self.disabled.contains(descriptor.title())
    }

    /// Catalog entries that are not disabled, in catalog order.
    pub fn active_plugins(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.catalog.iter().filter(|d| self.is_active(d))
    }

    /// Active built-in plugins by ascending order. Equal orders keep catalog order.
    pub fn built_in_plugins(&self) -> Vec<&PluginDescriptor> {
        let mut built_in: Vec<(i32, &PluginDescriptor)> = self
            .active_plugins()
            .filter_map(|d| d.classification().order().map(|order| (order, d)))
            .collect();
        // `sort_by_key` is stable.
        built_in.sort_by_key(|(order, _)| *order);
        built_in.into_iter().map(|(_, d)| d).collect()
    }

    /// Active plugins that are not built-in, in catalog order.
    pub fn custom_plugins(&self) -> impl Iterator<Item = &PluginDescriptor> {
        self.active_plugins().filter(|d| !d.classification().is_built_in())
    }

    /// Resolve the settings editor of `descriptor`.
    ///
    /// Returns `Ok(None)` without consulting the container when the plugin has
    /// no editor. The descriptor does not have to be active.
    pub fn resolve_setting_editor(
        &self,
        descriptor: &PluginDescriptor,
    ) -> Result<Option<Instance>, PlumbError> {
        let Some(editor) = descriptor.editor() else {
            return Ok(None);
        };
        debug!(plugin = descriptor.title(), editor = %editor.key(), "resolving settings editor");
        self.container.resolve(&editor.key()).map(Some)
    }

    /// Register all plugin components and resolve active behaviors, once.
    ///
    /// Phases run in this order:
    /// 1. settings types of every catalog entry (transient),
    /// 2. editor types of every catalog entry (transient),
    /// 3. behavior types of active entries (singleton), then one resolve per
    ///    active entry with a behavior.
    ///
    /// Later calls return immediately. A container error stops initialization
    /// and is returned as-is; the manager stays uninitialized, and a later call
    /// picks up without registering any type twice.
    pub fn init_plugins(&self) -> Result<(), PlumbError> {
        let mut state = self.lock_state();
        if state.resolved.is_some() {
            debug!("plugins already initialized");
            return Ok(());
        }
        let registered = &mut state.registered;

        for descriptor in self.catalog.iter() {
            if let Some(settings) = descriptor.settings() {
                self.register_once(registered, descriptor, settings, Lifetime::Transient)?;
            }
        }

        for descriptor in self.catalog.iter() {
            if let Some(editor) = descriptor.editor() {
                self.register_once(registered, descriptor, editor, Lifetime::Transient)?;
            }
        }

        for descriptor in self.active_plugins() {
            if let Some(behavior) = descriptor.behavior() {
                self.register_once(registered, descriptor, behavior, Lifetime::Singleton)?;
            }
        }

        let mut resolved = Vec::new();
        for descriptor in self.active_plugins() {
            if let Some(behavior) = descriptor.behavior() {
                let instance = self.container.resolve(&behavior.key())?;
                debug!(plugin = descriptor.title(), behavior = %behavior.key(), "plugin resolved");
                resolved.push(ResolvedPlugin {
                    title: descriptor.title().to_string(),
                    instance,
                });
            }
        }

        info!(
            plugins = self.catalog.len(),
            active = self.active_plugins().count(),
            resolved = resolved.len(),
            registered = state.registered.len(),
            "plugins initialized"
        );
        state.resolved = Some(resolved);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.lock_state().resolved.is_some()
    }

    /// Behavior instances in catalog order. Empty before [`init_plugins`](Self::init_plugins).
    pub fn resolved_plugins(&self) -> Vec<ResolvedPlugin> {
        self.lock_state().resolved.clone().unwrap_or_default()
    }

    /// The behavior instance resolved for `title`, if any.
    pub fn resolved_instance(&self, title: &str) -> Option<Instance> {
        let state = self.lock_state();
        state
            .resolved
            .as_ref()?
            .iter()
            .find(|p| p.title == title)
            .map(|p| Arc::clone(&p.instance))
    }

    fn register_once(
        &self,
        registered: &mut HashSet<TypeKey>,
        descriptor: &PluginDescriptor,
        component: &ComponentType,
        lifetime: Lifetime,
    ) -> Result<(), PlumbError> {
        let key = component.key();
        if registered.contains(&key) {
            debug!(plugin = descriptor.title(), component = %key, "component already registered");
            return Ok(());
        }
        self.container.register(component, lifetime)?;
        registered.insert(key);
        debug!(plugin = descriptor.title(), component = %key, %lifetime, "component registered");
        Ok(())
    }

    /// The state is only published once initialization completes, so a panic
    /// in a component factory leaves it consistent and the lock is recovered.
    fn lock_state(&self) -> MutexGuard<'_, InitState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("plugin manager state lock poisoned by a panic, recovering");
            poisoned.into_inner()
        })
    }
}

impl std::fmt::Debug for PluginManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PluginManager")
            .field("plugins", &self.catalog.len())
            .field("disabled", &self.disabled)
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

fn check_unique_titles(catalog: &[PluginDescriptor]) -> Result<(), PlumbError> {
    let mut seen = HashSet::with_capacity(catalog.len());
    for descriptor in catalog {
        if !seen.insert(descriptor.title()) {
            return Err(PlumbError::DuplicateTitle {
                title: descriptor.title().to_string(),
            });
        }
    }
    Ok(())
}
