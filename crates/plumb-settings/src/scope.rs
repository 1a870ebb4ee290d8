// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component-scoped view over a [`JsonSettingsStore`](crate::JsonSettingsStore).

use std::sync::Arc;

use plumb_core::{PlumbError, ScopedSettings};
use serde_json::{Map, Value};
use tracing::{debug, trace, warn};

use crate::StoreInner;

/// The settings of one component inside a JSON document store.
///
/// Deferrals are counted store-wide: a batch opened through any scope holds
/// back writes made through every scope of the same store.
pub struct JsonScope {
    store: Arc<StoreInner>,
    component: String,
}

impl JsonScope {
    pub(crate) fn new(store: Arc<StoreInner>, component: &str) -> Self {
        Self {
            store,
            component: component.to_string(),
        }
    }
}

impl ScopedSettings for JsonScope {
    fn component(&self) -> &str {
        &self.component
    }

    fn get_value(&self, key: &str) -> Result<Option<Value>, PlumbError> {
        let state = self.store.lock();
        Ok(state
            .document
            .get(&self.component)
            .and_then(Value::as_object)
            .and_then(|section| section.get(key))
            .cloned())
    }

    fn update_value(&self, key: &str, value: Value) -> Result<(), PlumbError> {
        let mut state = self.store.lock();
        let previous = state.document.get(&self.component).cloned();
        let was_dirty = state.dirty;
        let section = state
            .document
            .entry(self.component.clone())
            .or_insert_with(|| Value::Object(Map::new()));
        if !section.is_object() {
            *section = Value::Object(Map::new());
        }
        if let Value::Object(section) = section {
            section.insert(key.to_string(), value);
        }
        trace!(component = %self.component, key, "setting updated");

        // A write that could not be persisted is rolled back so memory keeps
        // matching the file.
        if let Err(e) = self.store.commit(&mut state) {
            match previous {
                Some(section) => state.document.insert(self.component.clone(), section),
                None => state.document.remove(&self.component),
            };
            state.dirty = was_dirty;
            warn!(component = %self.component, key, error = %e, "setting not saved, reverted");
            return Err(e);
        }
        Ok(())
    }

    fn begin_deferral(&self) {
        let mut state = self.store.lock();
        state.deferrals += 1;
        debug!(component = %self.component, depth = state.deferrals, "deferring settings writes");
    }

    fn end_deferral(&self) -> Result<(), PlumbError> {
        let mut state = self.store.lock();
        state.deferrals = state.deferrals.saturating_sub(1);
        if state.deferrals == 0 && state.dirty {
            debug!(component = %self.component, "flushing deferred settings");
            return self.store.commit(&mut state);
        }
        Ok(())
    }
}
