// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persisted settings store contract.
//!
//! A store hands out component-scoped views. Values are JSON; typed access goes
//! through the helpers on `dyn ScopedSettings`.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::PlumbError;

/// A persisted key-value settings store.
pub trait SettingsStore: Send + Sync {
    /// The view of the store owned by `component`.
    fn component_scope(&self, component: &str) -> Arc<dyn ScopedSettings>;
}

/// The settings of a single component.
pub trait ScopedSettings: Send + Sync {
    /// Name of the owning component.
    fn component(&self) -> &str;

    /// Read the raw value stored under `key`, if any.
    fn get_value(&self, key: &str) -> Result<Option<serde_json::Value>, PlumbError>;

    /// Replace the value stored under `key`.
    ///
    /// Persisted immediately unless a deferral is open.
    fn update_value(&self, key: &str, value: serde_json::Value) -> Result<(), PlumbError>;

    /// Open a deferral. Deferrals nest.
    fn begin_deferral(&self);

    /// Close a deferral, flushing buffered writes when the outermost one closes.
    fn end_deferral(&self) -> Result<(), PlumbError>;
}

impl dyn ScopedSettings {
    /// Read `key` as `T`, or `default` when it was never written.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, PlumbError> {
        match self.get_value(key)? {
            Some(value) => serde_json::from_value(value).map_err(|e| {
                PlumbError::settings(format!("cannot decode {}.{key}", self.component()), e)
            }),
            None => Ok(default),
        }
    }

    /// Write `value` under `key`.
    pub fn update<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), PlumbError> {
        let value = serde_json::to_value(value).map_err(|e| {
            PlumbError::settings(format!("cannot encode {}.{key}", self.component()), e)
        })?;
        self.update_value(key, value)
    }

    /// Batch writes until the returned guard is committed or dropped.
    pub fn defer_changes(self: &Arc<Self>) -> DeferredChanges {
        self.begin_deferral();
        DeferredChanges {
            scope: Some(Arc::clone(self)),
        }
    }
}

/// Write batch over a [`ScopedSettings`].
///
/// Ends the deferral on [`commit`](Self::commit) or on drop. Dropping cannot
/// report a flush failure, so it is logged instead.
#[must_use = "writes are flushed when the guard is dropped"]
pub struct DeferredChanges {
    scope: Option<Arc<dyn ScopedSettings>>,
}

impl DeferredChanges {
    /// End the deferral now and report whether the flush succeeded.
    pub fn commit(mut self) -> Result<(), PlumbError> {
        match self.scope.take() {
            Some(scope) => scope.end_deferral(),
            None => Ok(()),
        }
    }
}

impl Drop for DeferredChanges {
    fn drop(&mut self) {
        if let Some(scope) = self.scope.take() {
            if let Err(e) = scope.end_deferral() {
                warn!(
                    component = scope.component(),
                    error = %e,
                    "failed to flush deferred settings"
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use tracing_test::traced_test;

    /// Counts deferral calls; optionally fails on flush.
    #[derive(Default)]
    struct Recording {
        values: Mutex<HashMap<String, serde_json::Value>>,
        depth: Mutex<i32>,
        ended: Mutex<u32>,
        fail_flush: bool,
    }

    impl ScopedSettings for Recording {
        fn component(&self) -> &str {
            "Recording"
        }

        fn get_value(&self, key: &str) -> Result<Option<serde_json::Value>, PlumbError> {
            Ok(self.values.lock().unwrap().get(key).cloned())
        }

        fn update_value(&self, key: &str, value: serde_json::Value) -> Result<(), PlumbError> {
            self.values.lock().unwrap().insert(key.to_string(), value);
            Ok(())
        }

        fn begin_deferral(&self) {
            *self.depth.lock().unwrap() += 1;
        }

        fn end_deferral(&self) -> Result<(), PlumbError> {
            *self.depth.lock().unwrap() -= 1;
            *self.ended.lock().unwrap() += 1;
            if self.fail_flush {
                return Err(PlumbError::Internal("flush failed".into()));
            }
            Ok(())
        }
    }

    #[test]
    fn get_returns_default_when_missing() {
        let scope: Arc<dyn ScopedSettings> = Arc::new(Recording::default());
        let value: Vec<String> = scope.get("Missing", vec!["x".into()]).unwrap();
        assert_eq!(value, vec!["x"]);
    }

    #[test]
    fn typed_update_then_get() {
        let scope: Arc<dyn ScopedSettings> = Arc::new(Recording::default());
        scope.update("Count", &5u32).unwrap();
        assert_eq!(scope.get::<u32>("Count", 0).unwrap(), 5);
    }

    #[test]
    fn get_reports_decode_errors() {
        let scope: Arc<dyn ScopedSettings> = Arc::new(Recording::default());
        scope.update("Count", "not a number").unwrap();
        let err = scope.get::<u32>("Count", 0).unwrap_err();
        assert!(err.to_string().contains("Recording.Count"));
    }

    #[test]
    fn guard_ends_deferral_once_on_drop() {
        let recording = Arc::new(Recording::default());
        let scope: Arc<dyn ScopedSettings> = recording.clone();
        {
            let _batch = scope.defer_changes();
            assert_eq!(*recording.depth.lock().unwrap(), 1);
        }
        assert_eq!(*recording.depth.lock().unwrap(), 0);
        assert_eq!(*recording.ended.lock().unwrap(), 1);
    }

    #[test]
    fn commit_reports_flush_error_and_does_not_end_twice() {
        let recording = Arc::new(Recording {
            fail_flush: true,
            ..Default::default()
        });
        let scope: Arc<dyn ScopedSettings> = recording.clone();
        let batch = scope.defer_changes();
        assert!(batch.commit().is_err());
        assert_eq!(*recording.ended.lock().unwrap(), 1);
    }

    #[test]
    #[traced_test]
    fn drop_logs_flush_failure() {
        let scope: Arc<dyn ScopedSettings> = Arc::new(Recording {
            fail_flush: true,
            ..Default::default()
        });
        drop(scope.defer_changes());
        assert!(logs_contain("failed to flush deferred settings"));
    }
}
