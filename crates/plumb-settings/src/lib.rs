// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Settings store backed by a single JSON document.
//!
//! The document maps component names to objects of settings keys:
//!
//! ```json
//! { "PluginManager": { "DisabledPlugins": ["Sounds"] } }
//! ```
//!
//! Writes land in memory first. Outside a deferral they are persisted right
//! away; inside one they mark the store dirty and are written once, when the
//! outermost deferral ends. Persisting replaces the file through a temporary
//! file in the same directory, so readers never see a half-written document.

pub mod scope;

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use plumb_core::{PlumbError, ScopedSettings, SettingsStore};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

pub use scope::JsonScope;

pub(crate) struct StoreState {
    pub(crate) document: Map<String, Value>,
    pub(crate) deferrals: u32,
    pub(crate) dirty: bool,
}

pub(crate) struct StoreInner {
    path: Option<PathBuf>,
    state: Mutex<StoreState>,
}

impl StoreInner {
    /// Every mutation either completes or is rolled back before the lock is
    /// released, so a poisoned lock still guards a consistent document.
    pub(crate) fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("settings store lock poisoned by a panic, recovering");
            poisoned.into_inner()
        })
    }

    /// Write the document out, or leave it dirty while deferred.
    ///
    /// A failed write leaves the store dirty so the next commit retries it.
    pub(crate) fn commit(&self, state: &mut StoreState) -> Result<(), PlumbError> {
        state.dirty = true;
        if state.deferrals > 0 {
            return Ok(());
        }
        self.persist(&state.document)?;
        state.dirty = false;
        Ok(())
    }

    fn persist(&self, document: &Map<String, Value>) -> Result<(), PlumbError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)
            .map_err(|e| PlumbError::settings(format!("cannot create {}", dir.display()), e))?;

        let bytes = serde_json::to_vec_pretty(document)
            .map_err(|e| PlumbError::settings("cannot encode settings document", e))?;

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)
            .map_err(|e| PlumbError::settings(format!("cannot write {}", path.display()), e))?;
        tmp.write_all(&bytes)
            .map_err(|e| PlumbError::settings(format!("cannot write {}", path.display()), e))?;
        tmp.persist(path).map_err(|e| {
            PlumbError::settings(format!("cannot replace {}", path.display()), e.error)
        })?;

        debug!(path = %path.display(), bytes = bytes.len(), "settings persisted");
        Ok(())
    }
}

/// JSON document settings store.
///
/// Cheap to clone; clones share the same document.
#[derive(Clone)]
pub struct JsonSettingsStore {
    inner: Arc<StoreInner>,
}

impl JsonSettingsStore {
    /// Open the store persisted at `path`.
    ///
    /// A missing file is an empty store; the file is created on first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PlumbError> {
        let path = path.into();
        let document = match std::fs::read(&path) {
            Ok(bytes) if bytes.iter().all(u8::is_ascii_whitespace) => Map::new(),
            Ok(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                Ok(Value::Object(map)) => map,
                Ok(_) => {
                    return Err(PlumbError::Settings {
                        message: format!("{} is not a JSON object", path.display()),
                        source: None,
                    });
                }
                Err(e) => {
                    return Err(PlumbError::settings(
                        format!("cannot parse {}", path.display()),
                        e,
                    ));
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Map::new(),
            Err(e) => {
                return Err(PlumbError::settings(format!("cannot read {}", path.display()), e));
            }
        };

        info!(path = %path.display(), components = document.len(), "settings store opened");
        Ok(Self::with_document(Some(path), document))
    }

    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self::with_document(None, Map::new())
    }

    fn with_document(path: Option<PathBuf>, document: Map<String, Value>) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                path,
                state: Mutex::new(StoreState {
                    document,
                    deferrals: 0,
                    dirty: false,
                }),
            }),
        }
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.inner.path.as_deref()
    }

    /// Returns true if writes are waiting for a deferral to end.
    pub fn has_pending_writes(&self) -> bool {
        self.inner.lock().dirty
    }

    /// A copy of the whole in-memory document.
    pub fn snapshot(&self) -> Result<Value, PlumbError> {
        Ok(Value::Object(self.inner.lock().document.clone()))
    }
}

impl SettingsStore for JsonSettingsStore {
    fn component_scope(&self, component: &str) -> Arc<dyn ScopedSettings> {
        Arc::new(JsonScope::new(Arc::clone(&self.inner), component))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonSettingsStore::open(dir.path().join("settings.json")).unwrap();
        assert_eq!(store.snapshot().unwrap(), serde_json::json!({}));
    }

    #[test]
    fn blank_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "  \n").unwrap();
        let store = JsonSettingsStore::open(&path).unwrap();
        assert_eq!(store.snapshot().unwrap(), serde_json::json!({}));
    }

    #[test]
    fn non_object_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "[1, 2]").unwrap();
        let err = JsonSettingsStore::open(&path).err().unwrap();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn malformed_document_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ nope").unwrap();
        let err = JsonSettingsStore::open(&path).err().unwrap();
        assert!(err.to_string().contains("cannot parse"));
    }

    #[test]
    fn in_memory_store_has_no_path() {
        let store = JsonSettingsStore::in_memory();
        assert!(store.path().is_none());
        assert!(!store.has_pending_writes());
    }
}
