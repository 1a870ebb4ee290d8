// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recording container for deterministic tests.
//!
//! `FakeContainer` implements `Container` with a plain map of registrations,
//! keeps a log of every `register` and `resolve` call in order, and can be
//! primed to fail either call for specific types.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use plumb_core::{ComponentType, Container, Instance, Lifetime, PlumbError, TypeKey};

/// One call made against a [`FakeContainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContainerCall {
    Register { key: TypeKey, lifetime: Lifetime },
    Resolve { key: TypeKey },
}

#[derive(Default)]
struct Inner {
    registrations: HashMap<TypeKey, (ComponentType, Lifetime)>,
    singletons: HashMap<TypeKey, Instance>,
    calls: Vec<ContainerCall>,
    fail_register: HashSet<TypeKey>,
    fail_resolve: HashSet<TypeKey>,
}

/// A container that remembers how it was used.
///
/// Registering a key twice is allowed and recorded, so tests can assert that
/// the code under test never does it.
#[derive(Default)]
pub struct FakeContainer {
    inner: Mutex<Inner>,
}

impl FakeContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty container already wrapped for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Make every `register` call for `key` fail.
    pub fn fail_register_of(&self, key: TypeKey) {
        self.inner.lock().unwrap().fail_register.insert(key);
    }

    /// Make every `resolve` call for `key` fail.
    pub fn fail_resolve_of(&self, key: TypeKey) {
        self.inner.lock().unwrap().fail_resolve.insert(key);
    }

    /// Stop failing calls for `key`.
    pub fn heal(&self, key: &TypeKey) {
        let mut inner = self.inner.lock().unwrap();
        inner.fail_register.remove(key);
        inner.fail_resolve.remove(key);
    }

    /// All calls, in the order they were made.
    pub fn calls(&self) -> Vec<ContainerCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Forget the recorded calls, keeping registrations.
    pub fn clear_calls(&self) {
        self.inner.lock().unwrap().calls.clear();
    }

    /// Number of `register` calls made for `key`, failed ones included.
    pub fn register_count(&self, key: &TypeKey) -> usize {
        self.count(|call| matches!(call, ContainerCall::Register { key: k, .. } if k == key))
    }

    /// Number of `resolve` calls made for `key`, failed ones included.
    pub fn resolve_count(&self, key: &TypeKey) -> usize {
        self.count(|call| matches!(call, ContainerCall::Resolve { key: k } if k == key))
    }

    /// Returns true if `key` was registered successfully.
    pub fn is_registered(&self, key: &TypeKey) -> bool {
        self.inner.lock().unwrap().registrations.contains_key(key)
    }

    /// The lifetime of the most recent successful registration of `key`.
    pub fn lifetime_of(&self, key: &TypeKey) -> Option<Lifetime> {
        self.inner
            .lock()
            .unwrap()
            .registrations
            .get(key)
            .map(|(_, lifetime)| *lifetime)
    }

    fn count(&self, predicate: impl Fn(&ContainerCall) -> bool) -> usize {
        self.inner
            .lock()
            .unwrap()
            .calls
            .iter()
            .filter(|call| predicate(call))
            .count()
    }
}

impl Container for FakeContainer {
    fn register(&self, component: &ComponentType, lifetime: Lifetime) -> Result<(), PlumbError> {
        let key = component.key();
        let mut inner = self.inner.lock().unwrap();
        inner.calls.push(ContainerCall::Register { key, lifetime });
        if inner.fail_register.contains(&key) {
            return Err(PlumbError::Internal(format!("injected register failure for {key}")));
        }
        inner.registrations.insert(key, (component.clone(), lifetime));
        tracing::trace!(component = %key, %lifetime, "fake container registered");
        Ok(())
    }

    fn resolve(&self, key: &TypeKey) -> Result<Instance, PlumbError> {
        let (component, lifetime) = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(ContainerCall::Resolve { key: *key });
            if inner.fail_resolve.contains(key) {
                return Err(PlumbError::Internal(format!("injected resolve failure for {key}")));
            }
            if let Some(existing) = inner.singletons.get(key) {
                return Ok(Arc::clone(existing));
            }
            inner
                .registrations
                .get(key)
                .cloned()
                .ok_or_else(|| PlumbError::NotRegistered {
                    type_name: key.name().to_string(),
                })?
        };

        // The lock is released so the factory can resolve its dependencies.
        let instance = component.construct(self)?;
        if lifetime == Lifetime::Singleton {
            let mut inner = self.inner.lock().unwrap();
            let stored = inner
                .singletons
                .entry(*key)
                .or_insert_with(|| Arc::clone(&instance));
            return Ok(Arc::clone(stored));
        }
        Ok(instance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Widget;

    #[test]
    fn records_calls_in_order() {
        let container = FakeContainer::new();
        let key = TypeKey::of::<Widget>();
        container
            .register(&ComponentType::from_default::<Widget>(), Lifetime::Singleton)
            .unwrap();
        container.resolve(&key).unwrap();

        assert_eq!(
            container.calls(),
            vec![
                ContainerCall::Register {
                    key,
                    lifetime: Lifetime::Singleton
                },
                ContainerCall::Resolve { key },
            ]
        );
    }

    #[test]
    fn singleton_is_cached() {
        let container = FakeContainer::new();
        let key = TypeKey::of::<Widget>();
        container
            .register(&ComponentType::from_default::<Widget>(), Lifetime::Singleton)
            .unwrap();
        let a = container.resolve(&key).unwrap();
        let b = container.resolve(&key).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn injected_failures_are_recorded_and_healable() {
        let container = FakeContainer::new();
        let key = TypeKey::of::<Widget>();
        container.fail_register_of(key);

        assert!(
            container
                .register(&ComponentType::from_default::<Widget>(), Lifetime::Transient)
                .is_err()
        );
        assert!(!container.is_registered(&key));
        assert_eq!(container.register_count(&key), 1);

        container.heal(&key);
        container
            .register(&ComponentType::from_default::<Widget>(), Lifetime::Transient)
            .unwrap();
        assert_eq!(container.lifetime_of(&key), Some(Lifetime::Transient));
    }

    #[test]
    fn unregistered_resolve_fails() {
        let container = FakeContainer::new();
        let key = TypeKey::of::<Widget>();
        assert!(matches!(
            container.resolve(&key),
            Err(PlumbError::NotRegistered { .. })
        ));
        assert_eq!(container.resolve_count(&key), 1);
    }
}
