// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-process dependency container.
//!
//! [`TypeMapContainer`] stores one registration per [`TypeKey`]. Singletons are
//! built on first resolve and cached; transients are built on every resolve.
//! Factories receive a resolution context that tracks the chain of types under
//! construction, so a type that (indirectly) requires itself fails with
//! [`PlumbError::ResolutionCycle`] instead of recursing forever.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use plumb_core::{ComponentType, Container, Instance, Lifetime, PlumbError, TypeKey};
use tracing::debug;

struct Registration {
    component: ComponentType,
    lifetime: Lifetime,
}

/// Dependency container keyed by component type.
#[derive(Default)]
pub struct TypeMapContainer {
    registrations: Mutex<HashMap<TypeKey, Registration>>,
    singletons: Mutex<HashMap<TypeKey, Instance>>,
}

impl TypeMapContainer {
    /// Create an empty container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if `key` has been registered.
    pub fn is_registered(&self, key: &TypeKey) -> bool {
        lock(&self.registrations)
            .map(|regs| regs.contains_key(key))
            .unwrap_or(false)
    }

    /// The lifetime `key` was registered with.
    pub fn lifetime_of(&self, key: &TypeKey) -> Option<Lifetime> {
        lock(&self.registrations)
            .ok()
            .and_then(|regs| regs.get(key).map(|r| r.lifetime))
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        lock(&self.registrations).map(|regs| regs.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Build or fetch `key`, running factories against `ctx`.
    fn resolve_in(&self, key: &TypeKey, ctx: &dyn Container) -> Result<Instance, PlumbError> {
        let (component, lifetime) = {
            let regs = lock(&self.registrations)?;
            let registration = regs.get(key).ok_or_else(|| PlumbError::NotRegistered {
                type_name: key.name().to_string(),
            })?;
            (registration.component.clone(), registration.lifetime)
        };

        match lifetime {
            Lifetime::Transient => component.construct(ctx),
            Lifetime::Singleton => {
                if let Some(existing) = lock(&self.singletons)?.get(key) {
                    return Ok(Arc::clone(existing));
                }
                // Built without holding the lock so the factory can resolve
                // other singletons. A concurrent builder may get there first;
                // its instance wins.
                let built = component.construct(ctx)?;
                let mut singletons = lock(&self.singletons)?;
                let instance = singletons.entry(*key).or_insert_with(|| {
                    debug!(component = %key, "singleton created");
                    built
                });
                Ok(Arc::clone(instance))
            }
        }
    }
}

impl Container for TypeMapContainer {
    fn register(&self, component: &ComponentType, lifetime: Lifetime) -> Result<(), PlumbError> {
        let mut regs = lock(&self.registrations)?;
        let key = component.key();
        if regs.contains_key(&key) {
            return Err(PlumbError::AlreadyRegistered {
                type_name: key.name().to_string(),
            });
        }
        regs.insert(
            key,
            Registration {
                component: component.clone(),
                lifetime,
            },
        );
        debug!(component = %key, %lifetime, "component registered");
        Ok(())
    }

    fn resolve(&self, key: &TypeKey) -> Result<Instance, PlumbError> {
        Resolution {
            container: self,
            chain: Mutex::new(Vec::new()),
        }
        .resolve(key)
    }
}

/// One top-level resolve call and everything its factories pull in.
struct Resolution<'a> {
    container: &'a TypeMapContainer,
    chain: Mutex<Vec<TypeKey>>,
}

impl Container for Resolution<'_> {
    fn register(&self, component: &ComponentType, lifetime: Lifetime) -> Result<(), PlumbError> {
        self.container.register(component, lifetime)
    }

    fn resolve(&self, key: &TypeKey) -> Result<Instance, PlumbError> {
        {
            let mut chain = lock(&self.chain)?;
            if chain.contains(key) {
                let mut names: Vec<String> =
                    chain.iter().map(|k| k.name().to_string()).collect();
                names.push(key.name().to_string());
                return Err(PlumbError::ResolutionCycle { chain: names });
            }
            chain.push(*key);
        }

        let result = self.container.resolve_in(key, self);
        lock(&self.chain)?.pop();
        result
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, PlumbError> {
    mutex
        .lock()
        .map_err(|_| PlumbError::Internal("container lock poisoned".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use plumb_core::resolve_as;

    #[derive(Default)]
    struct Clock;

    struct Alarm {
        clock: Arc<Clock>,
    }

    struct Ping;
    struct Pong;

    fn ping_pong(container: &TypeMapContainer) {
        container
            .register(
                &ComponentType::new(|c| resolve_as::<Pong>(c).map(|_| Ping)),
                Lifetime::Transient,
            )
            .unwrap();
        container
            .register(
                &ComponentType::new(|c| resolve_as::<Ping>(c).map(|_| Pong)),
                Lifetime::Transient,
            )
            .unwrap();
    }

    #[test]
    fn singleton_resolves_to_same_instance() {
        let container = TypeMapContainer::new();
        container
            .register(&ComponentType::from_default::<Clock>(), Lifetime::Singleton)
            .unwrap();

        let a = container.resolve(&TypeKey::of::<Clock>()).unwrap();
        let b = container.resolve(&TypeKey::of::<Clock>()).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn transient_resolves_to_fresh_instances() {
        let container = TypeMapContainer::new();
        container
            .register(&ComponentType::from_default::<Clock>(), Lifetime::Transient)
            .unwrap();

        let a = resolve_as::<Clock>(&container).unwrap();
        let b = resolve_as::<Clock>(&container).unwrap();
        assert!(!Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn factories_resolve_their_dependencies() {
        let container = TypeMapContainer::new();
        container
            .register(&ComponentType::from_default::<Clock>(), Lifetime::Singleton)
            .unwrap();
        container
            .register(
                &ComponentType::new(|c| Ok(Alarm { clock: resolve_as::<Clock>(c)? })),
                Lifetime::Transient,
            )
            .unwrap();

        let alarm = resolve_as::<Alarm>(&container).unwrap();
        let clock = resolve_as::<Clock>(&container).unwrap();
        assert!(Arc::ptr_eq(&alarm.clock, &clock));
    }

    #[test]
    fn unregistered_type_fails() {
        let container = TypeMapContainer::new();
        let err = container.resolve(&TypeKey::of::<Clock>()).unwrap_err();
        assert!(matches!(err, PlumbError::NotRegistered { .. }));
    }

    #[test]
    fn missing_dependency_surfaces_inner_error() {
        let container = TypeMapContainer::new();
        container
            .register(
                &ComponentType::new(|c| Ok(Alarm { clock: resolve_as::<Clock>(c)? })),
                Lifetime::Transient,
            )
            .unwrap();

        match container.resolve(&TypeKey::of::<Alarm>()).unwrap_err() {
            PlumbError::NotRegistered { type_name } => assert!(type_name.ends_with("Clock")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn double_registration_fails() {
        let container = TypeMapContainer::new();
        container
            .register(&ComponentType::from_default::<Clock>(), Lifetime::Singleton)
            .unwrap();
        let err = container
            .register(&ComponentType::from_default::<Clock>(), Lifetime::Transient)
            .unwrap_err();
        assert!(matches!(err, PlumbError::AlreadyRegistered { .. }));
        assert_eq!(container.lifetime_of(&TypeKey::of::<Clock>()), Some(Lifetime::Singleton));
    }

    #[test]
    fn cycles_are_detected() {
        let container = TypeMapContainer::new();
        ping_pong(&container);

        match container.resolve(&TypeKey::of::<Ping>()).unwrap_err() {
            PlumbError::ResolutionCycle { chain } => {
                assert_eq!(chain.len(), 3);
                assert!(chain[0].ends_with("Ping"));
                assert!(chain[1].ends_with("Pong"));
                assert!(chain[2].ends_with("Ping"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn factory_errors_propagate_unchanged() {
        let container = TypeMapContainer::new();
        container
            .register(
                &ComponentType::new::<Clock, _>(|_| Err(PlumbError::Config("no clock".into()))),
                Lifetime::Singleton,
            )
            .unwrap();

        let err = container.resolve(&TypeKey::of::<Clock>()).unwrap_err();
        assert!(matches!(err, PlumbError::Config(ref m) if m == "no clock"));
    }

    #[test]
    fn introspection_tracks_registrations() {
        let container = TypeMapContainer::new();
        assert!(container.is_empty());
        container
            .register(&ComponentType::from_default::<Clock>(), Lifetime::Transient)
            .unwrap();
        assert_eq!(container.len(), 1);
        assert!(container.is_registered(&TypeKey::of::<Clock>()));
        assert!(!container.is_registered(&TypeKey::of::<Alarm>()));
    }
}
