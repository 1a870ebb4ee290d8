// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dependency container contract.

use std::any::Any;
use std::sync::Arc;

use crate::error::PlumbError;
use crate::types::{ComponentType, Instance, Lifetime, TypeKey};

/// A dependency-injection container.
///
/// Registration and resolution are both fallible. Errors are surfaced to the
/// caller unchanged; the plugin manager never retries or masks them.
pub trait Container: Send + Sync {
    /// Register `component` with the given lifetime.
    fn register(&self, component: &ComponentType, lifetime: Lifetime) -> Result<(), PlumbError>;

    /// Resolve an instance of a previously registered type.
    fn resolve(&self, key: &TypeKey) -> Result<Instance, PlumbError>;
}

/// Resolve `T` and downcast the instance.
///
/// Intended for factories that depend on other registered components.
pub fn resolve_as<T>(container: &dyn Container) -> Result<Arc<T>, PlumbError>
where
    T: Any + Send + Sync,
{
    let key = TypeKey::of::<T>();
    container
        .resolve(&key)?
        .downcast::<T>()
        .map_err(|_| PlumbError::TypeMismatch {
            type_name: key.name().to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter(u32);

    /// Answers every resolve with the same `Counter`, regardless of the key.
    struct OneInstance(Instance);

    impl Container for OneInstance {
        fn register(&self, _: &ComponentType, _: Lifetime) -> Result<(), PlumbError> {
            Ok(())
        }

        fn resolve(&self, _: &TypeKey) -> Result<Instance, PlumbError> {
            Ok(Arc::clone(&self.0))
        }
    }

    #[test]
    fn resolve_as_downcasts() {
        let container = OneInstance(Arc::new(Counter(3)));
        let counter = resolve_as::<Counter>(&container).unwrap();
        assert_eq!(counter.0, 3);
    }

    #[test]
    fn resolve_as_reports_type_mismatch() {
        let container = OneInstance(Arc::new(Counter(3)));
        let err = resolve_as::<String>(&container).unwrap_err();
        assert!(matches!(err, PlumbError::TypeMismatch { .. }));
    }
}
