// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component type references handed to a [`Container`].
//!
//! A plugin descriptor does not hold instances. It holds [`ComponentType`]s:
//! a type identity plus a factory the container calls when an instance is
//! needed. Instances are type-erased as [`Instance`] and downcast by the host.

use std::any::{Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use strum::{Display, EnumString};

use crate::error::PlumbError;
use crate::traits::container::Container;

/// A resolved, type-erased component instance.
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Factory that builds an instance, resolving its own dependencies from the
/// container it is given.
pub type Factory = Arc<dyn Fn(&dyn Container) -> Result<Instance, PlumbError> + Send + Sync>;

/// Identity of a component type.
///
/// Equality and hashing use the [`TypeId`] only; the name is kept for
/// log lines and error messages.
#[derive(Debug, Clone, Copy)]
pub struct TypeKey {
    id: TypeId,
    name: &'static str,
}

impl TypeKey {
    /// The key for `T`.
    pub fn of<T: Any>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            name: std::any::type_name::<T>(),
        }
    }

    pub fn id(&self) -> TypeId {
        self.id
    }

    /// Fully qualified type name.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl PartialEq for TypeKey {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TypeKey {}

impl Hash for TypeKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

/// How long a registered component lives inside the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Lifetime {
    /// One instance, created on first resolve and shared afterwards.
    Singleton,
    /// A fresh instance on every resolve.
    Transient,
}

/// A registrable component type: its identity plus the factory that builds it.
#[derive(Clone)]
pub struct ComponentType {
    key: TypeKey,
    factory: Factory,
}

impl ComponentType {
    /// Describe `T`, built by `factory`.
    ///
    /// The factory receives the container so it can resolve the components
    /// `T` depends on.
    pub fn new<T, F>(factory: F) -> Self
    where
        T: Any + Send + Sync,
        F: Fn(&dyn Container) -> Result<T, PlumbError> + Send + Sync + 'static,
    {
        Self {
            key: TypeKey::of::<T>(),
            factory: Arc::new(move |container: &dyn Container| {
                factory(container).map(|value| Arc::new(value) as Instance)
            }),
        }
    }

    /// Describe `T`, built with `T::default()`.
    pub fn from_default<T>() -> Self
    where
        T: Any + Default + Send + Sync,
    {
        Self::new(|_| Ok(T::default()))
    }

    pub fn key(&self) -> TypeKey {
        self.key
    }

    /// Fully qualified name of the described type.
    pub fn name(&self) -> &'static str {
        self.key.name()
    }

    /// Run the factory against `container`.
    pub fn construct(&self, container: &dyn Container) -> Result<Instance, PlumbError> {
        (self.factory)(container)
    }
}

impl fmt::Debug for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentType")
            .field("key", &self.key.name())
            .finish_non_exhaustive()
    }
}
