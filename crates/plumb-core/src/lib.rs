// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Plumb plugin layer.
//!
//! This crate provides the error type, the component type references that
//! plugin descriptors carry, and the collaborator traits (dependency container
//! and settings store) the plugin manager is written against.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::PlumbError;
pub use types::{ComponentType, Factory, Instance, Lifetime, TypeKey};

pub use traits::{Container, DeferredChanges, ScopedSettings, SettingsStore, resolve_as};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_collaborator_traits_are_exported() {
        // Fails to compile if a trait is missing from the public API or loses
        // object safety.
        fn _assert_container(_: &dyn Container) {}
        fn _assert_store(_: &dyn SettingsStore) {}
        fn _assert_scope(_: &dyn ScopedSettings) {}
    }
}
