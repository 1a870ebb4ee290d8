// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator traits the plugin manager depends on.
//!
//! The manager never owns a concrete container or settings store. Hosts pass
//! implementations of these traits, and tests substitute in-memory fakes.

pub mod container;
pub mod settings;

pub use container::{Container, resolve_as};
pub use settings::{DeferredChanges, ScopedSettings, SettingsStore};
