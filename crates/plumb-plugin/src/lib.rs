// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin activation and wiring.
//!
//! A host describes its plugins with [`PluginDescriptor`]s and hands the
//! catalog to a [`PluginManager`]. The manager filters out disabled plugins,
//! splits the rest into built-in and custom groups, and registers every
//! plugin's component types with the host's container exactly once.

pub mod descriptor;
pub mod manager;
pub mod settings;

pub use descriptor::{Classification, PluginDescriptor};
pub use manager::{PluginManager, ResolvedPlugin};
pub use settings::PluginManagerSettings;
