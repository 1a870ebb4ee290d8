// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Component types and catalogs shared by integration tests.
//!
//! [`scenario_catalog`] is the reference three-plugin catalog:
//!
//! | title | behavior | settings | editor | classification |
//! |---|---|---|---|---|
//! | A | `AlphaBehavior` | `AlphaSettings` | `AlphaEditor` | built-in, order 2 |
//! | B | `BetaBehavior` | - | - | built-in, order 1 |
//! | C | `GammaBehavior` | `GammaSettings` | - | custom |

use std::sync::Arc;

use plumb_core::{ComponentType, resolve_as};
use plumb_plugin::PluginDescriptor;

#[derive(Debug, Default)]
pub struct AlphaBehavior;

#[derive(Debug, Default)]
pub struct AlphaSettings {
    pub volume: u8,
}

/// Editor that needs the plugin's settings object to be resolvable.
#[derive(Debug)]
pub struct AlphaEditor {
    pub settings: Arc<AlphaSettings>,
}

#[derive(Debug, Default)]
pub struct BetaBehavior;

/// Behavior that needs its settings object to be resolvable at construction.
#[derive(Debug)]
pub struct GammaBehavior {
    pub settings: Arc<GammaSettings>,
}

#[derive(Debug, Default)]
pub struct GammaSettings;

pub fn alpha() -> PluginDescriptor {
    PluginDescriptor::new("A")
        .with_behavior(ComponentType::from_default::<AlphaBehavior>())
        .with_settings(ComponentType::from_default::<AlphaSettings>())
        .with_editor(ComponentType::new(|c| {
            Ok(AlphaEditor {
                settings: resolve_as::<AlphaSettings>(c)?,
            })
        }))
        .built_in(2)
}

pub fn beta() -> PluginDescriptor {
    PluginDescriptor::new("B")
        .with_behavior(ComponentType::from_default::<BetaBehavior>())
        .built_in(1)
}

pub fn gamma() -> PluginDescriptor {
    PluginDescriptor::new("C")
        .with_behavior(ComponentType::new(|c| {
            Ok(GammaBehavior {
                settings: resolve_as::<GammaSettings>(c)?,
            })
        }))
        .with_settings(ComponentType::from_default::<GammaSettings>())
}

/// A (built-in 2), B (built-in 1), C (custom), in that catalog order.
pub fn scenario_catalog() -> Vec<PluginDescriptor> {
    vec![alpha(), beta(), gamma()]
}

/// Descriptors with no components, classified as given.
///
/// `None` makes a custom plugin, `Some(order)` a built-in one.
pub fn bare_catalog(entries: &[(&str, Option<i32>)]) -> Vec<PluginDescriptor> {
    entries
        .iter()
        .map(|(title, order)| match order {
            Some(order) => PluginDescriptor::new(*title).built_in(*order),
            None => PluginDescriptor::new(*title),
        })
        .collect()
}
