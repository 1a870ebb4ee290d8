// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugins bundled with the `plumb` host.
//!
//! Three built-in plugins (Timer, Notifications, Statistics) and two custom
//! ones (Dashboard, Webhook). Settings objects load their values from the
//! settings store under the plugin's title, key [`SETTINGS_KEY`].

use std::any::Any;
use std::sync::Arc;

use plumb_core::{ComponentType, Instance, PlumbError, SettingsStore, resolve_as};
use plumb_plugin::PluginDescriptor;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Key each plugin's settings object is stored under.
pub const SETTINGS_KEY: &str = "Settings";

#[derive(Debug, Default)]
pub struct Timer;

#[derive(Debug)]
pub struct Notifier {
    pub settings: Arc<NotificationSettings>,
}

#[derive(Debug)]
pub struct Statistics {
    pub settings: Arc<StatisticsSettings>,
}

#[derive(Debug, Default)]
pub struct Dashboard;

#[derive(Debug)]
pub struct Webhook {
    pub settings: Arc<WebhookSettings>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationSettings {
    pub sound: bool,
    pub volume: u8,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            sound: true,
            volume: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatisticsSettings {
    pub retention_days: u32,
}

impl Default for StatisticsSettings {
    fn default() -> Self {
        Self { retention_days: 30 }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebhookSettings {
    pub url: Option<String>,
}

#[derive(Debug)]
pub struct NotificationEditor {
    pub settings: Arc<NotificationSettings>,
}

#[derive(Debug)]
pub struct StatisticsEditor {
    pub settings: Arc<StatisticsSettings>,
}

#[derive(Debug)]
pub struct WebhookEditor {
    pub settings: Arc<WebhookSettings>,
}

/// The bundled catalog, with settings objects backed by `store`.
pub fn host_catalog(store: Arc<dyn SettingsStore>) -> Vec<PluginDescriptor> {
    vec![
        PluginDescriptor::new("Timer")
            .with_behavior(ComponentType::from_default::<Timer>())
            .built_in(1),
        PluginDescriptor::new("Notifications")
            .with_behavior(ComponentType::new(|c| {
                Ok(Notifier {
                    settings: resolve_as(c)?,
                })
            }))
            .with_settings(stored_settings::<NotificationSettings>(&store, "Notifications"))
            .with_editor(ComponentType::new(|c| {
                Ok(NotificationEditor {
                    settings: resolve_as(c)?,
                })
            }))
            .built_in(2),
        PluginDescriptor::new("Statistics")
            .with_behavior(ComponentType::new(|c| {
                Ok(Statistics {
                    settings: resolve_as(c)?,
                })
            }))
            .with_settings(stored_settings::<StatisticsSettings>(&store, "Statistics"))
            .with_editor(ComponentType::new(|c| {
                Ok(StatisticsEditor {
                    settings: resolve_as(c)?,
                })
            }))
            .built_in(3),
        PluginDescriptor::new("Dashboard")
            .with_behavior(ComponentType::from_default::<Dashboard>()),
        PluginDescriptor::new("Webhook")
            .with_behavior(ComponentType::new(|c| {
                Ok(Webhook {
                    settings: resolve_as(c)?,
                })
            }))
            .with_settings(stored_settings::<WebhookSettings>(&store, "Webhook"))
            .with_editor(ComponentType::new(|c| {
                Ok(WebhookEditor {
                    settings: resolve_as(c)?,
                })
            })),
    ]
}

/// A settings component read from `store` every time it is built.
fn stored_settings<T>(store: &Arc<dyn SettingsStore>, component: &'static str) -> ComponentType
where
    T: Any + Default + DeserializeOwned + Send + Sync,
{
    let store = Arc::clone(store);
    ComponentType::new(move |_| -> Result<T, PlumbError> {
        store
            .component_scope(component)
            .get(SETTINGS_KEY, T::default())
    })
}

/// One-line rendering of a resolved settings editor.
pub fn describe_editor(editor: &Instance) -> Option<String> {
    if let Some(e) = editor.downcast_ref::<NotificationEditor>() {
        return Some(format!(
            "sound: {}, volume: {}",
            e.settings.sound, e.settings.volume
        ));
    }
    if let Some(e) = editor.downcast_ref::<StatisticsEditor>() {
        return Some(format!("retention: {} days", e.settings.retention_days));
    }
    if let Some(e) = editor.downcast_ref::<WebhookEditor>() {
        return Some(format!(
            "url: {}",
            e.settings.url.as_deref().unwrap_or("<not set>")
        ));
    }
    None
}
