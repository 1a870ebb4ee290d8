// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! CLI command implementations. Each returns the text to print.

use std::fmt::Write;

use plumb_core::PlumbError;
use plumb_plugin::PluginDescriptor;

use crate::catalog::describe_editor;
use crate::host::Host;

/// Which plugins `list` shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListFilter {
    #[default]
    Active,
    BuiltIn,
    Custom,
    All,
}

pub fn list(host: &Host, filter: ListFilter) -> String {
    let manager = &host.manager;
    let plugins: Vec<&PluginDescriptor> = match filter {
        ListFilter::Active => manager.active_plugins().collect(),
        ListFilter::BuiltIn => manager.built_in_plugins(),
        ListFilter::Custom => manager.custom_plugins().collect(),
        ListFilter::All => manager.plugins().iter().collect(),
    };

    let width = plugins.iter().map(|d| d.title().len()).max().unwrap_or(0);
    let mut out = String::new();
    for d in plugins {
        let state = if manager.is_active(d) { "active" } else { "disabled" };
        let _ = writeln!(
            out,
            "{:<width$}  {:<12}  {state}",
            d.title(),
            d.classification().to_string()
        );
    }
    out
}

/// Add `title` to the persisted disabled list.
pub fn disable(host: &Host, title: &str) -> Result<String, PlumbError> {
    set_enabled(host, title, false)
}

/// Remove `title` from the persisted disabled list.
pub fn enable(host: &Host, title: &str) -> Result<String, PlumbError> {
    set_enabled(host, title, true)
}

fn set_enabled(host: &Host, title: &str, enabled: bool) -> Result<String, PlumbError> {
    known(host, title)?;

    let batch = host.settings.defer_changes();
    let mut disabled = host.settings.disabled_plugins()?;
    let changed = if enabled {
        disabled.remove(title)
    } else {
        disabled.insert(title.to_string())
    };
    if changed {
        host.settings.set_disabled_plugins(disabled)?;
    }
    batch.commit()?;

    let verb = if enabled { "enabled" } else { "disabled" };
    Ok(if changed {
        format!("{title} {verb}; takes effect on next start\n")
    } else {
        format!("{title} is already {verb}\n")
    })
}

/// Initialize plugins and list what was resolved.
pub fn init(host: &Host) -> Result<String, PlumbError> {
    host.manager.init_plugins()?;
    let mut out = String::new();
    for plugin in host.manager.resolved_plugins() {
        let _ = writeln!(out, "resolved {}", plugin.title);
    }
    Ok(out)
}

/// Open the settings editor of `title`.
pub fn editor(host: &Host, title: &str) -> Result<String, PlumbError> {
    let descriptor = known(host, title)?;
    // Editors depend on settings objects, which are registered by init.
    host.manager.init_plugins()?;

    Ok(match host.manager.resolve_setting_editor(descriptor)? {
        Some(editor) => {
            let body = describe_editor(&editor)
                .unwrap_or_else(|| "<no preview>".to_string());
            format!("{title} settings: {body}\n")
        }
        None => format!("{title} has no settings editor\n"),
    })
}

fn known<'a>(host: &'a Host, title: &str) -> Result<&'a PluginDescriptor, PlumbError> {
    host.manager
        .plugin(title)
        .ok_or_else(|| PlumbError::Config(format!("unknown plugin `{title}`")))
}
