// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Plumb hosts.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is an
//! error at startup rather than a silently ignored setting.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PlumbConfig {
    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,

    /// Where plugin preferences are persisted.
    #[serde(default)]
    pub settings: SettingsConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Level for the `plumb` crates (trace, debug, info, warn, error).
    /// `RUST_LOG`, when set, takes precedence.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Settings store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsConfig {
    /// Path of the JSON settings document.
    #[serde(default = "default_settings_path")]
    pub path: String,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            path: default_settings_path(),
        }
    }
}

fn default_settings_path() -> String {
    dirs::config_dir()
        .map(|d| d.join("plumb/settings.json").display().to_string())
        .unwrap_or_else(|| "settings.json".to_string())
}
