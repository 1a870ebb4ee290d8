// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./plumb.toml` > `~/.config/plumb/plumb.toml` > `/etc/plumb/plumb.toml`
//! with environment variable overrides via `PLUMB_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::PlumbConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/plumb/plumb.toml` (system-wide)
/// 3. `~/.config/plumb/plumb.toml` (user XDG config)
/// 4. `./plumb.toml` (local directory)
/// 5. `PLUMB_*` environment variables
pub fn load_config() -> Result<PlumbConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<PlumbConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlumbConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<PlumbConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(PlumbConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// The Figment behind [`load_config`], before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(PlumbConfig::default()))
        .merge(Toml::file("/etc/plumb/plumb.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("plumb/plumb.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("plumb.toml"))
        .merge(env_provider())
}

/// Environment provider mapping `PLUMB_<SECTION>_<KEY>` to `section.key`.
///
/// Uses `Env::map()` rather than `Env::split("_")`: only the first underscore
/// separates section from key. The key reaches the map with its original case.
fn env_provider() -> Env {
    Env::prefixed("PLUMB_").map(|key| {
        let mapped = key
            .as_str()
            .to_ascii_lowercase()
            .replacen("log_", "log.", 1)
            .replacen("settings_", "settings.", 1);
        mapped.into()
    })
}
