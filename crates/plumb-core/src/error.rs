// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Plumb plugin layer.

use thiserror::Error;

/// The primary error type shared by the plugin manager and its collaborators.
#[derive(Debug, Error)]
pub enum PlumbError {
    /// Configuration errors (invalid catalog, bad settings values, bad config files).
    #[error("configuration error: {0}")]
    Config(String),

    /// Two descriptors in one catalog share a title.
    #[error("duplicate plugin title `{title}` in catalog")]
    DuplicateTitle { title: String },

    /// A component type was registered twice with the same container.
    #[error("component type already registered: {type_name}")]
    AlreadyRegistered { type_name: String },

    /// A component type was resolved without being registered first.
    #[error("component type not registered: {type_name}")]
    NotRegistered { type_name: String },

    /// Constructing a component type required itself.
    #[error("resolution cycle detected: {}", chain.join(" -> "))]
    ResolutionCycle { chain: Vec<String> },

    /// A resolved instance did not have the requested concrete type.
    #[error("resolved instance is not of type {type_name}")]
    TypeMismatch { type_name: String },

    /// A component factory failed while constructing an instance.
    #[error("factory for {type_name} failed: {source}")]
    Factory {
        type_name: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Settings store errors (read, write, or value conversion failures).
    #[error("settings error: {message}")]
    Settings {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl PlumbError {
    /// Shorthand for a settings error wrapping an underlying cause.
    pub fn settings(
        message: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        PlumbError::Settings {
            message: message.into(),
            source: Some(source.into()),
        }
    }
}
