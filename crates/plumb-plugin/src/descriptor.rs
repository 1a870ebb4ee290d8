// SPDX-FileCopyrightText: 2026 Plumb Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plugin descriptors.
//!
//! A descriptor names a plugin and lists the component types it contributes.
//! Whether the plugin ships with the host (built-in, with a position) or not
//! (custom) is declared here, when the catalog is built.

use std::fmt;

use plumb_core::ComponentType;

/// Whether a plugin is part of the host's default feature set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Classification {
    /// Shipped with the host. Built-in plugins are listed by ascending `order`.
    BuiltIn { order: i32 },
    /// Anything else.
    Custom,
}

impl Classification {
    /// Ordering key, for built-in plugins only.
    pub fn order(&self) -> Option<i32> {
        match self {
            Classification::BuiltIn { order } => Some(*order),
            Classification::Custom => None,
        }
    }

    pub fn is_built_in(&self) -> bool {
        matches!(self, Classification::BuiltIn { .. })
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::BuiltIn { order } => write!(f, "built-in({order})"),
            Classification::Custom => write!(f, "custom"),
        }
    }
}

/// Metadata describing one plugin.
///
/// Descriptors are immutable once built. The title is the plugin's key: it is
/// what the disabled list stores and must be unique within a catalog.
#[derive(Debug, Clone)]
pub struct PluginDescriptor {
    title: String,
    behavior: Option<ComponentType>,
    settings: Option<ComponentType>,
    editor: Option<ComponentType>,
    classification: Classification,
}

impl PluginDescriptor {
    /// A custom plugin with no components.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            behavior: None,
            settings: None,
            editor: None,
            classification: Classification::Custom,
        }
    }

    /// Set the runtime implementation of the plugin.
    pub fn with_behavior(mut self, behavior: ComponentType) -> Self {
        self.behavior = Some(behavior);
        self
    }

    /// Set the settings object the plugin persists its preferences through.
    pub fn with_settings(mut self, settings: ComponentType) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set the settings-editor surface for the plugin.
    pub fn with_editor(mut self, editor: ComponentType) -> Self {
        self.editor = Some(editor);
        self
    }

    /// Mark the plugin as built-in at position `order`.
    pub fn built_in(mut self, order: i32) -> Self {
        self.classification = Classification::BuiltIn { order };
        self
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn behavior(&self) -> Option<&ComponentType> {
        self.behavior.as_ref()
    }

    pub fn settings(&self) -> Option<&ComponentType> {
        self.settings.as_ref()
    }

    pub fn editor(&self) -> Option<&ComponentType> {
        self.editor.as_ref()
    }

    pub fn classification(&self) -> Classification {
        self.classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plumb_core::TypeKey;

    #[derive(Default)]
    struct Ticker;

    #[derive(Default)]
    struct TickerSettings;

    #[test]
    fn new_descriptor_is_custom_and_empty() {
        let d = PluginDescriptor::new("Ticker");
        assert_eq!(d.title(), "Ticker");
        assert_eq!(d.classification(), Classification::Custom);
        assert!(d.behavior().is_none());
        assert!(d.settings().is_none());
        assert!(d.editor().is_none());
    }

    #[test]
    fn builder_sets_components_and_classification() {
        let d = PluginDescriptor::new("Ticker")
            .with_behavior(ComponentType::from_default::<Ticker>())
            .with_settings(ComponentType::from_default::<TickerSettings>())
            .built_in(3);

        assert_eq!(d.behavior().map(|c| c.key()), Some(TypeKey::of::<Ticker>()));
        assert_eq!(
            d.settings().map(|c| c.key()),
            Some(TypeKey::of::<TickerSettings>())
        );
        assert_eq!(d.classification(), Classification::BuiltIn { order: 3 });
    }

    #[test]
    fn classification_order_and_display() {
        let built_in = Classification::BuiltIn { order: -1 };
        assert_eq!(built_in.order(), Some(-1));
        assert!(built_in.is_built_in());
        assert_eq!(built_in.to_string(), "built-in(-1)");

        assert_eq!(Classification::Custom.order(), None);
        assert!(!Classification::Custom.is_built_in());
        assert_eq!(Classification::Custom.to_string(), "custom");
    }

    #[test]
    fn classification_can_be_reset_to_custom() {
        let d = PluginDescriptor::new("Ticker")
            .built_in(1)
            .with_classification(Classification::Custom);
        assert_eq!(d.classification(), Classification::Custom);
    }
}
