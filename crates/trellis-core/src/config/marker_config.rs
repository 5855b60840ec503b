//! Marker configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_COMPONENT_MARKER, DEFAULT_CONFIGURATION_MARKER, DEFAULT_TAG_KEY};

/// Which embedded types mark a declaration, and where directives live.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MarkerConfig {
    /// Fully-qualified component marker types. Default: the Trellis `Component` marker.
    #[serde(default)]
    pub component: Vec<String>,
    /// Fully-qualified configuration marker types. Default: the Trellis `Configuration` marker.
    #[serde(default)]
    pub configuration: Vec<String>,
    /// Struct-tag key carrying directives. Default: "trellis".
    pub tag_key: Option<String>,
}

impl MarkerConfig {
    /// Returns the effective component markers.
    pub fn effective_component_markers(&self) -> Vec<String> {
        if self.component.is_empty() {
            vec![DEFAULT_COMPONENT_MARKER.to_string()]
        } else {
            self.component.clone()
        }
    }

    /// Returns the effective configuration markers.
    pub fn effective_configuration_markers(&self) -> Vec<String> {
        if self.configuration.is_empty() {
            vec![DEFAULT_CONFIGURATION_MARKER.to_string()]
        } else {
            self.configuration.clone()
        }
    }

    /// Returns the effective tag key, defaulting to "trellis".
    pub fn effective_tag_key(&self) -> &str {
        self.tag_key.as_deref().unwrap_or(DEFAULT_TAG_KEY)
    }
}
