//! Resolution configuration.

use serde::{Deserialize, Serialize};

/// Configuration for the binding pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ResolutionConfig {
    /// Import path of the package the container is generated into.
    /// Excluded from every import list.
    pub output_package: Option<String>,
    /// Compute implementer sets in parallel. Default: false.
    pub parallel: Option<bool>,
    /// Warn when a `key=value` token falls back to a constructor override. Default: true.
    pub warn_on_directive_fallback: Option<bool>,
}

impl ResolutionConfig {
    /// Returns whether parallel resolution is enabled, defaulting to false.
    pub fn effective_parallel(&self) -> bool {
        self.parallel.unwrap_or(false)
    }

    /// Returns whether directive fallbacks warn, defaulting to true.
    pub fn effective_warn_on_directive_fallback(&self) -> bool {
        self.warn_on_directive_fallback.unwrap_or(true)
    }
}
