//! Marker classification.
//!
//! A declaration participates when it is a struct with exactly one embedded
//! field whose type is a registered marker. Zero or several marker fields
//! make it non-participating, never an error.

use std::fmt;

use trellis_core::config::MarkerConfig;
use trellis_core::types::FxHashMap;

use crate::declarations::{Declaration, TypeRef};

/// What a marker makes of the declaration embedding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerKind {
    /// An injectable component built by a constructor function.
    Component,
    /// A group of provider methods, each yielding one component.
    Configuration,
}

impl fmt::Display for MarkerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Component => f.write_str("component"),
            Self::Configuration => f.write_str("configuration"),
        }
    }
}

/// Recognized marker types by fully-qualified path.
#[derive(Debug, Clone, Default)]
pub struct MarkerRegistry {
    markers: FxHashMap<String, MarkerKind>,
}

impl MarkerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding the effective markers of a config.
    pub fn from_config(config: &MarkerConfig) -> Self {
        let mut registry = Self::new();
        for marker in config.effective_component_markers() {
            registry.register(marker, MarkerKind::Component);
        }
        for marker in config.effective_configuration_markers() {
            registry.register(marker, MarkerKind::Configuration);
        }
        registry
    }

    pub fn register(&mut self, marker: impl Into<String>, kind: MarkerKind) {
        self.markers.insert(marker.into(), kind);
    }

    pub fn kind_of(&self, marker: &str) -> Option<MarkerKind> {
        self.markers.get(marker).copied()
    }

    pub fn is_marker(&self, ty: &TypeRef) -> bool {
        match ty {
            TypeRef::Named(path) => self.markers.contains_key(&path.to_string()),
            _ => false,
        }
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

/// A participating declaration with its marker and raw tag.
#[derive(Debug, Clone)]
pub struct Classification<'a> {
    pub declaration: &'a Declaration,
    /// Fully-qualified marker type path.
    pub marker: String,
    /// Raw tag of the marker field, empty when absent.
    pub tag: String,
}

/// Classify one declaration. Returns `None` for non-participating types.
pub fn classify<'a>(
    registry: &MarkerRegistry,
    declaration: &'a Declaration,
) -> Option<Classification<'a>> {
    let mut markers = declaration
        .fields()
        .iter()
        .filter(|field| field.embedded && registry.is_marker(&field.type_ref));

    let field = markers.next()?;
    if markers.next().is_some() {
        tracing::debug!(
            declaration = %declaration.path(),
            "multiple marker fields; not participating"
        );
        return None;
    }

    Some(Classification {
        declaration,
        marker: field.type_ref.to_string(),
        tag: field.tag.clone().unwrap_or_default(),
    })
}

/// The `(is_component, is_configuration, raw_tag)` triple for a declaration.
pub fn classify_flags(registry: &MarkerRegistry, declaration: &Declaration) -> (bool, bool, String) {
    match classify(registry, declaration) {
        Some(c) => match registry.kind_of(&c.marker) {
            Some(MarkerKind::Component) => (true, false, c.tag),
            Some(MarkerKind::Configuration) => (false, true, c.tag),
            None => (false, false, String::new()),
        },
        None => (false, false, String::new()),
    }
}
