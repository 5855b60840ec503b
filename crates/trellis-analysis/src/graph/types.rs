//! Resolved graph types, the hand-off to rendering.

use std::fmt;

use serde::{Deserialize, Serialize};
use trellis_core::types::collections::SmallVec2;

use crate::declarations::{PackageId, TypePath};
use crate::markers::{Order, ProviderPolicy};
use crate::providers::ProviderSignature;

/// Identity of a component: the produced type. Predeclared types carry no
/// package.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentId {
    pub package: Option<PackageId>,
    pub name: String,
}

impl ComponentId {
    pub fn new(package: PackageId, name: impl Into<String>) -> Self {
        Self {
            package: Some(package),
            name: name.into(),
        }
    }

    pub fn predeclared(name: impl Into<String>) -> Self {
        Self {
            package: None,
            name: name.into(),
        }
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.package {
            Some(package) => write!(f, "{}.{}", package.path, self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Where a component's provider comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ProviderOrigin {
    /// A package-level constructor function in the component's package.
    Constructor { function: String },
    /// A method invoked on the zero value of a configuration type.
    ConfigMethod {
        configuration: TypePath,
        configuration_package: PackageId,
        method: String,
    },
}

/// A named interface a component was bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterfaceRef {
    pub package: PackageId,
    pub name: String,
}

impl fmt::Display for InterfaceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package.path, self.name)
    }
}

/// One discovered component with everything rendering needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub id: ComponentId,
    pub origin: ProviderOrigin,
    pub policy: ProviderPolicy,
    pub signature: ProviderSignature,
    /// Interfaces this component was bound to, in binding order.
    pub implements: SmallVec2<InterfaceRef>,
}

impl ComponentRecord {
    pub fn is_pointer(&self) -> bool {
        self.signature.produces_pointer
    }

    /// `Config.Method` for configuration providers, the constructor name
    /// otherwise.
    pub fn provider_name(&self) -> String {
        match &self.origin {
            ProviderOrigin::Constructor { function } => function.clone(),
            ProviderOrigin::ConfigMethod {
                configuration,
                method,
                ..
            } => format!("{}.{}", configuration.name, method),
        }
    }
}

/// One slice member: an index into `ResolvedGraph::components`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceMember {
    pub component: usize,
    pub order: Order,
}

/// All implementers of an interface consumed as a slice, ascending by order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliceBinding {
    pub interface: InterfaceRef,
    pub members: Vec<SliceMember>,
}
