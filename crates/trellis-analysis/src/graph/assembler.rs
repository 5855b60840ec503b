//! Graph assembly. Pure aggregation, no validation.

use serde::{Deserialize, Serialize};
use trellis_core::types::BTreeSet;

use super::types::{ComponentId, ComponentRecord, ProviderOrigin, SliceBinding};

/// The fully resolved wiring graph.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedGraph {
    pub components: Vec<ComponentRecord>,
    /// Ordered by interface identity.
    pub slice_bindings: Vec<SliceBinding>,
    /// Package the graph is rendered into; excluded from `imports()`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_package: Option<String>,
}

/// Aggregate records and slice bindings into a graph.
///
/// Components keep discovery order. Slice bindings are sorted by interface
/// so their order does not depend on how requirements were stored upstream.
pub fn assemble(
    components: Vec<ComponentRecord>,
    mut slice_bindings: Vec<SliceBinding>,
    output_package: Option<String>,
) -> ResolvedGraph {
    slice_bindings.sort_by(|a, b| a.interface.cmp(&b.interface));
    ResolvedGraph {
        components,
        slice_bindings,
        output_package,
    }
}

impl ResolvedGraph {
    /// Sorted, deduplicated import paths the rendered graph needs.
    pub fn imports(&self) -> Vec<String> {
        let mut imports = BTreeSet::new();
        for component in &self.components {
            if let Some(package) = &component.id.package {
                imports.insert(package.path.as_str());
            }
            if let ProviderOrigin::ConfigMethod {
                configuration_package,
                ..
            } = &component.origin
            {
                imports.insert(configuration_package.path.as_str());
            }
            for param in &component.signature.params {
                imports.extend(param.imports.iter().map(String::as_str));
            }
            for iface in &component.implements {
                imports.insert(iface.package.path.as_str());
            }
        }
        for binding in &self.slice_bindings {
            imports.insert(binding.interface.package.path.as_str());
        }
        if let Some(output) = self.output_package.as_deref() {
            imports.remove(output);
        }
        imports.into_iter().map(str::to_string).collect()
    }

    /// Members of a slice binding, in binding order.
    pub fn slice_members<'g>(
        &'g self,
        binding: &'g SliceBinding,
    ) -> impl Iterator<Item = &'g ComponentRecord> + 'g {
        binding
            .members
            .iter()
            .filter_map(move |m| self.components.get(m.component))
    }

    /// First component with the given identity.
    pub fn component(&self, id: &ComponentId) -> Option<&ComponentRecord> {
        self.components.iter().find(|c| &c.id == id)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
