//! Interface and slice requirement collection.

use serde::Serialize;
use trellis_core::types::FxHashSet;

use crate::declarations::{InterfaceType, TypeIndex, TypeRef};
use crate::providers::ProviderSignature;

/// A distinct interface type that some provider consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Requirement {
    /// Full type identity, the dedup key.
    pub key: String,
    pub type_ref: TypeRef,
    /// The required method set.
    pub interface: InterfaceType,
}

/// Requirements in first-discovery order, deduplicated by type identity.
#[derive(Debug, Clone, Default)]
pub struct RequirementSet {
    interfaces: Vec<Requirement>,
    slices: Vec<Requirement>,
    seen_interfaces: FxHashSet<String>,
    seen_slices: FxHashSet<String>,
}

impl RequirementSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Single-interface requirements.
    pub fn interfaces(&self) -> &[Requirement] {
        &self.interfaces
    }

    /// Slice-of-interface requirements, keyed by element type.
    pub fn slices(&self) -> &[Requirement] {
        &self.slices
    }

    /// Scan a validated provider's parameters.
    ///
    /// - a parameter whose underlying type is a non-empty interface
    /// - a slice parameter whose element is a non-empty interface
    /// - a prototype handle `func() T` whose `T` is a non-empty interface
    ///
    /// Empty interfaces are never registered.
    pub fn collect(&mut self, index: &TypeIndex<'_>, signature: &ProviderSignature) {
        for param in &signature.param_types {
            if let Some(iface) = non_empty_interface(index, param) {
                Self::insert(&mut self.interfaces, &mut self.seen_interfaces, param, iface);
            }

            if let TypeRef::Slice(elem) = param {
                if let Some(iface) = non_empty_interface(index, elem) {
                    Self::insert(&mut self.slices, &mut self.seen_slices, elem, iface);
                }
            }

            if let TypeRef::Func(handle) = param {
                if let Some(product) = handle.results.first() {
                    if let Some(iface) = non_empty_interface(index, product) {
                        Self::insert(&mut self.interfaces, &mut self.seen_interfaces, product, iface);
                    }
                }
            }
        }
    }

    fn insert(
        list: &mut Vec<Requirement>,
        seen: &mut FxHashSet<String>,
        ty: &TypeRef,
        iface: &InterfaceType,
    ) {
        let key = ty.to_string();
        if seen.insert(key.clone()) {
            tracing::debug!(requirement = %key, "registered requirement");
            list.push(Requirement {
                key,
                type_ref: ty.clone(),
                interface: iface.clone(),
            });
        }
    }
}

fn non_empty_interface<'s>(index: &'s TypeIndex<'_>, ty: &'s TypeRef) -> Option<&'s InterfaceType> {
    index.interface_of(ty).filter(|iface| !iface.is_empty())
}
