//! Binding of interface and slice requirements to components.

use rayon::prelude::*;
use trellis_core::errors::{BindingError, ResolveError, ResultExt};
use trellis_core::events::types::{InterfaceBoundEvent, SliceResolvedEvent};
use trellis_core::events::EventDispatcher;

use super::capability::{satisfies, MethodSet};
use crate::declarations::{InterfaceType, TypeIndex, TypeRef};
use crate::graph::{ComponentRecord, InterfaceRef, SliceBinding, SliceMember};
use crate::requirements::Requirement;

/// Indices of the components whose capabilities satisfy `required`, in
/// component order.
pub fn implementers(capabilities: &[MethodSet], required: &InterfaceType) -> Vec<usize> {
    capabilities
        .iter()
        .enumerate()
        .filter(|(_, caps)| satisfies(caps, required))
        .map(|(i, _)| i)
        .collect()
}

/// Resolves requirements against discovered components.
///
/// `capabilities[i]` is the pointer method set of `components[i]`. Implementer
/// sets are independent per requirement and may be computed in parallel;
/// results are always applied in requirement order.
pub struct BindingResolver<'r, 'a> {
    index: &'r TypeIndex<'a>,
    events: &'r EventDispatcher,
    parallel: bool,
}

impl<'r, 'a> BindingResolver<'r, 'a> {
    pub fn new(index: &'r TypeIndex<'a>, events: &'r EventDispatcher) -> Self {
        Self {
            index,
            events,
            parallel: false,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    fn implementer_sets(
        &self,
        capabilities: &[MethodSet],
        requirements: &[Requirement],
    ) -> Vec<Vec<usize>> {
        if self.parallel {
            requirements
                .par_iter()
                .map(|r| implementers(capabilities, &r.interface))
                .collect()
        } else {
            requirements
                .iter()
                .map(|r| implementers(capabilities, &r.interface))
                .collect()
        }
    }

    /// Bind each interface requirement to exactly one component, appending
    /// the interface to that component's record.
    pub fn bind_interfaces(
        &self,
        components: &mut [ComponentRecord],
        capabilities: &[MethodSet],
        requirements: &[Requirement],
    ) -> Result<(), ResolveError> {
        let sets = self.implementer_sets(capabilities, requirements);
        for (requirement, found) in requirements.iter().zip(sets) {
            self.bind_interface(components, requirement, &found)
                .with_context(|| format!("resolving interface {}", requirement.key))?;
        }
        Ok(())
    }

    fn bind_interface(
        &self,
        components: &mut [ComponentRecord],
        requirement: &Requirement,
        found: &[usize],
    ) -> Result<(), BindingError> {
        let (chosen, by_primary) = match found {
            [] => {
                return Err(BindingError::NoImplementation {
                    interface: requirement.key.clone(),
                })
            }
            [only] => (*only, false),
            many => {
                let primaries: Vec<usize> = many
                    .iter()
                    .copied()
                    .filter(|&i| components[i].policy.primary)
                    .collect();
                match primaries.as_slice() {
                    [primary] => (*primary, true),
                    [] => {
                        return Err(BindingError::CollisionNonePrimary {
                            interface: requirement.key.clone(),
                            candidates: names(components, many),
                        })
                    }
                    _ => {
                        return Err(BindingError::CollisionMultiplePrimary {
                            interface: requirement.key.clone(),
                            primaries: names(components, &primaries),
                        })
                    }
                }
            }
        };

        let component = &mut components[chosen];
        let iface = self
            .interface_ref(&requirement.type_ref)
            .ok_or_else(|| BindingError::InvalidInterface {
                interface: requirement.key.clone(),
                component: component.id.name.clone(),
                package: component
                    .id
                    .package
                    .as_ref()
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
            })?;

        tracing::debug!(
            interface = %requirement.key,
            component = %component.id,
            by_primary,
            "bound interface"
        );
        self.events.emit_interface_bound(&InterfaceBoundEvent {
            interface: requirement.key.clone(),
            component: component.id.to_string(),
            by_primary,
        });
        component.implements.push(iface);
        Ok(())
    }

    /// Resolve each slice requirement to all implementers, ascending by
    /// order with ties in component order. Zero implementers is accepted.
    pub fn bind_slices(
        &self,
        components: &[ComponentRecord],
        capabilities: &[MethodSet],
        requirements: &[Requirement],
    ) -> Result<Vec<SliceBinding>, ResolveError> {
        let sets = self.implementer_sets(capabilities, requirements);
        let mut bindings = Vec::with_capacity(requirements.len());
        for (requirement, found) in requirements.iter().zip(sets) {
            let binding = self
                .bind_slice(components, requirement, found)
                .with_context(|| format!("resolving slice []{}", requirement.key))?;
            bindings.push(binding);
        }
        Ok(bindings)
    }

    fn bind_slice(
        &self,
        components: &[ComponentRecord],
        requirement: &Requirement,
        found: Vec<usize>,
    ) -> Result<SliceBinding, BindingError> {
        let interface =
            self.interface_ref(&requirement.type_ref)
                .ok_or_else(|| BindingError::InvalidSlice {
                    element: requirement.key.clone(),
                })?;

        let mut members: Vec<SliceMember> = found
            .into_iter()
            .map(|component| SliceMember {
                component,
                order: components[component].policy.order,
            })
            .collect();
        members.sort_by_key(|m| m.order);

        if members.is_empty() {
            tracing::warn!(interface = %requirement.key, "slice binding has no implementers");
        } else {
            tracing::debug!(
                interface = %requirement.key,
                members = members.len(),
                "resolved slice binding"
            );
        }
        self.events.emit_slice_resolved(&SliceResolvedEvent {
            interface: requirement.key.clone(),
            member_count: members.len(),
        });

        Ok(SliceBinding { interface, members })
    }

    /// Named interfaces only; literals cannot be referenced by name.
    fn interface_ref(&self, ty: &TypeRef) -> Option<InterfaceRef> {
        let path = ty.as_named()?;
        Some(InterfaceRef {
            package: self.index.package_id(&path.package),
            name: path.name.clone(),
        })
    }
}

fn names(components: &[ComponentRecord], indices: &[usize]) -> Vec<String> {
    indices.iter().map(|&i| components[i].id.to_string()).collect()
}
