//! Provider validation.
//!
//! Checks, in order: the symbol exists and is callable; the results fit the
//! return grammar; the first result is the target type (one pointer level
//! allowed); no parameter is the target type; every prototype-handle
//! parameter is itself a valid niladic provider.

use trellis_core::errors::ProviderError;
use trellis_core::types::collections::SmallVec4;

use super::outcome::ProviderOutcome;
use super::signature::{ProviderSignature, TypeRenderer};
use crate::declarations::{PackageId, Signature, Symbol, TypeIndex, TypePath, TypeRef};

/// What a provider is expected to produce.
#[derive(Debug, Clone, Copy)]
pub enum ProviderTarget<'t> {
    /// A constructor for this declared component type.
    Component(&'t TypePath),
    /// A configuration method; the product is read from its first result
    /// and must be a named or predeclared type.
    ConfigMethod,
}

/// Names used in diagnostics for one provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderSite<'s> {
    pub provider: &'s str,
    pub component: &'s str,
    pub package: &'s PackageId,
}

pub struct ProviderValidator<'i, 'a> {
    index: &'i TypeIndex<'a>,
    output_package: Option<&'i str>,
}

impl<'i, 'a> ProviderValidator<'i, 'a> {
    pub fn new(index: &'i TypeIndex<'a>, output_package: Option<&'i str>) -> Self {
        Self {
            index,
            output_package,
        }
    }

    /// Validate a looked-up symbol as the provider for `target`.
    pub fn validate(
        &self,
        site: ProviderSite<'_>,
        target: ProviderTarget<'_>,
        symbol: Option<&Symbol>,
    ) -> Result<ProviderSignature, ProviderError> {
        let symbol = symbol.ok_or_else(|| ProviderError::NotFound {
            provider: site.provider.to_string(),
            component: site.component.to_string(),
            package: site.package.name.clone(),
        })?;
        let signature = symbol.as_func().ok_or_else(|| ProviderError::NotCallable {
            provider: site.provider.to_string(),
            component: site.component.to_string(),
            found: symbol.kind_name().to_string(),
        })?;
        self.validate_signature(site, target, signature)
    }

    /// Validate a provider signature directly.
    pub fn validate_signature(
        &self,
        site: ProviderSite<'_>,
        target: ProviderTarget<'_>,
        signature: &Signature,
    ) -> Result<ProviderSignature, ProviderError> {
        let outcome = ProviderOutcome::classify(&signature.results).map_err(|e| {
            ProviderError::InvalidReturns {
                provider: site.provider.to_string(),
                component: site.component.to_string(),
                reason: e.to_string(),
            }
        })?;

        // classify guarantees at least one result
        let first = &signature.results[0];
        let (produced, produces_pointer) = first.strip_pointer();

        match target {
            ProviderTarget::Component(path) => {
                if produced.as_named() != Some(path) {
                    return Err(ProviderError::ReturnTypeMismatch {
                        provider: site.provider.to_string(),
                        returns: first.to_string(),
                        expected: path.name.clone(),
                    });
                }
            }
            ProviderTarget::ConfigMethod => {
                if !matches!(produced, TypeRef::Named(_) | TypeRef::Basic(_)) {
                    return Err(ProviderError::UnnameableProduct {
                        provider: site.provider.to_string(),
                        produced: produced.to_string(),
                    });
                }
            }
        }

        let renderer = TypeRenderer::new(self.index, &site.package.path, self.output_package);
        let mut params = SmallVec4::new();
        for (position, param) in signature.params.iter().enumerate() {
            if param.strip_pointer().0 == produced {
                return Err(ProviderError::SelfReference {
                    provider: site.provider.to_string(),
                    component: site.component.to_string(),
                    param: param.to_string(),
                });
            }
            params.push(renderer.describe(position, param));
        }

        for param in &signature.params {
            if let TypeRef::Func(handle) = param {
                self.validate_prototype_handle(site, param, handle)?;
            }
        }

        tracing::debug!(
            provider = site.provider,
            component = site.component,
            params = params.len(),
            outcome = ?outcome,
            "validated provider"
        );

        Ok(ProviderSignature {
            params,
            param_types: signature.params.clone(),
            outcome,
            produced: produced.clone(),
            produces_pointer,
        })
    }

    fn validate_prototype_handle(
        &self,
        site: ProviderSite<'_>,
        param: &TypeRef,
        handle: &Signature,
    ) -> Result<(), ProviderError> {
        let invalid = |reason: String| ProviderError::InvalidPrototypeHandle {
            provider: site.provider.to_string(),
            component: site.component.to_string(),
            handle: param.to_string(),
            reason,
        };
        if !handle.params.is_empty() {
            return Err(invalid(
                "prototype provider func must not have parameters".to_string(),
            ));
        }
        ProviderOutcome::classify(&handle.results).map_err(|e| invalid(e.to_string()))?;
        Ok(())
    }
}
