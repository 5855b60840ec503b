//! Validated provider signatures and rendering descriptors.

use serde::{Deserialize, Serialize};
use trellis_core::types::collections::SmallVec4;

use super::outcome::ProviderOutcome;
use crate::declarations::{TypeIndex, TypePath, TypeRef};

/// A provider parameter as the renderer needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamDescriptor {
    /// Positional name: `p0`, `p1`, ...
    pub name: String,
    /// Type spelled with package-name qualifiers, e.g. `*db.Pool`.
    pub type_name: String,
    /// Import paths the spelling needs, sorted and deduplicated.
    pub imports: Vec<String>,
}

/// A provider whose shape has been validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSignature {
    pub params: SmallVec4<ParamDescriptor>,
    /// Parameter types, for requirement collection.
    pub param_types: Vec<TypeRef>,
    pub outcome: ProviderOutcome,
    /// The produced type with one pointer level stripped.
    pub produced: TypeRef,
    pub produces_pointer: bool,
}

impl ProviderSignature {
    pub fn returns_cleanup(&self) -> bool {
        self.outcome.has_cleanup()
    }

    pub fn returns_error(&self) -> bool {
        self.outcome.has_error()
    }
}

/// Spells types the way generated code in `output_package` must.
///
/// Named types are qualified with their package name unless they live in
/// the output package. Every package a spelling touches is recorded as an
/// import, except the output package and `home_package` (the component's
/// own package, which renderers import unconditionally).
pub struct TypeRenderer<'i, 'a> {
    index: &'i TypeIndex<'a>,
    home_package: &'i str,
    output_package: Option<&'i str>,
}

impl<'i, 'a> TypeRenderer<'i, 'a> {
    pub fn new(
        index: &'i TypeIndex<'a>,
        home_package: &'i str,
        output_package: Option<&'i str>,
    ) -> Self {
        Self {
            index,
            home_package,
            output_package,
        }
    }

    /// Render `ty`, returning its spelling and the imports it needs.
    pub fn render(&self, ty: &TypeRef) -> (String, Vec<String>) {
        let mut imports = Vec::new();
        let spelled = ty.render(&mut |path: &TypePath| {
            if Some(path.package.as_str()) == self.output_package {
                return path.name.clone();
            }
            if path.package != self.home_package {
                imports.push(path.package.clone());
            }
            format!("{}.{}", self.index.package_name(&path.package), path.name)
        });
        imports.sort();
        imports.dedup();
        (spelled, imports)
    }

    pub fn describe(&self, position: usize, ty: &TypeRef) -> ParamDescriptor {
        let (type_name, imports) = self.render(ty);
        ParamDescriptor {
            name: format!("p{position}"),
            type_name,
            imports,
        }
    }
}
