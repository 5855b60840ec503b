//! Per-run lookup of named types.

use trellis_core::types::FxHashMap;

use super::declaration::{default_package_name, Declaration, DeclarationKind, PackageId};
use super::types::{InterfaceType, TypePath, TypeRef};

/// Bound on defined-type chains (`type A B; type B C; ...`).
const MAX_UNDERLYING_DEPTH: usize = 32;

/// Index from type paths to the declarations that define them.
pub struct TypeIndex<'a> {
    by_path: FxHashMap<TypePath, &'a Declaration>,
    package_names: FxHashMap<&'a str, &'a str>,
}

impl<'a> TypeIndex<'a> {
    pub fn new(declarations: &'a [Declaration]) -> Self {
        let mut by_path = FxHashMap::default();
        let mut package_names = FxHashMap::default();
        for decl in declarations {
            by_path.insert(decl.path(), decl);
            package_names.insert(decl.package.path.as_str(), decl.package.name.as_str());
        }
        Self {
            by_path,
            package_names,
        }
    }

    pub fn len(&self) -> usize {
        self.by_path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_path.is_empty()
    }

    pub fn declaration(&self, path: &TypePath) -> Option<&'a Declaration> {
        self.by_path.get(path).copied()
    }

    /// Package clause name for an import path. Packages outside the index
    /// fall back to the last path segment.
    pub fn package_name<'p>(&self, path: &'p str) -> &'p str
    where
        'a: 'p,
    {
        self.package_names
            .get(path)
            .copied()
            .unwrap_or_else(|| default_package_name(path))
    }

    pub fn package_id(&self, path: &str) -> PackageId {
        PackageId::new(path, self.package_name(path))
    }

    /// The interface method set underlying `ty`, if its underlying type is
    /// an interface. Named types resolve through their declarations;
    /// unknown named types are opaque.
    pub fn interface_of<'s>(&'s self, ty: &'s TypeRef) -> Option<&'s InterfaceType> {
        let mut current = ty;
        for _ in 0..MAX_UNDERLYING_DEPTH {
            match current {
                TypeRef::Interface(iface) => return Some(iface),
                TypeRef::Named(path) => match &self.declaration(path)?.kind {
                    DeclarationKind::Interface(iface) => return Some(iface),
                    DeclarationKind::Defined(underlying) => current = underlying,
                    DeclarationKind::Struct { .. } => return None,
                },
                _ => return None,
            }
        }
        tracing::warn!(type_ref = %ty, "defined-type chain too deep; treating as opaque");
        None
    }

    /// Whether `ty` has a non-empty interface as its underlying type.
    pub fn is_non_empty_interface(&self, ty: &TypeRef) -> bool {
        self.interface_of(ty).is_some_and(|iface| !iface.is_empty())
    }
}
