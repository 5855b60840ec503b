//! JSON declaration manifests and the store backed by them.
//!
//! A manifest is the hand-off format between a language-specific oracle and
//! the resolver: every loaded package with its type declarations, methods and
//! package-level symbols, plus any load or compile errors the oracle hit.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use trellis_core::constants::MANIFEST_FILE;
use trellis_core::errors::StoreError;

use super::declaration::{
    default_package_name, Declaration, DeclarationKind, Field, Method, PackageId, Symbol,
};
use super::store::DeclarationStore;
use super::types::{InterfaceType, Signature, TypePath, TypeRef};

/// Top-level manifest document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeclarationManifest {
    #[serde(default)]
    pub packages: Vec<ManifestPackage>,
    /// Errors that prevented loading altogether.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub load_errors: Vec<String>,
}

/// One loaded package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestPackage {
    pub path: String,
    /// Package clause name. Defaults to the last path segment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub types: Vec<ManifestType>,
    /// Package-level functions, variables and constants by name.
    #[serde(default)]
    pub symbols: BTreeMap<String, Symbol>,
    /// Compile errors reported for this package.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl ManifestPackage {
    pub fn id(&self) -> PackageId {
        let name = self
            .name
            .clone()
            .unwrap_or_else(|| default_package_name(&self.path).to_string());
        PackageId::new(self.path.clone(), name)
    }
}

/// A type declaration inside a package entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestType {
    pub name: String,
    pub kind: DeclarationKind,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl DeclarationManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_package(mut self, package: ManifestPackage) -> Self {
        self.packages.push(package);
        self
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A `DeclarationStore` serving a loaded manifest.
#[derive(Debug, Clone, Default)]
pub struct ManifestStore {
    manifest: DeclarationManifest,
}

impl ManifestStore {
    pub fn new(manifest: DeclarationManifest) -> Self {
        Self { manifest }
    }

    /// Load a manifest file.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::LoadFailed {
            root: path.to_path_buf(),
            message: e.to_string(),
        })?;
        let manifest =
            DeclarationManifest::from_json(&content).map_err(|e| StoreError::ManifestParse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        tracing::debug!(
            path = %path.display(),
            packages = manifest.packages.len(),
            "loaded declaration manifest"
        );
        Ok(Self { manifest })
    }

    /// Load `trellis-declarations.json` from a scanned root.
    pub fn discover(root: &Path) -> Result<Self, StoreError> {
        Self::open(&Self::manifest_path(root))
    }

    pub fn manifest_path(root: &Path) -> PathBuf {
        root.join(MANIFEST_FILE)
    }

    pub fn manifest(&self) -> &DeclarationManifest {
        &self.manifest
    }

    fn package(&self, path: &str) -> Option<&ManifestPackage> {
        self.manifest.packages.iter().find(|p| p.path == path)
    }
}

impl DeclarationStore for ManifestStore {
    fn list_declarations(&self, root: &Path) -> Result<Vec<Declaration>, StoreError> {
        if !self.manifest.load_errors.is_empty() {
            return Err(StoreError::LoadFailed {
                root: root.to_path_buf(),
                message: self.manifest.load_errors.join("; "),
            });
        }

        let mut declarations = Vec::new();
        for package in &self.manifest.packages {
            if let Some(first) = package.errors.first() {
                return Err(StoreError::CompileError {
                    package: package.path.clone(),
                    message: first.clone(),
                });
            }
            let id = package.id();
            declarations.extend(package.types.iter().map(|t| Declaration {
                package: id.clone(),
                name: t.name.clone(),
                kind: t.kind.clone(),
                methods: t.methods.clone(),
            }));
        }

        declarations.sort_by(|a, b| {
            (a.package.path.as_str(), a.name.as_str()).cmp(&(b.package.path.as_str(), b.name.as_str()))
        });
        Ok(declarations)
    }

    fn lookup_function(&self, package: &str, name: &str) -> Option<Symbol> {
        let pkg = self.package(package)?;
        if let Some(symbol) = pkg.symbols.get(name) {
            return Some(symbol.clone());
        }
        pkg.types
            .iter()
            .find(|t| t.name == name)
            .map(|t| Symbol::Type(TypePath::new(package, t.name.clone())))
    }
}

/// Fluent assembly of a manifest package.
#[derive(Debug, Clone)]
pub struct PackageBuilder {
    package: ManifestPackage,
}

impl PackageBuilder {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            package: ManifestPackage {
                path: path.into(),
                name: None,
                types: Vec::new(),
                symbols: BTreeMap::new(),
                errors: Vec::new(),
            },
        }
    }

    /// Override the package clause name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.package.name = Some(name.into());
        self
    }

    pub fn structure(mut self, name: impl Into<String>, fields: Vec<Field>) -> Self {
        self.package.types.push(ManifestType {
            name: name.into(),
            kind: DeclarationKind::Struct { fields },
            methods: Vec::new(),
        });
        self
    }

    pub fn interface(mut self, name: impl Into<String>, iface: InterfaceType) -> Self {
        self.package.types.push(ManifestType {
            name: name.into(),
            kind: DeclarationKind::Interface(iface),
            methods: Vec::new(),
        });
        self
    }

    pub fn defined(mut self, name: impl Into<String>, underlying: TypeRef) -> Self {
        self.package.types.push(ManifestType {
            name: name.into(),
            kind: DeclarationKind::Defined(underlying),
            methods: Vec::new(),
        });
        self
    }

    /// Attach a method to a type declared earlier in this builder.
    pub fn method(mut self, receiver: &str, method: Method) -> Self {
        match self.package.types.iter_mut().find(|t| t.name == receiver) {
            Some(entry) => entry.methods.push(method),
            None => tracing::warn!(
                package = %self.package.path,
                receiver,
                method = %method.name,
                "dropping method on undeclared receiver"
            ),
        }
        self
    }

    pub fn func(mut self, name: impl Into<String>, signature: Signature) -> Self {
        self.package
            .symbols
            .insert(name.into(), Symbol::Func(signature));
        self
    }

    pub fn var(mut self, name: impl Into<String>, type_ref: TypeRef) -> Self {
        self.package.symbols.insert(name.into(), Symbol::Var(type_ref));
        self
    }

    pub fn compile_error(mut self, message: impl Into<String>) -> Self {
        self.package.errors.push(message.into());
        self
    }

    pub fn build(self) -> ManifestPackage {
        self.package
    }
}
