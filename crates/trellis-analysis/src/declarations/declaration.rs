//! Declared types, their fields and methods, and package-level symbols.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::types::{InterfaceType, Signature, TypePath, TypeRef};

/// Package identity: import path plus the package clause name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId {
    pub path: String,
    pub name: String,
}

impl PackageId {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
        }
    }

    /// Package id whose name is the last import path segment.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = default_package_name(&path).to_string();
        Self { path, name }
    }
}

impl fmt::Display for PackageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Last segment of an import path, the conventional package name.
pub fn default_package_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// A struct field. Embedded (anonymous) fields are named after their type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub type_ref: TypeRef,
    #[serde(default)]
    pub embedded: bool,
    /// Raw struct tag, without the surrounding backquotes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Field {
    pub fn new(name: impl Into<String>, type_ref: TypeRef) -> Self {
        Self {
            name: name.into(),
            type_ref,
            embedded: false,
            tag: None,
        }
    }

    /// An embedded field of the given type.
    pub fn embedded(type_ref: TypeRef) -> Self {
        let name = match type_ref.strip_pointer().0 {
            TypeRef::Named(path) => path.name.clone(),
            other => other.to_string(),
        };
        Self {
            name,
            type_ref,
            embedded: true,
            tag: None,
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}

/// A method declared on a named type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Method {
    pub name: String,
    pub signature: Signature,
    #[serde(default)]
    pub pointer_receiver: bool,
    /// Directive list attached to the method (read from a `trellis:`
    /// comment by the oracle). Only meaningful on configuration methods.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directive: Option<String>,
}

impl Method {
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            signature,
            pointer_receiver: false,
            directive: None,
        }
    }

    pub fn with_pointer_receiver(mut self) -> Self {
        self.pointer_receiver = true;
        self
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    /// Exported methods start with an uppercase letter.
    pub fn is_exported(&self) -> bool {
        self.name.chars().next().is_some_and(char::is_uppercase)
    }
}

/// What a declared type is underneath its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeclarationKind {
    Struct { fields: Vec<Field> },
    Interface(InterfaceType),
    /// Any other defined type, e.g. `type Handler func()` or `type ID Other`.
    Defined(TypeRef),
}

/// A named type declared at package level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub package: PackageId,
    pub name: String,
    pub kind: DeclarationKind,
    #[serde(default)]
    pub methods: Vec<Method>,
}

impl Declaration {
    pub fn path(&self) -> TypePath {
        TypePath::new(self.package.path.clone(), self.name.clone())
    }

    /// The declaration as a type reference.
    pub fn type_ref(&self) -> TypeRef {
        TypeRef::Named(self.path())
    }

    pub fn fields(&self) -> &[Field] {
        match &self.kind {
            DeclarationKind::Struct { fields } => fields,
            _ => &[],
        }
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, DeclarationKind::Struct { .. })
    }

    pub fn is_interface(&self) -> bool {
        matches!(self.kind, DeclarationKind::Interface(_))
    }
}

/// A package-level object found by name lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Symbol {
    Func(Signature),
    Var(TypeRef),
    Const(TypeRef),
    Type(TypePath),
}

impl Symbol {
    /// Human-readable kind, used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Func(_) => "function",
            Self::Var(_) => "variable",
            Self::Const(_) => "constant",
            Self::Type(_) => "type",
        }
    }

    pub fn as_func(&self) -> Option<&Signature> {
        match self {
            Self::Func(sig) => Some(sig),
            _ => None,
        }
    }
}
