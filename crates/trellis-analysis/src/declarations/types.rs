//! Type references as reported by the declaration oracle.
//!
//! `TypeRef` is structural: two references are identical exactly when they
//! compare equal. Named types compare by their fully-qualified path, so the
//! `Display` rendering doubles as the identity key used for deduplication.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fully-qualified name of a declared type: import path plus type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypePath {
    pub package: String,
    pub name: String,
}

impl TypePath {
    pub fn new(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            name: name.into(),
        }
    }

    /// Parse `import/path.Name`. The split happens at the last `.`, so dotted
    /// hosts like `example.com/app.Greeter` parse correctly.
    pub fn parse(qualified: &str) -> Option<Self> {
        let (package, name) = qualified.rsplit_once('.')?;
        if package.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(package, name))
    }
}

impl fmt::Display for TypePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.package, self.name)
    }
}

/// A function or method signature. Parameters are unnamed; only their types
/// take part in identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Signature {
    #[serde(default)]
    pub params: Vec<TypeRef>,
    #[serde(default)]
    pub results: Vec<TypeRef>,
}

impl Signature {
    pub fn new(params: Vec<TypeRef>, results: Vec<TypeRef>) -> Self {
        Self { params, results }
    }

    /// `func()` with no parameters and no results.
    pub fn is_niladic_void(&self) -> bool {
        self.params.is_empty() && self.results.is_empty()
    }
}

/// One method in an interface's method set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InterfaceMethod {
    pub name: String,
    pub signature: Signature,
}

impl InterfaceMethod {
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            signature,
        }
    }
}

/// An interface method set, kept sorted by method name so that identity does
/// not depend on declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "UnsortedInterface")]
pub struct InterfaceType {
    methods: Vec<InterfaceMethod>,
}

#[derive(Deserialize)]
struct UnsortedInterface {
    #[serde(default)]
    methods: Vec<InterfaceMethod>,
}

impl From<UnsortedInterface> for InterfaceType {
    fn from(raw: UnsortedInterface) -> Self {
        Self::new(raw.methods)
    }
}

impl InterfaceType {
    pub fn new(mut methods: Vec<InterfaceMethod>) -> Self {
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        methods.dedup_by(|a, b| a.name == b.name);
        Self { methods }
    }

    /// The empty interface (`any`).
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn methods(&self) -> &[InterfaceMethod] {
        &self.methods
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}

/// A reference to a type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// Predeclared non-error type: `int`, `string`, `bool`, ...
    Basic(String),
    /// The predeclared `error` interface.
    Error,
    Named(TypePath),
    Pointer(Box<TypeRef>),
    Slice(Box<TypeRef>),
    Map { key: Box<TypeRef>, value: Box<TypeRef> },
    Func(Signature),
    /// Interface literal (anonymous interface).
    Interface(InterfaceType),
}

impl TypeRef {
    pub fn basic(name: impl Into<String>) -> Self {
        Self::Basic(name.into())
    }

    pub fn named(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Named(TypePath::new(package, name))
    }

    pub fn pointer(elem: TypeRef) -> Self {
        Self::Pointer(Box::new(elem))
    }

    pub fn slice(elem: TypeRef) -> Self {
        Self::Slice(Box::new(elem))
    }

    pub fn map(key: TypeRef, value: TypeRef) -> Self {
        Self::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn func(params: Vec<TypeRef>, results: Vec<TypeRef>) -> Self {
        Self::Func(Signature::new(params, results))
    }

    /// `func()`, the cleanup closure shape.
    pub fn cleanup() -> Self {
        Self::Func(Signature::default())
    }

    /// Strip exactly one pointer level. Returns the type and whether a
    /// pointer was removed.
    pub fn strip_pointer(&self) -> (&TypeRef, bool) {
        match self {
            Self::Pointer(elem) => (elem, true),
            other => (other, false),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// A niladic function with no results: `func()`.
    pub fn is_cleanup(&self) -> bool {
        matches!(self, Self::Func(sig) if sig.is_niladic_void())
    }

    pub fn as_named(&self) -> Option<&TypePath> {
        match self {
            Self::Named(path) => Some(path),
            _ => None,
        }
    }

    /// Render the type, spelling each named type through `qualify`.
    pub fn render(&self, qualify: &mut dyn FnMut(&TypePath) -> String) -> String {
        let mut out = String::new();
        self.render_into(&mut out, qualify);
        out
    }

    fn render_into(&self, out: &mut String, qualify: &mut dyn FnMut(&TypePath) -> String) {
        match self {
            Self::Basic(name) => out.push_str(name),
            Self::Error => out.push_str("error"),
            Self::Named(path) => out.push_str(&qualify(path)),
            Self::Pointer(elem) => {
                out.push('*');
                elem.render_into(out, qualify);
            }
            Self::Slice(elem) => {
                out.push_str("[]");
                elem.render_into(out, qualify);
            }
            Self::Map { key, value } => {
                out.push_str("map[");
                key.render_into(out, qualify);
                out.push(']');
                value.render_into(out, qualify);
            }
            Self::Func(sig) => {
                out.push_str("func");
                render_signature(sig, out, qualify);
            }
            Self::Interface(iface) => {
                out.push_str("interface{");
                for (i, method) in iface.methods().iter().enumerate() {
                    if i > 0 {
                        out.push_str("; ");
                    }
                    out.push_str(&method.name);
                    render_signature(&method.signature, out, qualify);
                }
                out.push('}');
            }
        }
    }
}

fn render_signature(
    sig: &Signature,
    out: &mut String,
    qualify: &mut dyn FnMut(&TypePath) -> String,
) {
    out.push('(');
    for (i, param) in sig.params.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        param.render_into(out, qualify);
    }
    out.push(')');
    match sig.results.as_slice() {
        [] => {}
        [single] => {
            out.push(' ');
            single.render_into(out, qualify);
        }
        many => {
            out.push_str(" (");
            for (i, result) in many.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                result.render_into(out, qualify);
            }
            out.push(')');
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&mut |path| path.to_string()))
    }
}
