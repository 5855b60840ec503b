//! Structural capability matching.
//!
//! A component satisfies an interface when the method set of a pointer to
//! its produced type contains every interface method with an identical
//! signature.

use trellis_core::types::{BTreeMap, FxHashSet};

use crate::declarations::{DeclarationKind, InterfaceType, Signature, TypeIndex, TypePath, TypeRef};

/// Bound on embedding depth when collecting promoted methods.
const MAX_EMBEDDING_DEPTH: usize = 16;

/// Methods callable on a value, by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodSet {
    methods: BTreeMap<String, Signature>,
}

impl MethodSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, signature: Signature) {
        self.methods.insert(name.into(), signature);
    }

    pub fn get(&self, name: &str) -> Option<&Signature> {
        self.methods.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.methods.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.methods.keys().map(String::as_str)
    }
}

impl FromIterator<(String, Signature)> for MethodSet {
    fn from_iter<I: IntoIterator<Item = (String, Signature)>>(iter: I) -> Self {
        Self {
            methods: iter.into_iter().collect(),
        }
    }
}

/// Whether `caps` covers every method `required` declares.
pub fn satisfies(caps: &MethodSet, required: &InterfaceType) -> bool {
    required
        .methods()
        .iter()
        .all(|m| caps.get(&m.name) == Some(&m.signature))
}

/// Method set of `*T` for a produced type `T`.
///
/// Includes methods declared on `T` with either receiver kind, plus methods
/// promoted through embedded fields, one depth at a time. A name found more
/// than once at the same depth is ambiguous and excluded. That includes one
/// type reached along two embedding paths, and a field and method sharing a
/// name. Field and method names at a shallower depth shadow deeper ones.
/// Interfaces, predeclared types and types missing from the index have an
/// empty pointer method set.
pub fn pointer_method_set(index: &TypeIndex<'_>, produced: &TypeRef) -> MethodSet {
    let mut set = MethodSet::new();
    let Some(path) = produced.as_named() else {
        return set;
    };
    let Some(decl) = index.declaration(path) else {
        return set;
    };
    if decl.is_interface() {
        return set;
    }

    for method in &decl.methods {
        set.insert(method.name.clone(), method.signature.clone());
    }

    // names already decided at a shallower depth, present or ambiguous
    let mut blocked: FxHashSet<String> = set.names().map(str::to_string).collect();
    blocked.extend(decl.fields().iter().map(|f| f.name.clone()));

    let mut seen: FxHashSet<TypePath> = FxHashSet::default();
    seen.insert(path.clone());
    let mut level = embedded_paths(&decl.kind, 1);

    for _ in 0..MAX_EMBEDDING_DEPTH {
        if level.is_empty() {
            break;
        }
        let mut found: BTreeMap<String, Selector> = BTreeMap::new();
        let mut next = Vec::new();

        for (embedded, paths) in consolidate(level) {
            // reached at a shallower depth already
            if !seen.insert(embedded.clone()) {
                continue;
            }
            let Some(inner) = index.declaration(&embedded) else {
                continue;
            };
            match &inner.kind {
                DeclarationKind::Interface(iface) => {
                    for m in iface.methods() {
                        record(&mut found, &m.name, Some(&m.signature), paths);
                    }
                }
                kind => {
                    for m in &inner.methods {
                        record(&mut found, &m.name, Some(&m.signature), paths);
                    }
                    for field in inner.fields() {
                        record(&mut found, &field.name, None, paths);
                    }
                    next.extend(embedded_paths(kind, paths));
                }
            }
        }

        for (name, selector) in found {
            if blocked.insert(name.clone()) && selector.count == 1 {
                if let Some(signature) = selector.method {
                    set.insert(name, signature);
                }
            }
        }
        level = next;
    }

    set
}

/// A name found at one depth: the method signature when it is a method,
/// and how many embedding paths reached it.
struct Selector {
    method: Option<Signature>,
    count: usize,
}

fn record(
    found: &mut BTreeMap<String, Selector>,
    name: &str,
    method: Option<&Signature>,
    paths: usize,
) {
    found
        .entry(name.to_string())
        .and_modify(|s| s.count += paths)
        .or_insert_with(|| Selector {
            method: method.cloned(),
            count: paths,
        });
}

/// Merge repeated types at one depth, summing the paths that reach them.
/// First-seen order is kept.
fn consolidate(level: Vec<(TypePath, usize)>) -> Vec<(TypePath, usize)> {
    let mut merged: Vec<(TypePath, usize)> = Vec::with_capacity(level.len());
    for (path, paths) in level {
        match merged.iter_mut().find(|(p, _)| *p == path) {
            Some((_, total)) => *total += paths,
            None => merged.push((path, paths)),
        }
    }
    merged
}

/// Embedded field types of a struct, each reached along `paths` paths.
fn embedded_paths(kind: &DeclarationKind, paths: usize) -> Vec<(TypePath, usize)> {
    match kind {
        DeclarationKind::Struct { fields } => fields
            .iter()
            .filter(|f| f.embedded)
            .filter_map(|f| f.type_ref.strip_pointer().0.as_named().cloned())
            .map(|path| (path, paths))
            .collect(),
        _ => Vec::new(),
    }
}
