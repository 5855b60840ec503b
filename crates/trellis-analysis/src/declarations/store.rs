//! The declaration store contract.

use std::path::Path;

use trellis_core::errors::StoreError;

use super::declaration::{Declaration, Symbol};

/// Read-only access to typed declarations.
///
/// Implementations wrap a static type-analysis oracle. A load failure or a
/// compile error in any package fails the whole listing; there are no
/// partial results.
pub trait DeclarationStore: Send + Sync {
    /// All type declarations under `root`, ordered by package path then name.
    fn list_declarations(&self, root: &Path) -> Result<Vec<Declaration>, StoreError>;

    /// Look up a package-level symbol by name.
    fn lookup_function(&self, package: &str, name: &str) -> Option<Symbol>;
}
