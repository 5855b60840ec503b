//! Declaration model, store contract, manifest store and type index.

pub mod declaration;
pub mod index;
pub mod manifest;
pub mod store;
pub mod types;

pub use declaration::{Declaration, DeclarationKind, Field, Method, PackageId, Symbol};
pub use index::TypeIndex;
pub use manifest::{DeclarationManifest, ManifestPackage, ManifestStore, PackageBuilder};
pub use store::DeclarationStore;
pub use types::{InterfaceMethod, InterfaceType, Signature, TypePath, TypeRef};
