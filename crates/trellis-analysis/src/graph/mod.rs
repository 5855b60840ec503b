//! Resolved graph types and assembly.

pub mod assembler;
pub mod types;

pub use assembler::{assemble, ResolvedGraph};
pub use types::{
    ComponentId, ComponentRecord, InterfaceRef, ProviderOrigin, SliceBinding, SliceMember,
};
