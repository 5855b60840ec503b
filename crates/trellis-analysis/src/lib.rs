//! Trellis analysis: resolves a compile-time dependency-injection graph from
//! typed declarations.
//!
//! Stages, leaf-first:
//! - **declarations**: type model, store contract, JSON manifest store, type index
//! - **markers**: marker classification, struct-tag extraction, directive policy
//! - **providers**: provider signature validation and parameter descriptors
//! - **requirements**: interface and slice requirement collection
//! - **binding**: structural capability matching and requirement binding
//! - **graph**: resolved graph types and assembly
//! - **pipeline**: the `Resolver` driving one run end to end

pub mod binding;
pub mod declarations;
pub mod graph;
pub mod markers;
pub mod pipeline;
pub mod providers;
pub mod requirements;

pub use graph::ResolvedGraph;
pub use pipeline::Resolver;
