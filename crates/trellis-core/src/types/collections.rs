//! Re-exports of performance-oriented collection types.
//!
//! Hash-based collections here are for lookups only. Anything that reaches
//! the resolved graph is ordered explicitly before it leaves the resolver.

pub use rustc_hash::{FxHashMap, FxHashSet};
pub use smallvec::SmallVec;
pub use std::collections::{BTreeMap, BTreeSet};

/// SmallVec for per-component interface lists (usually 0-2 entries).
pub type SmallVec2<T> = SmallVec<[T; 2]>;

/// SmallVec for provider parameter lists (usually <4).
pub type SmallVec4<T> = SmallVec<[T; 4]>;
