//! Collection types shared across Trellis crates.

pub mod collections;

pub use collections::{BTreeMap, BTreeSet, FxHashMap, FxHashSet, SmallVec, SmallVec2, SmallVec4};
