//! Marker classification, struct-tag extraction and directive policy.

pub mod classifier;
pub mod policy;
pub mod tag;

pub use classifier::{classify, classify_flags, Classification, MarkerKind, MarkerRegistry};
pub use policy::{parse_directives, parse_policy, Order, ParsedPolicy, ProviderPolicy, Scope};
