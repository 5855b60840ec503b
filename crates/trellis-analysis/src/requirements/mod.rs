//! Requirement collection over validated provider parameters.

pub mod collector;

pub use collector::{Requirement, RequirementSet};
