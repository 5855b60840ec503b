//! Trellis core: shared types, errors, configuration, events and tracing for
//! the dependency-injection graph resolver.

pub mod config;
pub mod constants;
pub mod errors;
pub mod events;
pub mod tracing;
pub mod types;
