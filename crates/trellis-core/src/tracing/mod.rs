//! Observability for Trellis.
//! `tracing` crate with `EnvFilter`, overridable through `TRELLIS_LOG`.

pub mod setup;

pub use setup::init_tracing;
