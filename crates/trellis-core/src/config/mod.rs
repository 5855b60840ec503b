//! Configuration system for Trellis.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod logging_config;
pub mod marker_config;
pub mod resolution_config;
pub mod trellis_config;

pub use logging_config::LoggingConfig;
pub use marker_config::MarkerConfig;
pub use resolution_config::ResolutionConfig;
pub use trellis_config::{CliOverrides, TrellisConfig};
