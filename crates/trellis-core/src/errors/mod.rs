//! Error handling for Trellis.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod binding_error;
pub mod config_error;
pub mod error_code;
pub mod marker_error;
pub mod policy_error;
pub mod provider_error;
pub mod resolve_error;
pub mod store_error;

pub use binding_error::BindingError;
pub use config_error::ConfigError;
pub use error_code::{ErrorKind, TrellisErrorCode};
pub use marker_error::MarkerError;
pub use policy_error::PolicyError;
pub use provider_error::ProviderError;
pub use resolve_error::{ResolveError, ResultExt};
pub use store_error::StoreError;
