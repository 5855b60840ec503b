//! Marker classification errors.

use super::error_code::{ErrorKind, TrellisErrorCode};

/// Raised when a classified declaration carries a marker the resolver has no
/// handling for. Classification only accepts registered markers, so this
/// indicates an inconsistent marker registry.
#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("unknown marker '{marker}' for declaration '{declaration}' in package '{package}'")]
    UnknownMarker {
        marker: String,
        declaration: String,
        package: String,
    },
}

impl TrellisErrorCode for MarkerError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::UnknownMarker
    }
}
