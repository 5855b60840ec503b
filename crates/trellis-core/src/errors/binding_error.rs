//! Binding resolution errors.

use super::error_code::{ErrorKind, TrellisErrorCode};

/// Errors raised while binding interface and slice requirements.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    #[error("interface collision: {} components implement injected interface '{interface}', but none is marked 'primary' ({})", .candidates.len(), .candidates.join(", "))]
    CollisionNonePrimary {
        interface: String,
        candidates: Vec<String>,
    },

    #[error("interface collision: multiple components implementing '{interface}' are marked as 'primary' ({})", .primaries.join(", "))]
    CollisionMultiplePrimary {
        interface: String,
        primaries: Vec<String>,
    },

    #[error("cannot bind anonymous interface '{interface}' to component '{component}' in package '{package}': only named interfaces are supported")]
    InvalidInterface {
        interface: String,
        component: String,
        package: String,
    },

    #[error("no component found that implements interface '{interface}'")]
    NoImplementation { interface: String },

    #[error("cannot bind anonymous slice element '{element}': only named interfaces are supported")]
    InvalidSlice { element: String },
}

impl TrellisErrorCode for BindingError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::CollisionNonePrimary { .. } | Self::CollisionMultiplePrimary { .. } => {
                ErrorKind::InterfaceCollision
            }
            Self::InvalidInterface { .. } => ErrorKind::InvalidInterface,
            Self::NoImplementation { .. } => ErrorKind::NoImplementation,
            Self::InvalidSlice { .. } => ErrorKind::InvalidSlice,
        }
    }
}
