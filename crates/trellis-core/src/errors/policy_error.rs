//! Tag policy errors.

use super::error_code::{ErrorKind, TrellisErrorCode};

/// Errors raised while parsing marker directives.
#[derive(Debug, thiserror::Error)]
pub enum PolicyError {
    #[error("invalid scope '{scope}' for component '{component}' in package '{package}' (expected singleton or prototype)")]
    InvalidScope {
        scope: String,
        component: String,
        package: String,
    },

    #[error("invalid order '{order}' for component '{component}' in package '{package}' (must be an integer)")]
    InvalidOrder {
        order: String,
        component: String,
        package: String,
    },
}

impl TrellisErrorCode for PolicyError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidScope { .. } => ErrorKind::InvalidScope,
            Self::InvalidOrder { .. } => ErrorKind::InvalidOrder,
        }
    }
}
