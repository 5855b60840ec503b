//! Provider validation errors.

use super::error_code::{ErrorKind, TrellisErrorCode};

/// Errors raised while validating a provider function or method.
///
/// `NotFound` is the only variant of kind `ProviderNotFound`; every other
/// variant is an `InvalidProviderFunc`.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("provider '{provider}' not found for component '{component}' in package '{package}'")]
    NotFound {
        provider: String,
        component: String,
        package: String,
    },

    #[error("expected '{provider}' to be a function for component '{component}', but it is a {found}")]
    NotCallable {
        provider: String,
        component: String,
        found: String,
    },

    #[error("invalid provider func '{provider}' for component '{component}': {reason}")]
    InvalidReturns {
        provider: String,
        component: String,
        reason: String,
    },

    #[error("invalid provider func '{provider}' returns '{returns}', but must return '{expected}' or '*{expected}'")]
    ReturnTypeMismatch {
        provider: String,
        returns: String,
        expected: String,
    },

    #[error("circular dependency: provider func '{provider}' for component '{component}' cannot require its own type as a parameter ('{param}')")]
    SelfReference {
        provider: String,
        component: String,
        param: String,
    },

    #[error("invalid prototype handle '{handle}' in provider '{provider}' for component '{component}': {reason}")]
    InvalidPrototypeHandle {
        provider: String,
        component: String,
        handle: String,
        reason: String,
    },

    #[error("configuration method '{provider}' produces '{produced}', which is not a named or predeclared type")]
    UnnameableProduct { provider: String, produced: String },
}

impl TrellisErrorCode for ProviderError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::ProviderNotFound,
            _ => ErrorKind::InvalidProviderFunc,
        }
    }
}
