//! Declaration store errors.

use std::path::PathBuf;

use super::error_code::{ErrorKind, TrellisErrorCode};

/// Errors raised while acquiring declarations. All of them abort the run.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to load packages under {root}: {message}")]
    LoadFailed { root: PathBuf, message: String },

    #[error("compile error in package {package}: {message}")]
    CompileError { package: String, message: String },

    #[error("invalid declaration manifest {path}: {message}")]
    ManifestParse { path: PathBuf, message: String },
}

impl TrellisErrorCode for StoreError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::CompileError { .. } => ErrorKind::CompileError,
            Self::LoadFailed { .. } | Self::ManifestParse { .. } => ErrorKind::LoadFailed,
        }
    }
}
