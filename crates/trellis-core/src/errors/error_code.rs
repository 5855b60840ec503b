//! Stable error kinds and their string codes.

use std::fmt;

/// Programmatically matchable error kind.
///
/// Every Trellis error maps to exactly one kind, and the kind survives any
/// amount of contextual wrapping (see [`super::ResolveError::kind`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ProviderNotFound,
    InvalidProviderFunc,
    UnknownMarker,
    InterfaceCollision,
    InvalidInterface,
    NoImplementation,
    InvalidSlice,
    InvalidScope,
    InvalidOrder,
    LoadFailed,
    CompileError,
    Config,
}

impl ErrorKind {
    /// The stable code string for this kind.
    pub fn code(self) -> &'static str {
        match self {
            Self::ProviderNotFound => PROVIDER_NOT_FOUND,
            Self::InvalidProviderFunc => INVALID_PROVIDER_FUNC,
            Self::UnknownMarker => UNKNOWN_MARKER,
            Self::InterfaceCollision => INTERFACE_COLLISION,
            Self::InvalidInterface => INVALID_INTERFACE,
            Self::NoImplementation => NO_IMPLEMENTATION,
            Self::InvalidSlice => INVALID_SLICE,
            Self::InvalidScope => INVALID_SCOPE,
            Self::InvalidOrder => INVALID_ORDER,
            Self::LoadFailed => LOAD_FAILED,
            Self::CompileError => COMPILE_ERROR,
            Self::Config => CONFIG_ERROR,
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Trait implemented by every Trellis error enum.
pub trait TrellisErrorCode {
    /// The stable kind of this error.
    fn kind(&self) -> ErrorKind;

    /// Returns the error code string (e.g., "NO_IMPLEMENTATION").
    fn error_code(&self) -> &'static str {
        self.kind().code()
    }

    /// Returns the formatted operator string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const PROVIDER_NOT_FOUND: &str = "PROVIDER_NOT_FOUND";
pub const INVALID_PROVIDER_FUNC: &str = "INVALID_PROVIDER_FUNC";
pub const UNKNOWN_MARKER: &str = "UNKNOWN_MARKER";
pub const INTERFACE_COLLISION: &str = "INTERFACE_COLLISION";
pub const INVALID_INTERFACE: &str = "INVALID_INTERFACE";
pub const NO_IMPLEMENTATION: &str = "NO_IMPLEMENTATION";
pub const INVALID_SLICE: &str = "INVALID_SLICE";
pub const INVALID_SCOPE: &str = "INVALID_SCOPE";
pub const INVALID_ORDER: &str = "INVALID_ORDER";
pub const LOAD_FAILED: &str = "LOAD_FAILED";
pub const COMPILE_ERROR: &str = "COMPILE_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
