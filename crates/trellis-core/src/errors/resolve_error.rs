//! Resolution errors and contextual wrapping.

use super::error_code::{ErrorKind, TrellisErrorCode};
use super::{BindingError, ConfigError, MarkerError, PolicyError, ProviderError, StoreError};

/// Errors that can abort a resolution run.
/// Aggregates subsystem errors via `From` conversions.
///
/// The first failure ends the run; there is no partial graph and no error
/// accumulation.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Marker(#[from] MarkerError),

    #[error(transparent)]
    Policy(#[from] PolicyError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Binding(#[from] BindingError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<ResolveError>,
    },
}

impl ResolveError {
    /// Wrap this error with a context annotation.
    pub fn context(self, context: impl Into<String>) -> Self {
        Self::Context {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with all context layers removed.
    pub fn root(&self) -> &ResolveError {
        let mut current = self;
        while let Self::Context { source, .. } = current {
            current = source;
        }
        current
    }

    /// Context annotations from outermost to innermost.
    pub fn contexts(&self) -> Vec<&str> {
        let mut out = Vec::new();
        let mut current = self;
        while let Self::Context { context, source } = current {
            out.push(context.as_str());
            current = source;
        }
        out
    }
}

impl TrellisErrorCode for ResolveError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Store(e) => e.kind(),
            Self::Marker(e) => e.kind(),
            Self::Policy(e) => e.kind(),
            Self::Provider(e) => e.kind(),
            Self::Binding(e) => e.kind(),
            Self::Config(e) => e.kind(),
            Self::Context { source, .. } => source.kind(),
        }
    }
}

/// Context annotation for results that fail with a Trellis error.
pub trait ResultExt<T> {
    /// Annotate the error with a fixed context string.
    fn context(self, context: impl Into<String>) -> Result<T, ResolveError>;

    /// Annotate the error with a lazily built context string.
    fn with_context<C, F>(self, f: F) -> Result<T, ResolveError>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: Into<ResolveError>,
{
    fn context(self, context: impl Into<String>) -> Result<T, ResolveError> {
        self.map_err(|e| e.into().context(context))
    }

    fn with_context<C, F>(self, f: F) -> Result<T, ResolveError>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|e| e.into().context(f()))
    }
}
