//! The positional return grammar of provider functions.

use serde::{Deserialize, Serialize};

use crate::declarations::TypeRef;

/// Shape of a provider's results, selected once from its declared returns.
///
/// | Returns                | Variant                     |
/// |------------------------|-----------------------------|
/// | `T`                    | `Value`                     |
/// | `T, func()`            | `ValueWithCleanup`          |
/// | `T, error`             | `ValueWithError`            |
/// | `T, func(), error`     | `ValueWithCleanupAndError`  |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderOutcome {
    Value,
    ValueWithCleanup,
    ValueWithError,
    ValueWithCleanupAndError,
}

/// Why a result list does not fit the provider return grammar.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResultShapeError {
    #[error("must return 1, 2, or 3 values, found {0}")]
    Arity(usize),

    #[error("1st return value must neither be 'error' nor 'func()', found '{0}'")]
    FirstNotValue(String),

    #[error("2nd return value must be 'error' or 'func()', found '{0}'")]
    SecondNotErrorOrCleanup(String),

    #[error("2nd return value must be 'func()' when returning 3 values, found '{0}'")]
    SecondNotCleanup(String),

    #[error("3rd return value must be 'error' when returning 3 values, found '{0}'")]
    ThirdNotError(String),
}

impl ProviderOutcome {
    /// Classify a result list. Checks arity, then the first result, then the
    /// trailing results.
    pub fn classify(results: &[TypeRef]) -> Result<Self, ResultShapeError> {
        let first = match results {
            [first] | [first, _] | [first, _, _] => first,
            _ => return Err(ResultShapeError::Arity(results.len())),
        };
        if first.is_error() || first.is_cleanup() {
            return Err(ResultShapeError::FirstNotValue(first.to_string()));
        }

        match results {
            [_] => Ok(Self::Value),
            [_, second] if second.is_error() => Ok(Self::ValueWithError),
            [_, second] if second.is_cleanup() => Ok(Self::ValueWithCleanup),
            [_, second] => Err(ResultShapeError::SecondNotErrorOrCleanup(second.to_string())),
            [_, second, _] if !second.is_cleanup() => {
                Err(ResultShapeError::SecondNotCleanup(second.to_string()))
            }
            [_, _, third] if !third.is_error() => {
                Err(ResultShapeError::ThirdNotError(third.to_string()))
            }
            _ => Ok(Self::ValueWithCleanupAndError),
        }
    }

    pub fn has_cleanup(self) -> bool {
        matches!(self, Self::ValueWithCleanup | Self::ValueWithCleanupAndError)
    }

    pub fn has_error(self) -> bool {
        matches!(self, Self::ValueWithError | Self::ValueWithCleanupAndError)
    }
}
