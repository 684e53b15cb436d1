//! Error types.
//!
//! Every failure is a value. Messages are meant to be shown to whoever sent
//! the request, so they stay short and human readable.

use thiserror::Error;

/// Invalid input to a geometry primitive.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("Paths cannot be empty")]
    EmptyInput,

    #[error("Can't divide by zero!")]
    DivideByZero,

    /// A coordinate is too large for the clipping engine.
    #[error("coordinate {value} is outside the clipping range")]
    OutOfRange { value: i64 },
}

/// Pattern lookup and construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// The identifier is not in the pattern table.
    #[error("Pattern: {name} is unknown")]
    UnknownPattern { name: String },

    /// The identifier is known but nothing builds a generator for it.
    #[error("Pattern {name}, does not have a generator!")]
    NoGenerator { name: String },
}

/// Failures inside a single generation call.
///
/// Generators log these and fall back to empty output; `try_generate`
/// hands them to callers that want to see them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error("numeric domain error: {0}")]
    NumericDomain(String),
}

/// Problems reading print settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("missing setting: {0}")]
    Missing(String),

    #[error("invalid value for setting {key}: {value:?}")]
    Invalid { key: String, value: String },
}

/// Any error the crate can produce.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Pattern(#[from] PatternError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_errors_are_distinguishable() {
        let unknown = PatternError::UnknownPattern { name: "FOO".into() };
        let missing = PatternError::NoGenerator { name: "FOO".into() };
        assert_eq!(unknown.to_string(), "Pattern: FOO is unknown");
        assert_eq!(missing.to_string(), "Pattern FOO, does not have a generator!");
        assert_ne!(unknown, missing);
    }

    #[test]
    fn wrapped_errors_keep_their_message() {
        let err: Error = GeometryError::EmptyInput.into();
        assert_eq!(err.to_string(), "Paths cannot be empty");

        let err: Error = GenerateError::from(GeometryError::EmptyInput).into();
        assert_eq!(err.to_string(), "Paths cannot be empty");
    }
}
