//! Error taxonomy shared by the evaluator, basic mode and the base converter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Category of a failed calculation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed input or an identifier outside the whitelist.
    Syntax,
    /// Mathematically undefined operation, or a function called with the wrong arity.
    Domain,
    /// Division (or a negative power) of zero.
    DivisionByZero,
    /// Finite inputs produced a value too large for a double.
    Overflow,
    /// The base converter could not parse its input.
    InvalidFormat,
}

/// A calculation failure. Always returned to the caller, never raised as a panic.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CalcError {
    #[error("Syntax error: {0}")]
    Syntax(String),

    #[error("Domain error: {0}")]
    Domain(String),

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Overflow: {0}")]
    Overflow(String),

    #[error("Invalid number format.")]
    InvalidFormat,
}

impl CalcError {
    pub(crate) fn syntax(message: impl Into<String>) -> Self {
        Self::Syntax(message.into())
    }

    pub(crate) fn domain(message: impl Into<String>) -> Self {
        Self::Domain(message.into())
    }

    pub(crate) fn overflow(message: impl Into<String>) -> Self {
        Self::Overflow(message.into())
    }

    /// The category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Syntax(_) => ErrorKind::Syntax,
            Self::Domain(_) => ErrorKind::Domain,
            Self::DivisionByZero => ErrorKind::DivisionByZero,
            Self::Overflow(_) => ErrorKind::Overflow,
            Self::InvalidFormat => ErrorKind::InvalidFormat,
        }
    }

    /// The message without the category prefix.
    pub fn message(&self) -> String {
        match self {
            Self::Syntax(msg) | Self::Domain(msg) | Self::Overflow(msg) => msg.clone(),
            Self::DivisionByZero => "division by zero".to_string(),
            Self::InvalidFormat => "Invalid number format.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(CalcError::syntax("x").kind(), ErrorKind::Syntax);
        assert_eq!(CalcError::domain("x").kind(), ErrorKind::Domain);
        assert_eq!(CalcError::DivisionByZero.kind(), ErrorKind::DivisionByZero);
        assert_eq!(CalcError::overflow("x").kind(), ErrorKind::Overflow);
        assert_eq!(CalcError::InvalidFormat.kind(), ErrorKind::InvalidFormat);
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CalcError::syntax("empty expression").message(),
            "empty expression"
        );
        assert_eq!(
            CalcError::syntax("empty expression").to_string(),
            "Syntax error: empty expression"
        );
        assert_eq!(CalcError::InvalidFormat.to_string(), "Invalid number format.");
        assert_eq!(CalcError::InvalidFormat.message(), "Invalid number format.");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::DivisionByZero).unwrap();
        assert_eq!(json, "\"division_by_zero\"");
    }
}
