//! Error kinds for errchain

use std::fmt;

/// The kind of a managed error.
///
/// Callers match on the kind (or on the [`ChainableError`](crate::ChainableError)
/// variant) to decide whether a condition is worth recovering from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An expected domain condition, e.g. validation failed or a record is missing
    Error,

    /// An unexpected condition, e.g. an infrastructure fault or a foreign error
    Failure,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Error => "error",
            ErrorKind::Failure => "failure",
        }
    }

    /// Check if this is the expected-error kind
    pub fn is_error(&self) -> bool {
        matches!(self, ErrorKind::Error)
    }

    /// Check if this is the unexpected-failure kind
    pub fn is_failure(&self) -> bool {
        matches!(self, ErrorKind::Failure)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::Error.to_string(), "error");
        assert_eq!(ErrorKind::Failure.to_string(), "failure");
    }

    #[test]
    fn test_kind_predicates() {
        assert!(ErrorKind::Error.is_error());
        assert!(!ErrorKind::Error.is_failure());
        assert!(ErrorKind::Failure.is_failure());
        assert!(!ErrorKind::Failure.is_error());
    }
}
