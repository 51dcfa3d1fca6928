//! Error types for model building and optimization
//!
//! All fallible operations of the crate return [`Result`], whose error side is
//! the [`Error`] enum. Failures reported by a solver backend are carried
//! verbatim in an [`OptimizeError`].

use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or optimizing a model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The model violates a structural precondition and was never handed to a solver.
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// Vector-style builders were given inputs of different lengths.
    #[error("shape mismatch: {vars} variables but {coeffs} coefficients")]
    ShapeMismatch { vars: usize, coeffs: usize },

    /// A row, column or variable index fell outside the addressed collection.
    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    /// The solver backend reported a nonzero error code.
    #[error(transparent)]
    Optimize(#[from] OptimizeError),

    /// The solver backend could not be selected or created.
    #[error("solver backend: {0}")]
    Backend(String),
}

/// Failure reported by a solver backend, carrying its own code and message.
///
/// Two `OptimizeError`s are considered the same error when their codes match;
/// the message is informational only.
#[derive(Error, Debug, Clone)]
#[error("[Code = {code}] {message}")]
pub struct OptimizeError {
    pub code: i32,
    pub message: String,
}

impl OptimizeError {
    /// Code reported by a backend when no error occurred.
    pub const NO_ERROR: i32 = 0;

    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Returns true if `err` is an `OptimizeError` (bare or wrapped in [`Error::Optimize`])
    /// with the same code as `self`.
    pub fn is(&self, err: &(dyn std::error::Error + 'static)) -> bool {
        if let Some(other) = err.downcast_ref::<OptimizeError>() {
            return other.code == self.code;
        }
        match err.downcast_ref::<Error>() {
            Some(Error::Optimize(other)) => other.code == self.code,
            _ => false,
        }
    }
}

impl PartialEq for OptimizeError {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for OptimizeError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimize_error_display() {
        let err = OptimizeError::new(2, "This problem is infeasible");
        assert_eq!(err.to_string(), "[Code = 2] This problem is infeasible");

        let wrapped = Error::from(err);
        assert_eq!(wrapped.to_string(), "[Code = 2] This problem is infeasible");
    }

    #[test]
    fn test_same_code_different_message_is_same_error() {
        let a = OptimizeError::new(3, "unbounded");
        let b = OptimizeError::new(3, "something else entirely");

        assert_eq!(a, b);
        assert!(a.is(&b));
        assert!(b.is(&Error::Optimize(a.clone())));
    }

    #[test]
    fn test_different_codes_are_different_errors() {
        let a = OptimizeError::new(1, "suboptimal");
        let b = OptimizeError::new(2, "suboptimal");

        assert_ne!(a, b);
        assert!(!a.is(&b));
    }

    #[test]
    fn test_real_code_never_equals_absent_error() {
        let sentinel = OptimizeError::new(OptimizeError::NO_ERROR, "");
        let io = std::io::Error::other("not an optimize error");

        // Errors carrying no code never match, not even the sentinel
        assert!(!sentinel.is(&io));
        assert!(!sentinel.is(&Error::InvalidModel("no variables in model".into())));
        assert!(!OptimizeError::new(1, "suboptimal").is(&Error::Backend(io.to_string())));
    }

    #[test]
    fn test_no_error_sentinel_compares_by_code() {
        let ok = OptimizeError::new(OptimizeError::NO_ERROR, "");
        assert_eq!(ok, OptimizeError::new(0, "No error"));
        assert_ne!(ok, OptimizeError::new(7, "timeout"));
    }
}
