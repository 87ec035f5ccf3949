//! Error types for code construction and weight enumeration
//!
//! Every fallible operation in the crate returns [`CodeResult`]. Failures
//! abort the requested operation; no partially built matrix or histogram is
//! ever handed back alongside an error.

use thiserror::Error;

/// Main error type for loading, deriving and enumerating codes
#[derive(Error, Debug)]
pub enum CodeError {
    /// The alist source or sink could not be opened, read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or self-inconsistent alist text
    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Elimination ran out of columns before reaching the required pivot count
    #[error("Rank deficiency: found {rank} pivots, {required} required")]
    RankDeficiency { rank: usize, required: usize },

    /// Shapes that cannot be combined, or a size that does not fit the packing
    #[error("Dimension error: {0}")]
    Dimension(String),

    /// A derived generator matrix is not orthogonal to its parity-check matrix
    #[error("Generator check failed: G·H^T has {violations} nonzero entries")]
    NotOrthogonal { violations: usize },

    /// The worker pool for parallel enumeration could not be started
    #[error("Thread pool error: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Result type alias for this crate
pub type CodeResult<T> = Result<T, CodeError>;

impl CodeError {
    /// Create a parse error tied to a 1-based line number
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        CodeError::Parse {
            line,
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch(
        context: &str,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        CodeError::Dimension(format!(
            "{}: expected {}×{}, got {}×{}",
            context, expected.0, expected.1, actual.0, actual.1
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = CodeError::parse(3, "expected 7 column weights");
        assert_eq!(
            err.to_string(),
            "Parse error at line 3: expected 7 column weights"
        );

        let err = CodeError::RankDeficiency { rank: 2, required: 3 };
        assert_eq!(
            err.to_string(),
            "Rank deficiency: found 2 pivots, 3 required"
        );

        let err = CodeError::dimension_mismatch("binary product", (3, 4), (3, 5));
        assert_eq!(
            err.to_string(),
            "Dimension error: binary product: expected 3×4, got 3×5"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.alist");
        let err: CodeError = io.into();
        assert!(matches!(err, CodeError::Io(_)));
    }
}
