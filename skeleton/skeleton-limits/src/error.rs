//! Error types for limit evaluation and pose loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for limit table construction and evaluation.
pub type LimitResult<T> = Result<T, LimitError>;

/// Result type for pose loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Errors raised by the limit table and the violation evaluator.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LimitError {
    /// No bound is configured for the requested pose parameter.
    #[error("no limit defined for qid {qid}")]
    UndefinedLimit {
        /// The unconstrained parameter index.
        qid: usize,
    },

    /// A limit names a parameter the skeleton definition does not know.
    #[error("unknown pose parameter: {name}")]
    UnknownParameter {
        /// The unrecognized parameter name.
        name: String,
    },

    /// A skeleton definition lists the same parameter twice.
    #[error("duplicate pose parameter: {name}")]
    DuplicateParameter {
        /// The repeated parameter name.
        name: String,
    },

    /// A configured bound is `NaN` or infinite.
    #[error("non-finite bound for pose parameter {name}")]
    NonFiniteBound {
        /// The parameter whose bound is invalid.
        name: String,
    },

    /// Tolerance must be finite and non-negative.
    #[error("invalid tolerance: {0} degrees (must be finite and non-negative)")]
    InvalidTolerance(f64),

    /// Pose data does not have the expected number of parameters.
    #[error("shape mismatch: expected {expected} pose parameters, found {found}")]
    ShapeMismatch {
        /// Expected parameter count.
        expected: usize,
        /// Parameter count actually supplied.
        found: usize,
    },
}

impl LimitError {
    /// Create an undefined limit error.
    #[must_use]
    pub const fn undefined(qid: usize) -> Self {
        Self::UndefinedLimit { qid }
    }

    /// Create an unknown parameter error.
    #[must_use]
    pub fn unknown_parameter(name: impl Into<String>) -> Self {
        Self::UnknownParameter { name: name.into() }
    }

    /// Create a shape mismatch error.
    #[must_use]
    pub const fn shape_mismatch(expected: usize, found: usize) -> Self {
        Self::ShapeMismatch { expected, found }
    }

    /// Check if this is an undefined limit lookup.
    #[must_use]
    pub fn is_undefined_limit(&self) -> bool {
        matches!(self, Self::UndefinedLimit { .. })
    }
}

/// Errors raised while loading persisted pose data.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The container has no pose entry.
    #[error("'{key}' not found in {}. Available keys: {available:?}", path.display())]
    MissingDataKey {
        /// The key that was expected.
        key: String,
        /// Where the data came from.
        path: PathBuf,
        /// Keys actually present, sorted.
        available: Vec<String>,
    },

    /// A frame does not hold exactly the expected number of parameters.
    #[error(
        "pose frames should have {expected} parameters, but frame {frame} has {found} parameters"
    )]
    ShapeMismatch {
        /// Expected parameter count.
        expected: usize,
        /// Parameter count actually found.
        found: usize,
        /// First frame with the wrong shape.
        frame: usize,
    },

    /// Content parsed but is not a pose container.
    #[error("invalid pose content: {message}")]
    InvalidContent {
        /// Description of what was invalid.
        message: String,
    },

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoadError {
    /// Create an `InvalidContent` error with the given message.
    #[must_use]
    pub fn invalid_content(message: impl Into<String>) -> Self {
        Self::InvalidContent {
            message: message.into(),
        }
    }
}
