//! Unified error handling for inference routines.
//!
//! This module defines `InferenceError`, the central error type used by
//! the clustered sandwich covariance estimator and related inference
//! utilities. It groups domain-specific failures (shape mismatches,
//! empty samples) with catch-all and fallback variants. An alias
//! `InferenceResult<T>` standardizes the return type across inference
//! code.

/// Unified error type for inference routines.
///
/// Covers dimension mismatches between the residual matrix, the design
/// pseudoinverse, and the group labels, plus generic passthrough errors.
/// Designed to integrate with `anyhow::Error` via `From`, and to provide
/// readable diagnostics through `Display`.
#[derive(Debug, Clone, PartialEq)]
pub enum InferenceError {
    // ---- Clustered covariance ----
    /// The design pseudoinverse does not have one column per subject.
    DesignSubjectMismatch {
        design_cols: usize,
        subjects: usize,
    },

    /// The group-label vector does not have one entry per subject.
    GroupLengthMismatch {
        labels: usize,
        subjects: usize,
    },

    /// No subjects were supplied, so no covariance can be accumulated.
    EmptySample,

    // ---- Anyhow catchall ----
    Anyhow(String),

    // ---- Fallback ----
    UnknownError,
}

pub type InferenceResult<T> = Result<T, InferenceError>;

impl std::error::Error for InferenceError {}

impl From<anyhow::Error> for InferenceError {
    fn from(err: anyhow::Error) -> Self {
        InferenceError::Anyhow(err.to_string())
    }
}

impl std::fmt::Display for InferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Clustered covariance ----
            InferenceError::DesignSubjectMismatch { design_cols, subjects } => write!(
                f,
                "Inference Error: design pseudoinverse has {} columns but {} subjects were supplied",
                design_cols, subjects
            ),
            InferenceError::GroupLengthMismatch { labels, subjects } => write!(
                f,
                "Inference Error: {} group labels supplied for {} subjects",
                labels, subjects
            ),
            InferenceError::EmptySample => {
                write!(f, "Inference Error: residual matrix has no rows")
            }

            // ---- Anyhow catchall ----
            InferenceError::Anyhow(msg) => write!(f, "Inference Error: {}", msg),

            // ---- Fallback ----
            InferenceError::UnknownError => write!(f, "Inference Error: Unknown error occurred"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<InferenceError> for pyo3::PyErr {
    fn from(err: InferenceError) -> pyo3::PyErr {
        pyo3::exceptions::PyValueError::new_err(format!("{err}"))
    }
}
