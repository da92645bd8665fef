//! correlation::errors — shared error types for rank-correlation routines.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias for the Kendall tau-b engine and
//! its validation helpers, together with a conversion layer to Python
//! exceptions for PyO3-based bindings. Degenerate statistical inputs are
//! reported as structured values rather than propagated as NaN or panics.
//!
//! Key behaviors
//! -------------
//! - Define [`TauResult`] and [`TauError`] as the canonical result and error
//!   types for the rank-correlation subtree.
//! - Attach human-readable `Display` messages to each variant so that
//!   diagnostics are meaningful without additional context.
//! - Implement `From<TauError> for PyErr` to surface Rust-side failures as
//!   `ValueError` to Python callers when the `python-bindings` feature is on.
//!
//! Invariants & assumptions
//! ------------------------
//! - Modules that use this error type validate their inputs (lengths,
//!   finiteness) and return [`TauResult<T>`] instead of panicking.
//! - `TauError` values are small, cheap to clone, and safe to use in unit
//!   tests and higher-level orchestration code.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints (e.g.
//!   "need at least 2 observations") rather than implementation details.
//! - Internal invariant violations (a tree lookup that cannot miss, a NaN
//!   key past validation) are NOT represented here; they abort with a
//!   diagnostic because they indicate a programming defect, not bad input.
//!
//! Downstream usage
//! ----------------
//! - `correlation::validation` and `correlation::kendall` return
//!   [`TauResult<T>`] to propagate failures cleanly to callers.
//! - Python bindings rely on the `From<TauError>` conversion to raise
//!   `ValueError` instead of returning results explicitly.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload (offending value, lengths, axis).

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type TauResult<T> = Result<T, TauError>;

/// Sample dimension of a paired observation, used in degeneracy reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleAxis {
    X,
    Y,
}

impl std::fmt::Display for SampleAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SampleAxis::X => write!(f, "x"),
            SampleAxis::Y => write!(f, "y"),
        }
    }
}

/// TauError — error conditions for the Kendall tau-b computation.
///
/// Purpose
/// -------
/// Represent all validation and degeneracy failures that can occur when
/// computing the tie-corrected tau-b statistic, including malformed inputs
/// and dimensions with no rank variation.
///
/// Variants
/// --------
/// - `LengthMismatch { x_len, y_len }`
///   The two input sequences do not have the same length, so they cannot
///   be paired.
/// - `InsufficientData { len }`
///   Fewer than 2 paired observations; no pair exists to classify, so the
///   statistic is undefined.
/// - `InvalidData(value)`
///   An input element is non-finite (NaN or ±∞) and would poison both the
///   sort order and the tree ranks.
/// - `DegenerateAxis(axis)`
///   Every value along `axis` is tied, so the tau-b denominator factor for
///   that dimension is zero and the statistic is undefined.
/// - `NonPositiveVariance { variance }`
///   The tie-corrected variance of the concordance difference evaluated to
///   a non-positive number, so no z-score or p-value can be formed.
///
/// Invariants
/// ----------
/// - Each variant carries just enough information (offending value, lengths,
///   or axis) for logging and debugging without dragging data along.
///
/// Notes
/// -----
/// - Implements [`std::error::Error`] and [`std::fmt::Display`] for
///   idiomatic `?`-based propagation.
/// - With the `python-bindings` feature, `From<TauError> for PyErr` maps
///   every case to `ValueError` with the `Display` message preserved.
#[derive(Debug, Clone, PartialEq)]
pub enum TauError {
    //------ Input validation errors ------
    LengthMismatch { x_len: usize, y_len: usize },
    InsufficientData { len: usize },
    InvalidData(f64),
    //------ Degenerate statistics ------
    DegenerateAxis(SampleAxis),
    NonPositiveVariance { variance: f64 },
}

impl std::error::Error for TauError {}

impl std::fmt::Display for TauError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TauError::LengthMismatch { x_len, y_len } => {
                write!(f, "Input lengths differ: x has {x_len} observations, y has {y_len}.")
            }
            TauError::InsufficientData { len } => {
                write!(f, "Need at least 2 paired observations to form a pair; got {len}.")
            }
            TauError::InvalidData(value) => {
                write!(f, "Invalid data value: {value}. Must be a finite number.")
            }
            TauError::DegenerateAxis(axis) => {
                write!(
                    f,
                    "All {axis} values are tied; the tau-b denominator is zero and the \
                     statistic is undefined."
                )
            }
            TauError::NonPositiveVariance { variance } => {
                write!(
                    f,
                    "Tie-corrected variance is not positive ({variance}); no z-score or \
                     p-value can be derived."
                )
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<TauError> for PyErr {
    fn from(err: TauError) -> PyErr {
        PyValueError::new_err(format!("TauError: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Basic `Display` formatting for TauError variants.
    // - Embedding of payload values (lengths, offending value, axis) into
    //   error messages.
    //
    // They intentionally DO NOT cover:
    // - The `From<TauError> for PyErr` conversion, which requires linking
    //   against the Python C API and is exercised by Python-level tests.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Verify that `TauError::LengthMismatch` embeds both offending lengths
    // in its `Display` representation.
    //
    // Given
    // -----
    // - A `LengthMismatch` with x_len = 4 and y_len = 7.
    //
    // Expect
    // ------
    // - The message contains both "4" and "7".
    fn tau_error_length_mismatch_includes_both_lengths() {
        // Arrange
        let err = TauError::LengthMismatch { x_len: 4, y_len: 7 };

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains('4') && msg.contains('7'), "message should name both lengths: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Verify that `TauError::InvalidData` includes the offending value in
    // its `Display` representation.
    //
    // Given
    // -----
    // - An `InvalidData` carrying `f64::INFINITY`.
    //
    // Expect
    // ------
    // - The message contains "inf".
    fn tau_error_invalid_data_includes_payload() {
        // Arrange
        let err = TauError::InvalidData(f64::INFINITY);

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("inf"), "message should include the offending value: {msg}");
    }

    #[test]
    // Purpose
    // -------
    // Ensure that `TauError::DegenerateAxis` names the tied dimension.
    //
    // Given
    // -----
    // - A `DegenerateAxis` for the y dimension.
    //
    // Expect
    // ------
    // - The message contains "y" and mentions the tie.
    fn tau_error_degenerate_axis_names_dimension() {
        // Arrange
        let err = TauError::DegenerateAxis(SampleAxis::Y);

        // Act
        let msg = err.to_string();

        // Assert
        assert!(msg.contains("All y values are tied"), "message should name the axis: {msg}");
    }
}
