//! inference — clustered sandwich covariance for grouped samples.
//!
//! Purpose
//! -------
//! Provide the post-estimation covariance accumulation that complements the
//! rank-correlation engine: a clustered ("sandwich") estimator that folds
//! per-subject rank-1 score contributions into per-cluster sums and squares
//! them into a dense covariance accumulation matrix.
//!
//! Key behaviors
//! -------------
//! - Define a unified error and result type, [`InferenceError`] and
//!   [`InferenceResult`], for inference-specific failures (shape
//!   mismatches, empty samples).
//! - Build the clustered covariance via [`clustered_covariance`], which
//!   discovers cluster labels, forms each cluster's rank-1 sum as one
//!   dense matrix product, and folds the elementwise squares.
//!
//! Invariants & assumptions
//! ------------------------
//! - Residual rows index subjects, residual columns index outcomes; the
//!   design pseudoinverse carries one column per subject and one row per
//!   coefficient.
//! - All numerical routines return [`InferenceError`] on failure rather
//!   than panicking; callers are expected to handle these explicitly.
//! - This subtree is algorithmically independent of `correlation`; the
//!   two share only the crate's error-handling conventions and the
//!   optional Python marshalling layer in the crate root.
//!
//! Conventions
//! -----------
//! - Dense work uses `ndarray`; matrices are row-major with documented
//!   subject/coefficient/outcome axes.
//! - All functions are pure with respect to I/O: no logging, no global
//!   state, and no `unsafe` code paths.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the surface as
//!   `use rust_rankstats::inference::{clustered_covariance, InferenceResult};`.
//! - Python callers reach [`clustered_covariance`] through the
//!   feature-gated binding in the crate root, which owns array extraction.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`sandwich`] pin a hand-computed fixture, verify the
//!   grouped product against an explicit rank-1 loop, and exercise every
//!   shape-error branch.

pub mod errors;
pub mod sandwich;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{InferenceError, InferenceResult};
pub use self::sandwich::clustered_covariance;

// ---- Optional convenience prelude for downstream crates ------------------
//
// Downstream crates can `use rust_rankstats::inference::prelude::*;` to
// import the primary inference surface in a single line.

pub mod prelude {
    pub use super::errors::{InferenceError, InferenceResult};
    pub use super::sandwich::clustered_covariance;
}
