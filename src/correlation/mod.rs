//! correlation — tie-corrected rank correlation and its infrastructure.
//!
//! Purpose
//! -------
//! Collect the Kendall tau-b engine and its shared infrastructure: the
//! augmented order-statistics tree that makes the counting pass
//! O(n log n), common input validation, and error handling, including
//! Python bridges for PyO3-based bindings.
//!
//! Key behaviors
//! -------------
//! - Expose the tie-corrected tau-b statistic via [`TauOutcome`] and its
//!   constructor [`TauOutcome::kendall_tau_b`](kendall::TauOutcome::kendall_tau_b).
//! - Provide the duplicate-counting, rank-reporting search tree
//!   [`OrderStatTree`] used by the counting passes (public so its
//!   order-statistics contract can be reused and property-tested).
//! - Centralize paired-input guards in [`validate_paired_input`] and
//!   structured failures in [`TauError`]/[`TauResult`].
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs to the statistic are finite, real-valued, equal-length
//!   sequences; [`validate_paired_input`] is called before any sorting or
//!   tree work.
//! - Routines in this subtree report failures via [`TauResult`] and never
//!   panic on user-facing invalid inputs; panics indicate programming
//!   errors (an incomparable key past validation).
//! - Each computation owns its trees exclusively and releases them on
//!   every exit path; nothing in this subtree is shared or `'static`.
//!
//! Conventions
//! -----------
//! - Error messages are phrased in terms of domain constraints ("need at
//!   least 2 paired observations") rather than implementation details.
//! - At the Python boundary, all [`TauError`] values are mapped into
//!   `ValueError` with the Rust `Display` message preserved verbatim.
//!
//! Downstream usage
//! ----------------
//! - Typical Rust code imports the main surface as:
//!
//!   ```rust
//!   use rust_rankstats::correlation::{TauOutcome, TauResult};
//!
//!   fn correlate(x: &[f64], y: &[f64]) -> TauResult<f64> {
//!       let outcome: TauOutcome = TauOutcome::kendall_tau_b(x, y)?;
//!       Ok(outcome.tau())
//!   }
//!   ```
//!
//! Testing notes
//! -------------
//! - Unit tests live beside each module; end-to-end scenarios and
//!   naive-reference property tests live under `tests/`.

pub mod errors;
pub mod kendall;
pub mod order_tree;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{SampleAxis, TauError, TauResult};
pub use self::kendall::TauOutcome;
pub use self::order_tree::OrderStatTree;
pub use self::validation::validate_paired_input;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_rankstats::correlation::prelude::*;
//
// to import the main rank-correlation surface in a single line.

pub mod prelude {
    pub use super::errors::{TauError, TauResult};
    pub use super::kendall::TauOutcome;
}
