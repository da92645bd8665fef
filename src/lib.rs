//! rust_rankstats — fast rank-based statistics with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the rank-correlation and clustered-covariance routines to Python
//! via the `_rust_rankstats` extension module. When the `python-bindings`
//! feature is enabled, this module defines the Python-facing classes and
//! submodules used by the `rust_rankstats` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`correlation` and `inference`) as the
//!   public crate surface.
//! - Define `#[pyclass]`/`#[pyfunction]` wrappers and the `#[pymodule]`
//!   initializer for the `_rust_rankstats` Python extension.
//! - Create and register Python submodules (`correlation`, `inference`)
//!   under `rust_rankstats` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All heavy numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input marshalling, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror the
//!   invariants and signatures of their Rust counterparts
//!   ([`TauOutcome`], [`clustered_covariance`](inference::clustered_covariance)).
//! - Shape and dtype validation of caller-provided arrays happens here and
//!   in `utils`, before any slice reaches the core; degenerate statistical
//!   inputs are still detected by the core itself.
//!
//! Conventions
//! -----------
//! - Python-exposed items live under `_rust_rankstats.<submodule>` and are
//!   typically wrapped by thin pure-Python facades in the top-level
//!   `rust_rankstats` package.
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `ValueError` at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on the inner modules and can
//!   ignore the PyO3 items guarded by the `python-bindings` feature.
//! - The Python packaging layer imports the `_rust_rankstats` module defined
//!   here and wraps its classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules
//!   and by the integration and property tests under `tests/`.
//! - Smoke tests for the PyO3 bindings verify that classes can be
//!   constructed, called, and round-tripped correctly from Python.

pub mod correlation;
pub mod inference;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray2};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    correlation::kendall::TauOutcome,
    utils::{extract_f64_array, extract_f64_matrix, extract_group_labels},
};

/// KendallTau — Python-facing wrapper for the tie-corrected tau-b statistic.
///
/// Purpose
/// -------
/// Represent the result of a Kendall tau-b computation when called from
/// Python and forward all computation to [`TauOutcome`].
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs into contiguous `f64` slices.
/// - Run the core via [`TauOutcome::kendall_tau_b`] and store the outcome
///   internally.
/// - Expose scalar accessors (`statistic`, `zscore`, `pvalue`) as Python
///   properties; the latter two are `None` for samples of size 2, where
///   the tie-corrected variance is undefined.
///
/// Parameters
/// ----------
/// Constructed from Python via `KendallTau(x, y)`:
/// - `x`, `y`: array-like
///   One-dimensional float64 arrays of equal length ≥ 2 with no NaNs.
///
/// Fields
/// ------
/// - `inner`: [`TauOutcome`]
///   Rust-side container holding the full outcome used by the accessors.
///
/// Invariants
/// ----------
/// - `inner` was produced by a successful core computation; degenerate
///   inputs raise `ValueError` at construction time instead.
///
/// Notes
/// -----
/// - Native Rust callers should use [`TauOutcome`] directly; this type
///   exists solely for the PyO3 binding surface.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "rust_rankstats.correlation")]
pub struct KendallTau {
    /// Underlying Rust outcome.
    pub inner: TauOutcome,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl KendallTau {
    #[new]
    #[pyo3(signature = (x, y), text_signature = "(x, y, /)")]
    pub fn new<'py>(
        py: Python<'py>, x: &Bound<'py, PyAny>, y: &Bound<'py, PyAny>,
    ) -> PyResult<Self> {
        let x_arr = extract_f64_array(py, x)?;
        let y_arr = extract_f64_array(py, y)?;
        let x_slice = x_arr
            .as_slice()
            .map_err(|_| PyValueError::new_err("x must be a 1-D contiguous float64 array"))?;
        let y_slice = y_arr
            .as_slice()
            .map_err(|_| PyValueError::new_err("y must be a 1-D contiguous float64 array"))?;

        let inner = TauOutcome::kendall_tau_b(x_slice, y_slice)?;
        Ok(KendallTau { inner })
    }

    /// The tie-corrected tau-b statistic.
    #[getter]
    pub fn statistic(&self) -> f64 {
        self.inner.tau()
    }

    /// The continuity-corrected normal z-score, or None for n = 2.
    #[getter]
    pub fn zscore(&self) -> Option<f64> {
        self.inner.z_score()
    }

    /// The two-tailed p-value, or None for n = 2.
    #[getter]
    pub fn pvalue(&self) -> Option<f64> {
        self.inner.p_value()
    }
}

/// Clustered sandwich covariance accumulation for grouped subjects.
///
/// Accepts a 2-D residual matrix (subjects × outcomes), a 2-D design
/// pseudoinverse (coefficients × subjects), and a sequence of per-subject
/// cluster labels; returns the coefficients × outcomes matrix of squared
/// cluster sums. Shape mismatches raise `ValueError`.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(name = "clustered_covariance", signature = (residuals, design_pinv, groups),
       text_signature = "(residuals, design_pinv, groups, /)")]
fn clustered_covariance_py<'py>(
    py: Python<'py>, residuals: &Bound<'py, PyAny>, design_pinv: &Bound<'py, PyAny>,
    groups: &Bound<'py, PyAny>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let residuals_arr = extract_f64_matrix(residuals, "residuals")?;
    let design_arr = extract_f64_matrix(design_pinv, "design_pinv")?;
    let labels = extract_group_labels(groups)?;

    let cov =
        inference::clustered_covariance(residuals_arr.as_array(), design_arr.as_array(), &labels)?;
    Ok(cov.into_pyarray(py))
}

/// _rust_rankstats — PyO3 module initializer for the Python extension.
///
/// Creates the `correlation` and `inference` submodules, attaches them to
/// the parent `_rust_rankstats` module, and registers them in `sys.modules`
/// so they are importable via dotted paths from Python. Invoked
/// automatically on import; never called by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_rankstats<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let correlation_mod = PyModule::new(_py, "correlation")?;
    let inference_mod = PyModule::new(_py, "inference")?;
    correlation_submodule(_py, m, &correlation_mod)?;
    inference_submodule(_py, m, &inference_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_rankstats.correlation", correlation_mod)?;

    _py.import("sys")?
        .getattr("modules")?
        .set_item("rust_rankstats.inference", inference_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn correlation_submodule<'py>(
    _py: Python, rust_rankstats: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<KendallTau>()?;
    rust_rankstats.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn inference_submodule<'py>(
    _py: Python, rust_rankstats: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(clustered_covariance_py, m)?)?;
    rust_rankstats.add_submodule(m)?;
    Ok(())
}
