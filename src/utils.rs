#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1, PyReadonlyArray2,
};

/// Extract a contiguous 1-D float64 array from a numpy array, pandas
/// Series, or any sequence of floats, copying only when necessary.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Extract a 2-D float64 array for the clustered covariance estimator.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_matrix<'py>(
    raw_data: &Bound<'py, PyAny>, name: &str,
) -> PyResult<PyReadonlyArray2<'py, f64>> {
    raw_data.extract::<PyReadonlyArray2<f64>>().map_err(|_| {
        PyValueError::new_err(format!("{name} must be a 2-D numpy.ndarray of float64"))
    })
}

/// Extract per-subject cluster labels as non-negative integers.
#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_group_labels(raw_labels: &Bound<'_, PyAny>) -> PyResult<Vec<usize>> {
    raw_labels.extract::<Vec<usize>>().map_err(|_| {
        PyValueError::new_err("groups must be a sequence of non-negative integer labels")
    })
}
