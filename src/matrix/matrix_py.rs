use crate::engine::engine::MatrixEngine;
use crate::engine::operation::Operation;
use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_dense::MatrixDense;
use crate::matrix::matrix_error::MatrixError;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyType;

// --------------------------------------------------
//                      PYTHON
// --------------------------------------------------

impl From<MatrixError> for PyErr {
    fn from(error: MatrixError) -> PyErr {
        PyValueError::new_err(error.to_string())
    }
}

#[derive(Debug, Clone)]
#[pyclass(frozen, name = "Matrix")]
pub struct MatrixPy {
    inner: MatrixDense<f64>,
}

impl From<MatrixDense<f64>> for MatrixPy {
    fn from(inner: MatrixDense<f64>) -> Self {
        MatrixPy { inner }
    }
}

#[pymethods]
impl MatrixPy {
    #[classmethod]
    pub fn from_list(_cls: &Bound<PyType>, lines: Vec<Vec<f64>>) -> PyResult<Self> {
        Ok(MatrixDense::from_list(lines)?.into())
    }

    #[classmethod]
    pub fn zeros(_cls: &Bound<PyType>, rows: usize, cols: usize) -> Self {
        MatrixDense::zeros(rows, cols).into()
    }

    #[classmethod]
    pub fn identity(_cls: &Bound<PyType>, n: usize) -> Self {
        MatrixDense::identity(n).into()
    }

    pub fn to_list(&self) -> Vec<Vec<f64>> {
        self.inner.to_list()
    }

    #[getter]
    pub fn rows(&self) -> usize {
        self.inner.rows()
    }

    #[getter]
    pub fn cols(&self) -> usize {
        self.inner.cols()
    }

    #[getter]
    #[allow(non_snake_case)]
    pub fn T(&self) -> MatrixPy {
        self.inner.transpose().into()
    }

    pub fn __add__(&self, rhs: &MatrixPy) -> PyResult<MatrixPy> {
        Ok((&self.inner + &rhs.inner)?.into())
    }

    pub fn __sub__(&self, rhs: &MatrixPy) -> PyResult<MatrixPy> {
        Ok((&self.inner - &rhs.inner)?.into())
    }

    pub fn __mul__(&self, rhs: &MatrixPy) -> PyResult<MatrixPy> {
        Ok((&self.inner * &rhs.inner)?.into())
    }

    pub fn __repr__(&self) -> String {
        format!("Matrix({:?})", self.inner.to_list())
    }

    pub fn __str__(&self) -> String {
        self.inner.to_string()
    }

    pub fn determinant(&self) -> PyResult<f64> {
        Ok(self.inner.determinant()?)
    }

    pub fn rref(&self) -> MatrixPy {
        self.inner.rref().into()
    }

    pub fn is_rref(&self) -> bool {
        self.inner.is_rref()
    }

    pub fn with_cell(&self, row: usize, col: usize, text: &str) -> PyResult<MatrixPy> {
        Ok(self.inner.with_cell_input(row, col, text)?.into())
    }
}

/// Runs `operation` by name; a determinant comes back as a 1x1 matrix.
#[pyfunction]
#[pyo3(signature = (operation, a, b=None))]
pub fn evaluate(
    operation: &str,
    a: &MatrixPy,
    b: Option<PyRef<'_, MatrixPy>>,
) -> PyResult<MatrixPy> {
    let operation: Operation = operation.parse()?;
    let result =
        MatrixEngine::default().evaluate(operation, &a.inner, b.as_ref().map(|b| &b.inner))?;
    Ok(result.into_matrix().into())
}

/// Names of every supported operation, in menu order.
#[pyfunction]
pub fn operations() -> Vec<(&'static str, &'static str)> {
    Operation::ALL
        .iter()
        .map(|op| (op.name(), op.label()))
        .collect()
}
