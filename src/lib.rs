pub mod editor {
    pub mod cell_input;
    pub mod dimensions;
}
pub mod engine {
    pub mod engine;
    pub mod engine_config;
    pub mod operation;
}
pub mod matrix {
    pub mod matrix;
    pub mod matrix_dense;
    pub mod matrix_error;
    #[cfg(feature = "python")]
    pub mod matrix_py;
}

pub mod utils;

pub use engine::engine::{MatrixEngine, Request};
pub use engine::engine_config::{DimensionBounds, EngineConfig};
pub use engine::operation::{Operation, OperationResult};
pub use matrix::matrix::Matrix;
pub use matrix::matrix_dense::{MatrixDense, RealElement};
pub use matrix::matrix_error::MatrixError;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn matrix_engine(_py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<matrix::matrix_py::MatrixPy>()?;
    m.add_function(wrap_pyfunction!(matrix::matrix_py::evaluate, m)?)?;
    m.add_function(wrap_pyfunction!(matrix::matrix_py::operations, m)?)?;
    Ok(())
}
