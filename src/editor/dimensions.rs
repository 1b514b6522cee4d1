use crate::engine::engine_config::DimensionBounds;
use crate::matrix::matrix_dense::{MatrixDense, RealElement};
use crate::matrix::matrix_error::MatrixError;

/// Shape of an editable matrix, always inside the bounds it was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    rows: usize,
    cols: usize,
}

impl Dimensions {
    /// Rejects non-positive sizes, then clamps each axis into `bounds`.
    pub fn new(rows: i64, cols: i64, bounds: &DimensionBounds) -> Result<Self, MatrixError> {
        if rows <= 0 || cols <= 0 {
            return Err(MatrixError::InvalidDimensions { rows, cols });
        }

        Ok(Dimensions {
            rows: bounds.clamp(usize::try_from(rows).unwrap_or(usize::MAX)),
            cols: bounds.clamp(usize::try_from(cols).unwrap_or(usize::MAX)),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn zeros<T: RealElement>(&self) -> MatrixDense<T> {
        MatrixDense::zeros(self.rows, self.cols)
    }

    /// Refit `matrix` to these dimensions, keeping the cells that still fit.
    pub fn apply<T: RealElement>(&self, matrix: &MatrixDense<T>) -> MatrixDense<T> {
        matrix.resized(self.rows, self.cols)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
