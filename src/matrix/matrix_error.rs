use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MatrixError {
    #[error(
        "Matrices must have the same dimensions for {operation} ({left_rows}x{left_cols} vs {right_rows}x{right_cols})"
    )]
    DimensionMismatch {
        operation: &'static str,
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    #[error(
        "Number of columns in first matrix ({left_cols}) must equal number of rows in second matrix ({right_rows})"
    )]
    IncompatibleShapeForProduct { left_cols: usize, right_rows: usize },

    #[error("Matrix must be square to calculate determinant (got {rows}x{cols})")]
    NotSquare { rows: usize, cols: usize },

    #[error("Matrix is empty, {operation} needs at least one row")]
    EmptyMatrix { operation: &'static str },

    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRows {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("A non-empty matrix must have at least one column")]
    ZeroColumns,

    #[error("Cell ({row}, {col}) is outside a {rows}x{cols} matrix")]
    IndexOutOfBounds {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },

    #[error("Rows and columns must be positive numbers (got {rows}x{cols})")]
    InvalidDimensions { rows: i64, cols: i64 },

    #[error("Second matrix is required for {operation}")]
    MissingOperand { operation: &'static str },

    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    #[error("Determinant of order {order} exceeds the configured limit of {limit}")]
    TooLarge { order: usize, limit: usize },
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
