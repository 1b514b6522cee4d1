use crate::matrix::matrix_dense::{MatrixDense, RealElement};
use crate::matrix::matrix_error::MatrixError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Transpose,
    Determinant,
    Rref,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Transpose,
        Operation::Determinant,
        Operation::Rref,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Subtract => "subtract",
            Operation::Multiply => "multiply",
            Operation::Transpose => "transpose",
            Operation::Determinant => "determinant",
            Operation::Rref => "rref",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Operation::Add => "Addition (A + B)",
            Operation::Subtract => "Subtraction (A - B)",
            Operation::Multiply => "Multiplication (A × B)",
            Operation::Transpose => "Transpose (A^T)",
            Operation::Determinant => "Determinant (det A)",
            Operation::Rref => "RREF (A)",
        }
    }

    /// Whether the operation reads a second matrix.
    pub fn is_binary(self) -> bool {
        matches!(
            self,
            Operation::Add | Operation::Subtract | Operation::Multiply
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Operation {
    type Err = MatrixError;

    fn from_str(s: &str) -> Result<Operation, MatrixError> {
        let name = s.trim();
        Operation::ALL
            .into_iter()
            .find(|op| op.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| MatrixError::UnknownOperation(name.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult<T = f64> {
    Matrix(MatrixDense<T>),
    Scalar(T),
}

impl<T: RealElement> OperationResult<T> {
    pub fn as_matrix(&self) -> Option<&MatrixDense<T>> {
        match self {
            OperationResult::Matrix(m) => Some(m),
            OperationResult::Scalar(_) => None,
        }
    }

    pub fn as_scalar(&self) -> Option<T> {
        match self {
            OperationResult::Matrix(_) => None,
            OperationResult::Scalar(x) => Some(*x),
        }
    }

    /// A scalar becomes a 1x1 matrix.
    pub fn into_matrix(self) -> MatrixDense<T> {
        match self {
            OperationResult::Matrix(m) => m,
            OperationResult::Scalar(x) => MatrixDense::scalar(x),
        }
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
