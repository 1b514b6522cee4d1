use log::debug;
use rayon::prelude::*;

use crate::editor::dimensions::Dimensions;
use crate::engine::engine_config::EngineConfig;
use crate::engine::operation::{Operation, OperationResult};
use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_dense::{MatrixDense, RealElement};
use crate::matrix::matrix_error::MatrixError;

/// One independent unit of work for `MatrixEngine::evaluate_batch`.
#[derive(Debug, Clone, PartialEq)]
pub struct Request<T = f64> {
    pub operation: Operation,
    pub a: MatrixDense<T>,
    pub b: Option<MatrixDense<T>>,
}

impl<T: RealElement> Request<T> {
    pub fn unary(operation: Operation, a: MatrixDense<T>) -> Self {
        Request {
            operation,
            a,
            b: None,
        }
    }

    pub fn binary(operation: Operation, a: MatrixDense<T>, b: MatrixDense<T>) -> Self {
        Request {
            operation,
            a,
            b: Some(b),
        }
    }
}

/// Stateless dispatcher over the matrix operations. The only thing it holds
/// is its configuration, so a single engine can be shared between threads.
#[derive(Debug, Clone, Default)]
pub struct MatrixEngine {
    config: EngineConfig,
}

impl MatrixEngine {
    pub fn new(config: EngineConfig) -> Self {
        MatrixEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn evaluate<T: RealElement>(
        &self,
        operation: Operation,
        a: &MatrixDense<T>,
        b: Option<&MatrixDense<T>>,
    ) -> Result<OperationResult<T>, MatrixError> {
        debug!(
            "{}: a={}x{} b={}",
            operation,
            a.rows(),
            a.cols(),
            b.map_or("-".to_string(), |b| format!("{}x{}", b.rows(), b.cols()))
        );

        let result = self.dispatch(operation, a, b);
        if let Err(error) = &result {
            debug!("{} failed: {}", operation, error);
        }
        result
    }

    /// Runs every request on the rayon pool, results come back in request
    /// order.
    pub fn evaluate_batch<T: RealElement>(
        &self,
        requests: &[Request<T>],
    ) -> Vec<Result<OperationResult<T>, MatrixError>> {
        debug!("batch of {} requests", requests.len());
        requests
            .par_iter()
            .map(|req| self.evaluate(req.operation, &req.a, req.b.as_ref()))
            .collect()
    }

    /// Validates and clamps a requested editor size against the configured
    /// bounds.
    pub fn dimensions(&self, rows: i64, cols: i64) -> Result<Dimensions, MatrixError> {
        Dimensions::new(rows, cols, &self.config.dimension_bounds)
    }

    fn dispatch<T: RealElement>(
        &self,
        operation: Operation,
        a: &MatrixDense<T>,
        b: Option<&MatrixDense<T>>,
    ) -> Result<OperationResult<T>, MatrixError> {
        let rhs = || {
            b.ok_or(MatrixError::MissingOperand {
                operation: operation.name(),
            })
        };

        let matrix = match operation {
            Operation::Add => a.checked_add(rhs()?)?,
            Operation::Subtract => a.checked_sub(rhs()?)?,
            Operation::Multiply => a.checked_mul(rhs()?)?,
            Operation::Transpose => a.transpose(),
            Operation::Rref => a.rref(),
            Operation::Determinant => {
                if let Some(limit) = self.config.max_determinant_order {
                    if a.rows() > limit {
                        return Err(MatrixError::TooLarge {
                            order: a.rows(),
                            limit,
                        });
                    }
                }
                return Ok(OperationResult::Scalar(a.determinant()?));
            }
        };
        Ok(OperationResult::Matrix(matrix))
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
