use crate::matrix::matrix_error::MatrixError;

pub trait Matrix<T>
where
    Self: Sized,
{
    fn from_list(lines: Vec<Vec<T>>) -> Result<Self, MatrixError>;
    fn to_list(&self) -> Vec<Vec<T>>;

    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.rows() == 0
    }

    fn is_square(&self) -> bool {
        self.rows() == self.cols()
    }

    fn is_rref(&self) -> bool;
    fn rref(&self) -> Self;
    fn determinant(&self) -> Result<T, MatrixError>;
    fn identity(n: usize) -> Self;
    fn transpose(&self) -> Self;
    fn at(&self, row: usize, col: usize) -> T;
}
