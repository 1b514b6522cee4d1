use itertools::Itertools;
use log::trace;
use num_traits::Float;

use crate::matrix::matrix::Matrix;
use crate::matrix::matrix_error::MatrixError;
use crate::utils::{format_cell, round_half_up};
use std::fmt;
use std::ops;

pub trait RealElement:  // Avoid repeating all the traits
    Float
    + fmt::Display
    + fmt::Debug
    + Send
    + Sync
    + 'static
{
    /// Largest magnitude that still counts as "no pivot" during elimination.
    const PIVOT_TOLERANCE: Self;
    /// RREF output is rounded to `1 / ROUNDING_SCALE`.
    const ROUNDING_SCALE: Self;
}

impl RealElement for f64 {
    const PIVOT_TOLERANCE: f64 = 1e-10;
    const ROUNDING_SCALE: f64 = 1000.0;
}

impl RealElement for f32 {
    const PIVOT_TOLERANCE: f32 = 1e-10;
    const ROUNDING_SCALE: f32 = 1000.0;
}

/// Dense row-major matrix.
///
/// A `MatrixDense` is either empty (0x0) or has at least one row and one
/// column. Every operation returns a new value; the cells are never changed
/// after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixDense<T = f64> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: RealElement> Matrix<T> for MatrixDense<T> {
    fn from_list(lines: Vec<Vec<T>>) -> Result<Self, MatrixError> {
        let rows = lines.len();
        let cols = lines.first().map_or(0, |l| l.len());

        if rows > 0 && cols == 0 {
            return Err(MatrixError::ZeroColumns);
        }
        if let Some((row, line)) = lines.iter().find_position(|l| l.len() != cols) {
            return Err(MatrixError::RaggedRows {
                row,
                expected: cols,
                found: line.len(),
            });
        }

        Ok(MatrixDense {
            rows,
            cols,
            cells: lines.into_iter().flatten().collect(),
        })
    }

    fn to_list(&self) -> Vec<Vec<T>> {
        if self.is_empty() {
            return vec![];
        }
        self.cells
            .chunks(self.cols)
            .map(|line| line.into())
            .collect()
    }

    #[inline(always)]
    fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    fn cols(&self) -> usize {
        self.cols
    }

    fn is_rref(&self) -> bool {
        let mut lead = None;

        for i in 0..self.rows {
            let row = self.row(i);
            let pivot_col_opt = row.iter().position(|x| !x.is_zero());

            match pivot_col_opt {
                None => {
                    // zero rows must all sit at the bottom
                    return (i + 1..self.rows).all(|r| self.row(r).iter().all(|x| x.is_zero()));
                }
                Some(pivot_col) => {
                    if let Some(prev_lead) = lead {
                        if pivot_col <= prev_lead {
                            return false;
                        }
                    }
                    lead = Some(pivot_col);

                    if row[pivot_col] != T::one() {
                        return false;
                    }

                    if (0..self.rows).any(|r| r != i && !self.at(r, pivot_col).is_zero()) {
                        return false;
                    }
                }
            }
        }
        true
    }

    /// Gauss-Jordan elimination with partial pivoting, rounded to three
    /// decimals.
    fn rref(&self) -> MatrixDense<T> {
        let mut mat = self.clone();
        let mut current_row = 0;

        for col in 0..mat.cols {
            if current_row >= mat.rows {
                break;
            }

            let mut pivot_row = current_row;
            for r in current_row + 1..mat.rows {
                if mat.at(r, col).abs() > mat.at(pivot_row, col).abs() {
                    pivot_row = r;
                }
            }

            if mat.at(pivot_row, col).abs() < T::PIVOT_TOLERANCE {
                trace!("rref: no pivot in column {}", col);
                continue;
            }

            if pivot_row != current_row {
                mat.swap_rows(current_row, pivot_row);
            }

            let pivot = mat.at(current_row, col);
            trace!("rref: pivot {} at ({}, {})", pivot, current_row, col);
            for k in 0..mat.cols {
                let idx = mat.index(current_row, k);
                mat.cells[idx] = mat.cells[idx] / pivot;
            }

            for r in 0..mat.rows {
                if r == current_row {
                    continue;
                }

                let factor = mat.at(r, col);
                if factor.abs() <= T::PIVOT_TOLERANCE {
                    continue;
                }
                for k in 0..mat.cols {
                    let idx = mat.index(r, k);
                    mat.cells[idx] = mat.cells[idx] - factor * mat.at(current_row, k);
                }
            }

            current_row += 1;
        }

        for cell in mat.cells.iter_mut() {
            *cell = round_half_up(*cell, T::ROUNDING_SCALE);
        }
        mat
    }

    /// Recursive cofactor expansion along the first row.
    fn determinant(&self) -> Result<T, MatrixError> {
        if self.is_empty() {
            return Err(MatrixError::EmptyMatrix {
                operation: "determinant",
            });
        }
        if !self.is_square() {
            return Err(MatrixError::NotSquare {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.cofactor_expansion())
    }

    fn identity(n: usize) -> MatrixDense<T> {
        MatrixDense {
            rows: n,
            cols: n,
            cells: (0..n)
                .flat_map(|i| (0..n).map(move |j| if i == j { T::one() } else { T::zero() }))
                .collect(),
        }
    }

    fn transpose(&self) -> MatrixDense<T> {
        MatrixDense {
            rows: self.cols,
            cols: self.rows,
            cells: (0..self.cols)
                .flat_map(|c| (0..self.rows).map(move |r| self.at(r, c)))
                .collect(),
        }
    }

    #[inline(always)]
    fn at(&self, row: usize, col: usize) -> T {
        self.cells[self.index(row, col)]
    }
}

impl<T: RealElement> MatrixDense<T> {
    pub fn empty() -> MatrixDense<T> {
        MatrixDense {
            rows: 0,
            cols: 0,
            cells: vec![],
        }
    }

    pub fn scalar(value: T) -> MatrixDense<T> {
        MatrixDense {
            rows: 1,
            cols: 1,
            cells: vec![value],
        }
    }

    /// Zero-filled `rows` x `cols` matrix, or the empty matrix when either
    /// side is zero.
    pub fn zeros(rows: usize, cols: usize) -> MatrixDense<T> {
        if rows == 0 || cols == 0 {
            return MatrixDense::empty();
        }
        MatrixDense {
            rows,
            cols,
            cells: vec![T::zero(); rows * cols],
        }
    }

    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    pub fn get(&self, row: usize, col: usize) -> Option<T> {
        if row < self.rows && col < self.cols {
            Some(self.at(row, col))
        } else {
            None
        }
    }

    /// Copy of `self` with a single cell replaced.
    pub fn with_cell(
        &self,
        row: usize,
        col: usize,
        value: T,
    ) -> Result<MatrixDense<T>, MatrixError> {
        if row >= self.rows || col >= self.cols {
            return Err(MatrixError::IndexOutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        let mut mat = self.clone();
        let idx = mat.index(row, col);
        mat.cells[idx] = value;
        Ok(mat)
    }

    /// New `rows` x `cols` matrix keeping the overlapping top-left block of
    /// `self`, zeros elsewhere.
    pub fn resized(&self, rows: usize, cols: usize) -> MatrixDense<T> {
        let mut mat = MatrixDense::zeros(rows, cols);
        for r in 0..rows.min(self.rows) {
            for c in 0..cols.min(self.cols) {
                let idx = mat.index(r, c);
                mat.cells[idx] = self.at(r, c);
            }
        }
        mat
    }

    pub fn checked_add(&self, rhs: &MatrixDense<T>) -> Result<MatrixDense<T>, MatrixError> {
        self.zip_cells(rhs, "addition", |a, b| a + b)
    }

    pub fn checked_sub(&self, rhs: &MatrixDense<T>) -> Result<MatrixDense<T>, MatrixError> {
        self.zip_cells(rhs, "subtraction", |a, b| a - b)
    }

    pub fn checked_mul(&self, rhs: &MatrixDense<T>) -> Result<MatrixDense<T>, MatrixError> {
        if self.is_empty() || rhs.is_empty() {
            return Err(MatrixError::EmptyMatrix {
                operation: "multiplication",
            });
        }
        if self.cols != rhs.rows {
            return Err(MatrixError::IncompatibleShapeForProduct {
                left_cols: self.cols,
                right_rows: rhs.rows,
            });
        }

        let mut result = MatrixDense::zeros(self.rows, rhs.cols);
        for i in 0..self.rows {
            for j in 0..rhs.cols {
                let idx = result.index(i, j);
                for k in 0..rhs.rows {
                    result.cells[idx] = result.cells[idx] + self.at(i, k) * rhs.at(k, j);
                }
            }
        }
        Ok(result)
    }

    fn zip_cells(
        &self,
        rhs: &MatrixDense<T>,
        operation: &'static str,
        f: impl Fn(T, T) -> T,
    ) -> Result<MatrixDense<T>, MatrixError> {
        if self.cols != rhs.cols || self.rows != rhs.rows {
            return Err(MatrixError::DimensionMismatch {
                operation,
                left_rows: self.rows,
                left_cols: self.cols,
                right_rows: rhs.rows,
                right_cols: rhs.cols,
            });
        }
        if self.is_empty() {
            return Err(MatrixError::EmptyMatrix { operation });
        }

        Ok(MatrixDense {
            rows: self.rows,
            cols: self.cols,
            cells: self
                .cells
                .iter()
                .zip(rhs.cells.iter())
                .map(|(a, b)| f(*a, *b))
                .collect(),
        })
    }

    fn cofactor_expansion(&self) -> T {
        let n = self.rows;
        if n == 1 {
            return self.at(0, 0);
        }
        if n == 2 {
            return self.at(0, 0) * self.at(1, 1) - self.at(0, 1) * self.at(1, 0);
        }

        let mut det = T::zero();
        for i in 0..n {
            let sign = if i % 2 == 0 { T::one() } else { -T::one() };
            det = det + sign * self.at(0, i) * self.minor(i).cofactor_expansion();
        }
        det
    }

    // Drop the first row and column `skip_col`
    fn minor(&self, skip_col: usize) -> MatrixDense<T> {
        MatrixDense {
            rows: self.rows - 1,
            cols: self.cols - 1,
            cells: (1..self.rows)
                .flat_map(|r| {
                    (0..self.cols)
                        .filter(move |&c| c != skip_col)
                        .map(move |c| self.at(r, c))
                })
                .collect(),
        }
    }

    fn swap_rows(&mut self, a: usize, b: usize) {
        for k in 0..self.cols {
            self.cells.swap(a * self.cols + k, b * self.cols + k);
        }
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }
}

impl<T: RealElement> Default for MatrixDense<T> {
    fn default() -> Self {
        MatrixDense::empty()
    }
}

impl<T: RealElement> ops::Add<&MatrixDense<T>> for &MatrixDense<T> {
    type Output = Result<MatrixDense<T>, MatrixError>;

    fn add(self, rhs: &MatrixDense<T>) -> Result<MatrixDense<T>, MatrixError> {
        self.checked_add(rhs)
    }
}

impl<T: RealElement> ops::Sub<&MatrixDense<T>> for &MatrixDense<T> {
    type Output = Result<MatrixDense<T>, MatrixError>;

    fn sub(self, rhs: &MatrixDense<T>) -> Result<MatrixDense<T>, MatrixError> {
        self.checked_sub(rhs)
    }
}

impl<T: RealElement> ops::Mul<&MatrixDense<T>> for &MatrixDense<T> {
    type Output = Result<MatrixDense<T>, MatrixError>;

    fn mul(self, rhs: &MatrixDense<T>) -> Result<MatrixDense<T>, MatrixError> {
        self.checked_mul(rhs)
    }
}

impl<T: RealElement> fmt::Display for MatrixDense<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "[]");
        }
        let text = (0..self.rows)
            .map(|r| self.row(r).iter().map(|x| format_cell(*x, 2)).join(" "))
            .join("\n");
        write!(f, "{}", text)
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn m(lines: Vec<Vec<f64>>) -> MatrixDense {
        MatrixDense::from_list(lines).unwrap()
    }

    fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> MatrixDense {
        m((0..rows)
            .map(|_| (0..cols).map(|_| rng.gen_range(-9..=9) as f64).collect())
            .collect())
    }

    #[test]
    fn test_from_list() {
        let a = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(a.rows(), 2);
        assert_eq!(a.cols(), 3);
        assert_eq!(a.at(1, 2), 6.0);
        assert_eq!(a.get(2, 0), None);
        assert_eq!(a.to_list(), vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);

        let empty = MatrixDense::<f64>::from_list(vec![]).unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.to_list(), Vec::<Vec<f64>>::new());

        assert_eq!(
            MatrixDense::<f64>::from_list(vec![vec![1.0, 2.0], vec![3.0]]),
            Err(MatrixError::RaggedRows {
                row: 1,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            MatrixDense::<f64>::from_list(vec![vec![], vec![]]),
            Err(MatrixError::ZeroColumns)
        );
    }

    #[test]
    fn test_zeros_and_identity() {
        assert_eq!(
            MatrixDense::<f64>::zeros(2, 3).to_list(),
            vec![vec![0.0; 3], vec![0.0; 3]]
        );
        assert!(MatrixDense::<f64>::zeros(0, 3).is_empty());
        assert!(MatrixDense::<f64>::zeros(3, 0).is_empty());
        assert_eq!(
            MatrixDense::<f64>::identity(2).to_list(),
            vec![vec![1.0, 0.0], vec![0.0, 1.0]]
        );
    }

    #[test]
    fn test_add_sub() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);

        assert_eq!(
            (&a + &b).unwrap().to_list(),
            vec![vec![6.0, 8.0], vec![10.0, 12.0]]
        );
        assert_eq!((&a + &b).unwrap(), (&b + &a).unwrap());
        assert_eq!(
            (&a - &b).unwrap().to_list(),
            vec![vec![-4.0, -4.0], vec![-4.0, -4.0]]
        );

        let c = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert!(matches!(
            &a + &c,
            Err(MatrixError::DimensionMismatch {
                operation: "addition",
                ..
            })
        ));
        assert!(matches!(
            &a - &c,
            Err(MatrixError::DimensionMismatch {
                operation: "subtraction",
                ..
            })
        ));

        let empty = MatrixDense::empty();
        assert!(matches!(
            &a + &empty,
            Err(MatrixError::DimensionMismatch { .. })
        ));
        assert!(matches!(
            &empty + &empty,
            Err(MatrixError::EmptyMatrix { .. })
        ));
    }

    #[test]
    fn test_add_cellwise_random() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let (rows, cols) = (rng.gen_range(1..=6), rng.gen_range(1..=6));
            let a = random_matrix(&mut rng, rows, cols);
            let b = random_matrix(&mut rng, rows, cols);
            let sum = (&a + &b).unwrap();
            let diff = (&a - &b).unwrap();
            for i in 0..rows {
                for j in 0..cols {
                    assert_eq!(sum.at(i, j), a.at(i, j) + b.at(i, j));
                    assert_eq!(diff.at(i, j), a.at(i, j) - b.at(i, j));
                }
            }
            assert_eq!(sum, (&b + &a).unwrap());
        }
    }

    #[test]
    fn test_mul() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = m(vec![vec![5.0, 6.0], vec![7.0, 8.0]]);
        assert_eq!(
            (&a * &b).unwrap().to_list(),
            vec![vec![19.0, 22.0], vec![43.0, 50.0]]
        );
        assert_eq!(
            (&b * &a).unwrap().to_list(),
            vec![vec![23.0, 34.0], vec![31.0, 46.0]]
        );

        let row = m(vec![vec![1.0, 2.0, 3.0]]);
        let col = row.transpose();
        assert_eq!((&row * &col).unwrap().to_list(), vec![vec![14.0]]);
        assert_eq!((&col * &row).unwrap().rows(), 3);

        let c = m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]);
        assert_eq!(
            &c * &a,
            Err(MatrixError::IncompatibleShapeForProduct {
                left_cols: 3,
                right_rows: 2
            })
        );
        assert!(matches!(
            &a * &MatrixDense::empty(),
            Err(MatrixError::EmptyMatrix { .. })
        ));
    }

    #[test]
    fn test_transpose() {
        let a = m(vec![vec![1.0, 2.0, 5.0, 77.0], vec![3.0, 4.0, 7.0, 11.0]]);
        assert_eq!(
            a.transpose().to_list(),
            vec![
                vec![1.0, 3.0],
                vec![2.0, 4.0],
                vec![5.0, 7.0],
                vec![77.0, 11.0]
            ]
        );
        assert!(MatrixDense::<f64>::empty().transpose().is_empty());

        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let (rows, cols) = (rng.gen_range(1..=6), rng.gen_range(1..=6));
            let a = random_matrix(&mut rng, rows, cols);
            assert_eq!(a.transpose().transpose(), a);
        }
    }

    #[test]
    fn test_determinant() {
        assert_eq!(MatrixDense::<f64>::identity(2).determinant(), Ok(1.0));
        assert_eq!(
            m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).determinant(),
            Ok(-2.0)
        );
        assert_eq!(m(vec![vec![-7.5]]).determinant(), Ok(-7.5));
        assert_eq!(
            m(vec![
                vec![2.0, 0.0, 1.0],
                vec![1.0, 3.0, 2.0],
                vec![1.0, 1.0, 2.0]
            ])
            .determinant(),
            Ok(6.0)
        );
        assert_eq!(
            m(vec![
                vec![1.0, 2.0, 3.0],
                vec![0.0, 0.0, 0.0],
                vec![7.0, 8.0, 9.0]
            ])
            .determinant(),
            Ok(0.0)
        );
        assert_eq!(MatrixDense::<f64>::identity(5).determinant(), Ok(1.0));

        assert_eq!(
            m(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).determinant(),
            Err(MatrixError::NotSquare { rows: 2, cols: 3 })
        );
        assert!(matches!(
            MatrixDense::<f64>::empty().determinant(),
            Err(MatrixError::EmptyMatrix { .. })
        ));
    }

    #[test]
    fn test_determinant_row_swap_negates() {
        let mut rng = StdRng::seed_from_u64(3);
        for n in 2..=5 {
            let a = random_matrix(&mut rng, n, n);
            let mut lines = a.to_list();
            lines.swap(0, n - 1);
            let swapped = m(lines);
            // small integer entries keep every partial sum exact
            assert_eq!(swapped.determinant().unwrap(), -a.determinant().unwrap());
            assert_eq!(
                a.transpose().determinant().unwrap(),
                a.determinant().unwrap()
            );
        }
    }

    #[test]
    fn test_rref() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(a.rref().to_list(), vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        // input is left untouched
        assert_eq!(a.to_list(), vec![vec![1.0, 2.0], vec![3.0, 4.0]]);

        let deficient = m(vec![vec![1.0, 2.0], vec![2.0, 4.0]]);
        assert_eq!(
            deficient.rref().to_list(),
            vec![vec![1.0, 2.0], vec![0.0, 0.0]]
        );

        let wide = m(vec![
            vec![1.0, 2.0, 5.0, 77.0],
            vec![3.0, 4.0, 7.0, 11.0],
            vec![4.0, 8.0, 9.0, 1.0],
        ]);
        let reduced = wide.rref();
        assert!(reduced.is_rref());
        assert_eq!(
            reduced.to_list(),
            vec![
                vec![1.0, 0.0, 0.0, -59.273],
                vec![0.0, 1.0, 0.0, -1.636],
                vec![0.0, 0.0, 1.0, 27.909]
            ]
        );

        let thirds = m(vec![vec![3.0, 1.0]]);
        assert_eq!(thirds.rref().to_list(), vec![vec![1.0, 0.333]]);

        let zero = MatrixDense::<f64>::zeros(2, 3);
        assert_eq!(zero.rref(), zero);
        assert!(MatrixDense::<f64>::empty().rref().is_empty());
    }

    #[test]
    fn test_rref_idempotent() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let rows = rng.gen_range(1..=6);
            let cols = rng.gen_range(1..=6);
            let a = random_matrix(&mut rng, rows, cols);
            let reduced = a.rref();
            assert!(reduced.is_rref(), "{:?}", a);
            assert_eq!(reduced.rref(), reduced);
        }
    }

    #[test]
    fn test_is_rref() {
        assert!(MatrixDense::<f64>::identity(3).is_rref());
        assert!(m(vec![vec![1.0, 2.0], vec![0.0, 0.0]]).is_rref());
        assert!(!m(vec![vec![0.0, 0.0], vec![1.0, 2.0]]).is_rref());
        assert!(!m(vec![vec![2.0, 0.0], vec![0.0, 1.0]]).is_rref());
        assert!(!m(vec![vec![1.0, 1.0], vec![0.0, 1.0]]).is_rref());
        assert!(!m(vec![vec![0.0, 1.0], vec![1.0, 0.0]]).is_rref());
    }

    #[test]
    fn test_with_cell_and_resized() {
        let a = m(vec![vec![1.0, 2.0], vec![3.0, 4.0]]);
        let b = a.with_cell(0, 1, 9.0).unwrap();
        assert_eq!(b.to_list(), vec![vec![1.0, 9.0], vec![3.0, 4.0]]);
        assert_eq!(a.at(0, 1), 2.0);
        assert!(matches!(
            a.with_cell(2, 0, 1.0),
            Err(MatrixError::IndexOutOfBounds { row: 2, .. })
        ));

        assert_eq!(
            a.resized(3, 1).to_list(),
            vec![vec![1.0], vec![3.0], vec![0.0]]
        );
        assert_eq!(
            a.resized(2, 3).to_list(),
            vec![vec![1.0, 2.0, 0.0], vec![3.0, 4.0, 0.0]]
        );
    }

    #[test]
    fn test_display() {
        let a = m(vec![vec![19.0, 22.0], vec![43.0, -0.5]]);
        assert_eq!(a.to_string(), "19.00 22.00\n43.00 -0.50");
        assert_eq!(MatrixDense::<f64>::empty().to_string(), "[]");
    }

    #[test]
    fn test_f32() {
        let a = MatrixDense::<f32>::from_list(vec![vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        assert_eq!(a.determinant(), Ok(-2.0));
        assert_eq!(a.rref(), MatrixDense::<f32>::identity(2));
    }
}
