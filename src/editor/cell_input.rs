use crate::matrix::matrix_dense::MatrixDense;
use crate::matrix::matrix_error::MatrixError;

/// Reads the number a user typed into a matrix cell.
///
/// The longest leading slice that parses as a number wins ("3.5abc" is 3.5).
/// Anything without a numeric prefix, and NaN, reads as 0.
pub fn parse_cell(input: &str) -> f64 {
    let text = input.trim_start();

    let value = text
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .filter(|&end| is_numeric_prefix(&text[..end]))
        .find_map(|end| text[..end].parse::<f64>().ok())
        .unwrap_or(0.0);

    if value.is_nan() {
        0.0
    } else {
        value
    }
}

impl MatrixDense<f64> {
    /// Copy with the cell at (`row`, `col`) set from user text.
    pub fn with_cell_input(
        &self,
        row: usize,
        col: usize,
        input: &str,
    ) -> Result<Self, MatrixError> {
        self.with_cell(row, col, parse_cell(input))
    }
}

// Keeps words like "inf" or "nan" out, which `f64::from_str` would accept
fn is_numeric_prefix(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
