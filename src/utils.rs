use num_traits::Float;

// Half-up rounding, so -2.5 becomes -2 and 2.5 becomes 3
#[inline(always)]
pub fn round_half_up<T: Float>(value: T, scale: T) -> T {
    let half = T::one() / (T::one() + T::one());
    (value * scale + half).floor() / scale
}

pub fn format_cell<T: Float + std::fmt::Display>(value: T, decimals: usize) -> String {
    let text = format!("{:.*}", decimals, value);
    // "-0.00" reads as noise in a result grid
    match text.strip_prefix('-') {
        Some(rest) if rest.trim_start_matches(['0', '.']).is_empty() => rest.to_string(),
        _ => text,
    }
}

// --------------------------------------------------
//                      TESTS
// --------------------------------------------------
