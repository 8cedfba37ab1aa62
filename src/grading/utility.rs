/// Sums a slice of values.
pub fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    sum(values) / values.len() as f64
}

/// Smallest value, or `None` for empty input.
pub fn min(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

/// Largest value, or `None` for empty input.
pub fn max(values: &[f64]) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Median of the values: the middle element for odd counts, the mean of the
/// two middle elements for even counts. `None` for empty input.
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Some(sorted[mid])
    }
}

/// `part` as a percentage of `total`. Returns 0.0 when `total` is zero.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64) * 100.0
    }
}

/// Rounds to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Two-decimal text of `value`, rounded the same way as [`round2`].
///
/// `format!("{:.2}")` alone rounds exact ties to even (8.125 → "8.12").
pub fn fmt2(value: f64) -> String {
    format!("{:.2}", round2(value))
}

/// Parses the longest numeric prefix of `input`, falling back to 0.
///
/// Mirrors how a form field behaves while the user is typing: `"8.5"` and
/// `"8.5x"` both read as 8.5, `"abc"` and `""` read as 0. Infinite or NaN
/// results also read as 0.
pub fn parse_lenient(input: &str) -> f64 {
    let trimmed = input.trim_start();
    let value = trimmed
        .char_indices()
        .map(|(i, c)| i + c.len_utf8())
        .rev()
        .find_map(|end| {
            let candidate = &trimmed[..end];
            // Rust accepts "inf"/"nan" spellings; only digits count here.
            if !candidate.bytes().any(|b| b.is_ascii_digit()) {
                return None;
            }
            candidate.parse::<f64>().ok()
        })
        .unwrap_or(0.0);

    if value.is_finite() { value } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(mean(&[70.0, 80.0, 90.0]), 80.0);
    }

    #[test]
    fn test_min_max() {
        let values = [72.0, 45.5, 98.0, 60.0];
        assert_eq!(min(&values), Some(45.5));
        assert_eq!(max(&values), Some(98.0));
        assert_eq!(min(&[]), None);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[90.0, 70.0, 80.0]), Some(80.0));
        assert_eq!(median(&[100.0, 70.0, 90.0, 80.0]), Some(85.0));
        assert_eq!(median(&[42.0]), Some(42.0));
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn test_pct_with_zero_total() {
        assert_eq!(pct(10, 0), 0.0);
        assert_eq!(pct(1, 4), 25.0);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(58.0 / 7.0), 8.29);
        assert_eq!(round2(8.0), 8.0);
        assert_eq!(round2(8.125), 8.13);
    }

    #[test]
    fn test_fmt2_rounds_ties_up() {
        assert_eq!(fmt2(8.125), "8.13");
        assert_eq!(fmt2(7.375), "7.38");
        assert_eq!(fmt2(58.0 / 7.0), "8.29");
        assert_eq!(fmt2(75.0), "75.00");
    }

    #[test]
    fn test_parse_lenient() {
        assert_eq!(parse_lenient("87"), 87.0);
        assert_eq!(parse_lenient(" 3.5"), 3.5);
        assert_eq!(parse_lenient("9."), 9.0);
        assert_eq!(parse_lenient("12abc"), 12.0);
        assert_eq!(parse_lenient("-4"), -4.0);
        assert_eq!(parse_lenient("abc"), 0.0);
        assert_eq!(parse_lenient(""), 0.0);
        assert_eq!(parse_lenient("-"), 0.0);
        assert_eq!(parse_lenient("inf"), 0.0);
        assert_eq!(parse_lenient("NaN"), 0.0);
        assert_eq!(parse_lenient("1e400"), 0.0);
    }
}
