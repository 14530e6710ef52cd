//! Descriptive statistics over return columns.
//!
//! All functions take plain `f64` slices and accumulate sequentially, so the
//! same input always produces bit-identical output.
//!
//! Degenerate inputs never yield NaN:
//! - the standard deviation of a single value or a constant series is exactly 0
//! - the correlation involving a zero-variance series is exactly 0

/// Arithmetic mean. Returns `None` for an empty slice.
///
/// # Examples
/// ```
/// use risk_core::math::statistics::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Returns true if every element equals the first (vacuously true when empty).
pub fn is_constant(values: &[f64]) -> bool {
    match values.split_first() {
        Some((first, rest)) => rest.iter().all(|v| v == first),
        None => true,
    }
}

/// Unbiased sample variance (n − 1 denominator).
///
/// Returns `None` for an empty slice and `Some(0.0)` for a single value or a
/// constant series.
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    if values.len() == 1 || is_constant(values) {
        return Some(0.0);
    }
    let sum_sq: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
    Some(sum_sq / (values.len() - 1) as f64)
}

/// Unbiased sample standard deviation.
///
/// # Examples
/// ```
/// use risk_core::math::statistics::sample_std_dev;
///
/// let sd = sample_std_dev(&[0.10, -0.10]).unwrap();
/// assert!((sd - 0.1414213562).abs() < 1e-9);
///
/// // A single observation has no dispersion
/// assert_eq!(sample_std_dev(&[0.05]), Some(0.0));
/// ```
pub fn sample_std_dev(values: &[f64]) -> Option<f64> {
    sample_variance(values).map(f64::sqrt)
}

/// Pearson correlation coefficient between two equally long series.
///
/// Returns `None` if the lengths differ or the series are empty. Returns
/// `Some(0.0)` when either series has zero variance (including a single
/// observation), and clamps the result to [-1, 1].
///
/// # Examples
/// ```
/// use risk_core::math::statistics::pearson_correlation;
///
/// let x = [0.01, 0.02, -0.01];
/// assert!((pearson_correlation(&x, &x).unwrap() - 1.0).abs() < 1e-12);
///
/// let flat = [0.0, 0.0, 0.0];
/// assert_eq!(pearson_correlation(&x, &flat), Some(0.0));
/// ```
pub fn pearson_correlation(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() {
        return None;
    }
    let mean_x = mean(x)?;
    let mean_y = mean(y)?;
    if is_constant(x) || is_constant(y) {
        return Some(0.0);
    }

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mean_x;
        let dy = b - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        return Some(0.0);
    }
    Some((cov / denom).clamp(-1.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sample_variance_known_values() {
        // Var([2, 4, 4, 4, 5, 5, 7, 9]) with n-1 = 32 / 7
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(sample_variance(&values).unwrap(), 32.0 / 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_std_dev_empty_is_none() {
        assert_eq!(sample_std_dev(&[]), None);
    }

    #[test]
    fn test_std_dev_constant_series_is_exactly_zero() {
        // 0.1 repeated does not average back to exactly 0.1 in floating point
        let values = [0.1; 7];
        assert_eq!(sample_std_dev(&values), Some(0.0));
    }

    #[test]
    fn test_correlation_perfect_negative() {
        let x = [0.01, 0.03, -0.02, 0.00];
        let y: Vec<f64> = x.iter().map(|v| -2.0 * v).collect();
        assert_relative_eq!(pearson_correlation(&x, &y).unwrap(), -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_correlation_is_symmetric_in_arguments() {
        let x = [0.012, -0.004, 0.007, 0.001, -0.010];
        let y = [0.003, 0.002, -0.006, 0.004, -0.001];
        assert_eq!(pearson_correlation(&x, &y), pearson_correlation(&y, &x));
    }

    #[test]
    fn test_correlation_single_observation_is_zero() {
        assert_eq!(pearson_correlation(&[0.02], &[0.03]), Some(0.0));
    }

    #[test]
    fn test_correlation_length_mismatch() {
        assert_eq!(pearson_correlation(&[0.1, 0.2], &[0.1]), None);
    }

    #[test]
    fn test_is_constant() {
        assert!(is_constant(&[]));
        assert!(is_constant(&[3.0]));
        assert!(is_constant(&[3.0, 3.0]));
        assert!(!is_constant(&[3.0, 3.0000001]));
    }
}
