//! Statistical utility functions.

/// Calculate the mean of a slice.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Calculate the variance of a slice (sample variance with n-1 denominator).
pub fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return f64::NAN;
    }
    let m = mean(values);
    let sum_sq: f64 = values.iter().map(|x| (x - m).powi(2)).sum();
    sum_sq / (values.len() - 1) as f64
}

/// Calculate the sample standard deviation, `0.0` for fewer than two values.
pub fn std_dev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    variance(values).sqrt()
}

/// Empirical quantile with linear interpolation between order statistics.
///
/// Matches the default ("linear") method of NumPy: the quantile sits at
/// position `q * (n - 1)` of the sorted sample.
///
/// # Arguments
/// * `values` - Sample values
/// * `q` - Quantile (0.0 to 1.0)
///
/// # Example
/// ```
/// use capacity_forecast::utils::quantile;
///
/// let q = quantile(&[1.0, 2.0, 3.0, 4.0], 0.5);
/// assert!((q - 2.5).abs() < 1e-12);
/// ```
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let pos = q * (n - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;

    if lower == upper {
        sorted[lower]
    } else {
        sorted[lower] * (1.0 - frac) + sorted[upper] * frac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn mean_and_std_dev() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0, epsilon = 1e-12);
        assert_relative_eq!(std_dev(&values), 2.138089935299395, epsilon = 1e-12);
        assert!(mean(&[]).is_nan());
        assert_eq!(std_dev(&[3.0]), 0.0);
    }

    #[test]
    fn quantile_interpolates_between_order_statistics() {
        let values = [
            100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 100.0, 110.0, 120.0, 130.0, 140.0,
            150.0, 160.0,
        ];
        // pos = 0.9 * 13 = 11.7 between sorted[11] = 150 and sorted[12] = 160
        assert_relative_eq!(quantile(&values, 0.9), 157.0, epsilon = 1e-9);
        // pos = 0.7 * 13 = 9.1 between sorted[9] = 140 and sorted[10] = 150
        assert_relative_eq!(quantile(&values, 0.7), 141.0, epsilon = 1e-9);
    }

    #[test]
    fn quantile_edge_cases() {
        assert!(quantile(&[], 0.5).is_nan());
        assert_eq!(quantile(&[42.0], 0.9), 42.0);
        assert_eq!(quantile(&[3.0, 1.0, 2.0], 0.0), 1.0);
        assert_eq!(quantile(&[3.0, 1.0, 2.0], 1.0), 3.0);
    }
}
