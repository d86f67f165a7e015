//! Statistical reductions over sample sets

/// Calculate the arithmetic mean of a slice of f64 values
///
/// NaN values are filtered out before averaging; infinite values are kept.
///
/// # Arguments
///
/// * `values` - Slice of f64 values to average
///
/// # Returns
///
/// * `Ok(mean)` - The arithmetic mean of the valid values
/// * `Err(message)` - If no valid values remain after filtering NaN
pub fn mean(values: &[f64]) -> Result<f64, String> {
    let (sum, count) = values
        .iter()
        .filter(|v| !v.is_nan())
        .fold((0.0, 0usize), |(sum, count), &v| (sum + v, count + 1));

    if count == 0 {
        return Err(format!(
            "Insufficient data points to compute mean: {} total values, 0 valid",
            values.len()
        ));
    }

    Ok(sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_known_sequence() {
        assert_relative_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_mean_single_value() {
        assert_eq!(mean(&[0.125]).unwrap(), 0.125);
    }

    #[test]
    fn test_mean_ignores_nan() {
        assert_relative_eq!(mean(&[2.0, f64::NAN, 4.0]).unwrap(), 3.0);
    }

    #[test]
    fn test_mean_empty() {
        let err = mean(&[]).unwrap_err();
        assert!(err.contains("0 total values"));
        assert!(mean(&[f64::NAN]).is_err());
    }
}
