//! Descriptive statistics over collected sample series.
//!
//! Too-small sample sets yield `None` rather than a misleading zero: a mean
//! needs at least one sample, a sample standard deviation (divisor n-1) at
//! least two.

/// Arithmetic mean, or `None` for an empty series.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Sample standard deviation, or `None` below two samples.
pub fn std_dev(samples: &[f64]) -> Option<f64> {
    if samples.len() < 2 {
        return None;
    }
    let mean = mean(samples)?;
    let variance = samples
        .iter()
        .map(|s| {
            let delta = s - mean;
            delta * delta
        })
        .sum::<f64>()
        / (samples.len() - 1) as f64;
    Some(variance.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_of_empty_is_undefined() {
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn test_mean_of_known_values() {
        assert_eq!(mean(&[2.0]), Some(2.0));
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
    }

    #[test]
    fn test_std_dev_requires_two_samples() {
        assert_eq!(std_dev(&[]), None);
        assert_eq!(std_dev(&[5.0]), None);
    }

    #[test]
    fn test_std_dev_of_known_values() {
        // Sample stdev of [2, 4, 4, 4, 5, 5, 7, 9] is ~2.138.
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = std_dev(&samples).unwrap();
        assert!((sd - 2.138).abs() < 0.001);
    }

    #[test]
    fn test_std_dev_of_identical_samples_is_zero() {
        assert_eq!(std_dev(&[3.0, 3.0, 3.0]), Some(0.0));
    }
}
