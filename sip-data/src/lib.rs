//! Data processing for irradiance samples.
//!
//! This crate turns decoded backend samples into forms suitable for
//! charting: chronological per-component series for date-range plots and
//! day-of-year mean ± standard deviation bands for year-range plots.

pub mod aggregate;
pub mod downsample;
pub mod export;
pub mod series;

/// Descriptive statistics shared by the aggregator.
pub mod stats {
    /// Arithmetic mean. Returns 0 for an empty slice.
    pub fn mean(values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }
        values.iter().sum::<f64>() / values.len() as f64
    }

    /// Population standard deviation (divides by N, not N - 1).
    ///
    /// Fewer than two values have no spread and return 0.
    pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
        if values.len() < 2 {
            return 0.0;
        }
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        variance.sqrt()
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_mean() {
            assert_eq!(mean(&[]), 0.0);
            assert_eq!(mean(&[100.0, 200.0]), 150.0);
            assert_eq!(mean(&[2.0, 4.0, 9.0]), 5.0);
        }

        #[test]
        fn test_population_std_dev() {
            assert_eq!(population_std_dev(&[100.0, 200.0], 150.0), 50.0);
            // 2, 4, 4, 4, 5, 5, 7, 9 is the textbook population sigma = 2 case
            let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
            assert_eq!(population_std_dev(&values, mean(&values)), 2.0);
        }

        #[test]
        fn test_std_dev_needs_two_values() {
            assert_eq!(population_std_dev(&[42.0], 42.0), 0.0);
            assert_eq!(population_std_dev(&[], 0.0), 0.0);
        }
    }
}
