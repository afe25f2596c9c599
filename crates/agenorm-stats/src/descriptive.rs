/// Descriptive statistics summarizing a dataset.
///
/// This structure contains the sample size together with common measures of
/// central tendency and dispersion for a dataset of `f64` values.
#[derive(Debug, Clone, PartialEq)]
pub struct DescriptiveStats {
    /// The number of values in the dataset.
    pub count: usize,
    /// The minimum value in the dataset.
    pub min: f64,
    /// The maximum value in the dataset.
    pub max: f64,
    /// The arithmetic mean (average) of the dataset.
    pub mean: f64,
    /// The sample standard deviation (`n - 1` denominator).
    ///
    /// Defined as `0.0` when the dataset holds a single value, so it is never `NaN`.
    pub std_dev: f64,
}

impl DescriptiveStats {
    /// Computes descriptive statistics from unsorted values.
    ///
    /// This method will sort the values internally before computing statistics.
    ///
    /// # Returns
    ///
    /// * `Some(DescriptiveStats)` - if the dataset contains at least one value
    /// * `None` - if the dataset is empty
    ///
    /// # Examples
    ///
    /// ```
    /// # use agenorm_stats::descriptive::DescriptiveStats;
    /// let values = [5.0, 2.0, 4.0, 1.0, 3.0];
    /// let stats = DescriptiveStats::new(values).unwrap();
    /// assert_eq!(stats.count, 5);
    /// assert_eq!(stats.min, 1.0);
    /// assert_eq!(stats.max, 5.0);
    /// assert_eq!(stats.mean, 3.0);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Option<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut values = values.into_iter().collect::<Vec<_>>();
        values.sort_by(f64::total_cmp);
        Self::from_sorted(&values)
    }

    /// Computes descriptive statistics from pre-sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// # use agenorm_stats::descriptive::DescriptiveStats;
    /// let stats = DescriptiveStats::from_sorted(&[5.0, 5.0, 5.0, 5.0]).unwrap();
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.std_dev, 0.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64]) -> Option<Self> {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let min = *sorted_values.first()?;
        let max = *sorted_values.last()?;
        let count = sorted_values.len();
        let mean = mean(sorted_values)?;
        let std_dev = if count > 1 {
            let sum_sq = sorted_values
                .iter()
                .map(|v| (v - mean).powi(2))
                .sum::<f64>();
            (sum_sq / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        Some(Self {
            count,
            min,
            max,
            mean,
            std_dev,
        })
    }
}

/// Arithmetic mean, `None` for an empty slice.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Unbiased sample variance (`n - 1` denominator), `None` for fewer than two values.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn sample_variance(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let mean = mean(values)?;
    let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
    Some(sum_sq / (values.len() - 1) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values() {
        assert!(DescriptiveStats::new([]).is_none());
        assert!(mean(&[]).is_none());
    }

    #[test]
    fn test_single_value_has_zero_std_dev() {
        let stats = DescriptiveStats::new([7.5]).unwrap();
        assert_eq!(stats.count, 1);
        assert_eq!(stats.mean, 7.5);
        assert_eq!(stats.std_dev, 0.0);
        assert!(sample_variance(&[7.5]).is_none());
    }

    #[test]
    fn test_sample_std_dev() {
        // mean 5, squared deviations sum to 32, n - 1 = 7
        let stats = DescriptiveStats::new([2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(stats.mean, 5.0);
        assert!((stats.std_dev - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_sample_variance() {
        let var = sample_variance(&[10.0, 12.0, 11.0]).unwrap();
        assert!((var - 1.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "values must be sorted")]
    fn test_from_sorted_rejects_unsorted() {
        let _ = DescriptiveStats::from_sorted(&[3.0, 1.0]);
    }
}
