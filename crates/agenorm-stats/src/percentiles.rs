/// Precomputed percentile values for a dataset.
///
/// This structure stores percentile-value pairs for efficient lookup
/// of commonly used percentile points.
///
/// # Examples
///
/// ```
/// use agenorm_stats::percentiles::Percentiles;
///
/// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
/// let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
///
/// assert_eq!(percentiles.get(50.0), Some(5.5));
/// assert_eq!(percentiles.get(25.0), Some(3.25));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Percentiles {
    /// Percentile-value pairs, in the order they were requested.
    /// Each tuple contains (percentile, value) where percentile is 0.0-100.0.
    values: Vec<(f64, f64)>,
}

impl Percentiles {
    /// Computes percentiles from sorted values.
    ///
    /// # Panics
    ///
    /// Panics if `sorted_values` is not sorted in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use agenorm_stats::percentiles::Percentiles;
    ///
    /// let mut values = vec![5.0, 2.0, 8.0, 1.0, 9.0];
    /// values.sort_by(f64::total_cmp);
    /// let percentiles = Percentiles::from_sorted(&values, &[50.0, 90.0]);
    /// assert_eq!(percentiles.get(50.0), Some(5.0));
    /// ```
    #[must_use]
    pub fn from_sorted(sorted_values: &[f64], percentile_points: &[f64]) -> Self {
        assert!(
            sorted_values.is_sorted_by(|a, b| a <= b),
            "values must be sorted in ascending order"
        );

        let values = percentile_points
            .iter()
            .map(|&p| (p, compute_percentile(sorted_values, p)))
            .collect();
        Self { values }
    }

    /// Computes percentiles from unsorted values.
    ///
    /// This method will sort the values internally before computing percentiles.
    #[must_use]
    pub fn new(values: &[f64], percentile_points: &[f64]) -> Self {
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        Self::from_sorted(&sorted, percentile_points)
    }

    /// Gets the value at a specific percentile.
    ///
    /// Returns `None` if the percentile was not precomputed.
    ///
    /// # Examples
    ///
    /// ```
    /// use agenorm_stats::percentiles::Percentiles;
    ///
    /// let values = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    /// let percentiles = Percentiles::new(&values, &[50.0, 95.0]);
    ///
    /// assert_eq!(percentiles.get(50.0), Some(3.0));
    /// assert_eq!(percentiles.get(25.0), None); // Not precomputed
    /// ```
    #[must_use]
    pub fn get(&self, percentile: f64) -> Option<f64> {
        self.values.iter().find_map(|(p, value)| {
            if (*p - percentile).abs() < f64::EPSILON {
                Some(*value)
            } else {
                None
            }
        })
    }

    /// Returns an iterator over all (percentile, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values.iter().copied()
    }

    /// Returns all percentile-value pairs as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[(f64, f64)] {
        &self.values
    }
}

/// Computes a single percentile value from sorted data.
///
/// This function interpolates linearly between the two closest order
/// statistics. For a dataset with n values, the k-th percentile sits at the
/// fractional rank `(n - 1) * k / 100`.
///
/// # Returns
///
/// The value at the specified percentile. Returns `f64::NAN` if the input is empty.
///
/// # Examples
///
/// ```
/// use agenorm_stats::percentiles::compute_percentile;
///
/// let values = vec![10.0, 11.0, 12.0];
///
/// assert_eq!(compute_percentile(&values, 50.0), 11.0);
/// assert!((compute_percentile(&values, 5.0) - 10.1).abs() < 1e-12);
/// ```
#[expect(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss
)]
#[must_use]
pub fn compute_percentile(sorted_values: &[f64], percentile: f64) -> f64 {
    let Some(&last) = sorted_values.last() else {
        return f64::NAN;
    };
    let rank = (sorted_values.len() - 1) as f64 * percentile.clamp(0.0, 100.0) / 100.0;
    let lower = rank.floor() as usize;
    if lower + 1 >= sorted_values.len() {
        return last;
    }
    let fraction = rank - rank.floor();
    let (lo, hi) = (sorted_values[lower], sorted_values[lower + 1]);
    lo + fraction * (hi - lo)
}
