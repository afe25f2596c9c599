//! Multiple testing correction.

/// Bonferroni-adjusted p-value: `min(p * num_tests, 1.0)`.
///
/// `num_tests` is the size of the family of comparisons, which may be larger
/// than the number of p-values actually obtained.
///
/// # Examples
///
/// ```
/// use agenorm_stats::correction::bonferroni;
///
/// assert_eq!(bonferroni(0.01, 3), 0.03);
/// assert_eq!(bonferroni(0.6, 3), 1.0);
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn bonferroni(p_value: f64, num_tests: usize) -> f64 {
    (p_value * num_tests as f64).min(1.0)
}

/// Number of unordered pairs among `k` groups.
#[must_use]
pub fn num_pairs(k: usize) -> usize {
    k * k.saturating_sub(1) / 2
}
