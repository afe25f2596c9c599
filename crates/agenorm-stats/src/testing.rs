//! Hypothesis tests comparing group means.
//!
//! - [`anova_oneway`]: one-way analysis of variance across `k` groups
//! - [`welch_t_test`]: two-sample t-test without the equal-variance assumption
//!
//! Both return [`TestError`] when the test is not computable on the given
//! data (too few observations, zero variance, non-finite results), so callers
//! decide explicitly how to degrade.

use crate::{
    descriptive::{mean, sample_variance},
    distribution::{f_survival, t_two_tailed},
};

/// Reasons a hypothesis test cannot be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum TestError {
    #[display("at least two groups are required")]
    TooFewGroups,
    #[display("group {_0} is empty")]
    EmptyGroup(#[error(not(source))] usize),
    #[display("not enough observations for the degrees of freedom")]
    TooFewObservations,
    #[display("variance is zero")]
    ZeroVariance,
    #[display("statistic or p-value is not finite")]
    NonFinite,
}

/// Result of a one-way ANOVA F-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnovaResult {
    /// The F statistic (between-group over within-group mean square).
    pub f_statistic: f64,
    /// Between-group degrees of freedom (`k - 1`).
    pub df_between: f64,
    /// Within-group degrees of freedom (`N - k`).
    pub df_within: f64,
    /// Upper tail probability of `f_statistic`.
    pub p_value: f64,
}

/// Result of a two-sample t-test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TTestResult {
    /// The t statistic (`mean(x) - mean(y)` over its standard error).
    pub t_statistic: f64,
    /// Welch-Satterthwaite degrees of freedom.
    pub df: f64,
    /// Two-tailed p-value.
    pub p_value: f64,
}

/// One-way analysis of variance.
///
/// Tests whether the means of `groups` are equal. Requires at least two
/// non-empty groups, more observations than groups, and a positive
/// within-group mean square.
///
/// # Examples
///
/// ```
/// use agenorm_stats::testing::anova_oneway;
///
/// let a = [10.0, 12.0, 11.0];
/// let b = [20.0, 22.0, 21.0];
/// let c = [10.0, 11.0, 12.0];
/// let result = anova_oneway(&[&a, &b, &c]).unwrap();
/// assert!((result.f_statistic - 100.0).abs() < 1e-9);
/// assert!(result.p_value < 0.001);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn anova_oneway(groups: &[&[f64]]) -> Result<AnovaResult, TestError> {
    let k = groups.len();
    if k < 2 {
        return Err(TestError::TooFewGroups);
    }
    if let Some(i) = groups.iter().position(|g| g.is_empty()) {
        return Err(TestError::EmptyGroup(i));
    }
    if groups.iter().flat_map(|g| g.iter()).any(|v| !v.is_finite()) {
        return Err(TestError::NonFinite);
    }

    let n_total = groups.iter().map(|g| g.len()).sum::<usize>();
    if n_total <= k {
        return Err(TestError::TooFewObservations);
    }

    let grand_mean = groups.iter().flat_map(|g| g.iter()).sum::<f64>() / n_total as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let group_mean = group.iter().sum::<f64>() / group.len() as f64;
        ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += group.iter().map(|x| (x - group_mean).powi(2)).sum::<f64>();
    }

    let df_between = (k - 1) as f64;
    let df_within = (n_total - k) as f64;
    let ms_within = ss_within / df_within;
    if ms_within <= 0.0 {
        return Err(TestError::ZeroVariance);
    }
    let f_statistic = (ss_between / df_between) / ms_within;
    let p_value = f_survival(f_statistic, df_between, df_within).ok_or(TestError::NonFinite)?;

    Ok(AnovaResult {
        f_statistic,
        df_between,
        df_within,
        p_value,
    })
}

/// Welch's two-sample t-test (unequal variances).
///
/// Each sample needs at least two observations. When both samples are
/// constant the standard error is zero: distinct means then give an infinite
/// `t_statistic` with p = 0 (and df = 1), equal means give
/// [`TestError::ZeroVariance`].
///
/// # Examples
///
/// ```
/// use agenorm_stats::testing::welch_t_test;
///
/// let result = welch_t_test(&[10.0, 12.0, 11.0], &[20.0, 22.0, 21.0]).unwrap();
/// assert!(result.t_statistic < 0.0);
/// assert!(result.p_value < 0.001);
/// ```
#[expect(clippy::cast_precision_loss)]
pub fn welch_t_test(x: &[f64], y: &[f64]) -> Result<TTestResult, TestError> {
    let (Some(var_x), Some(var_y)) = (sample_variance(x), sample_variance(y)) else {
        return Err(TestError::TooFewObservations);
    };
    let (Some(mean_x), Some(mean_y)) = (mean(x), mean(y)) else {
        return Err(TestError::TooFewObservations);
    };

    let vn_x = var_x / x.len() as f64;
    let vn_y = var_y / y.len() as f64;
    let se = (vn_x + vn_y).sqrt();
    let diff = mean_x - mean_y;
    if se <= 0.0 {
        if diff == 0.0 {
            return Err(TestError::ZeroVariance);
        }
        return Ok(TTestResult {
            t_statistic: diff / se,
            df: 1.0,
            p_value: 0.0,
        });
    }

    let t_statistic = diff / se;
    let df = (vn_x + vn_y).powi(2)
        / (vn_x.powi(2) / (x.len() - 1) as f64 + vn_y.powi(2) / (y.len() - 1) as f64);
    let p_value = t_two_tailed(t_statistic, df).ok_or(TestError::NonFinite)?;

    Ok(TTestResult {
        t_statistic,
        df,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anova_same_groups() {
        let g1 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let g2 = [1.5, 2.5, 3.5, 4.5, 5.5];
        let g3 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let result = anova_oneway(&[&g1, &g2, &g3]).unwrap();
        assert!(result.p_value > 0.3, "p={}", result.p_value);
        assert_eq!(result.df_between, 2.0);
        assert_eq!(result.df_within, 12.0);
    }

    #[test]
    fn test_anova_two_groups_matches_pooled_t() {
        // With two groups F = t² of the pooled-variance t-test.
        // g1 mean 3, g2 mean 5, pooled variance 2.5, t = -2 with 8 df
        let g1 = [1.0, 2.0, 3.0, 4.0, 5.0];
        let g2 = [3.0, 4.0, 5.0, 6.0, 7.0];
        let result = anova_oneway(&[&g1, &g2]).unwrap();
        assert!((result.f_statistic - 4.0).abs() < 1e-9);
        let p_t = t_two_tailed(2.0, 8.0).unwrap();
        assert!((result.p_value - p_t).abs() < 1e-9);
    }

    #[test]
    fn test_anova_degenerate_inputs() {
        assert_eq!(anova_oneway(&[&[1.0, 2.0]]), Err(TestError::TooFewGroups));
        assert_eq!(
            anova_oneway(&[&[1.0, 2.0], &[]]),
            Err(TestError::EmptyGroup(1))
        );
        assert_eq!(
            anova_oneway(&[&[1.0], &[2.0]]),
            Err(TestError::TooFewObservations)
        );
        assert_eq!(
            anova_oneway(&[&[5.0, 5.0], &[7.0, 7.0]]),
            Err(TestError::ZeroVariance)
        );
    }

    #[test]
    fn test_welch_symmetry() {
        let a = [1.0, 3.0, 5.0, 7.0];
        let b = [2.0, 2.5, 3.0];
        let ab = welch_t_test(&a, &b).unwrap();
        let ba = welch_t_test(&b, &a).unwrap();
        assert!((ab.t_statistic + ba.t_statistic).abs() < 1e-12);
        assert!((ab.p_value - ba.p_value).abs() < 1e-12);
        assert!((ab.df - ba.df).abs() < 1e-12);
    }

    #[test]
    fn test_welch_equal_samples() {
        let a = [10.0, 11.0, 12.0];
        let result = welch_t_test(&a, &a).unwrap();
        assert_eq!(result.t_statistic, 0.0);
        assert!((result.p_value - 1.0).abs() < 1e-12);
        // equal variances and sizes give n1 + n2 - 2 df
        assert!((result.df - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_welch_degenerate_inputs() {
        assert_eq!(
            welch_t_test(&[1.0], &[2.0, 3.0]),
            Err(TestError::TooFewObservations)
        );
        assert_eq!(
            welch_t_test(&[4.0, 4.0], &[4.0, 4.0, 4.0]),
            Err(TestError::ZeroVariance)
        );
    }

    #[test]
    fn test_welch_constant_samples_with_distinct_means() {
        let result = welch_t_test(&[4.0, 4.0], &[6.0, 6.0, 6.0]).unwrap();
        assert_eq!(result.t_statistic, f64::NEG_INFINITY);
        assert_eq!(result.p_value, 0.0);
        assert_eq!(result.df, 1.0);

        let result = welch_t_test(&[6.0, 6.0, 6.0], &[4.0, 4.0]).unwrap();
        assert_eq!(result.t_statistic, f64::INFINITY);
        assert_eq!(result.p_value, 0.0);
    }

    #[test]
    fn test_anova_reports_first_empty_group() {
        assert_eq!(
            anova_oneway(&[&[1.0, 2.0], &[3.0, 4.0], &[]]),
            Err(TestError::EmptyGroup(2))
        );
    }
}
