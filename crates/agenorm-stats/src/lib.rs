//! Statistical routines for age-normed reference tables.
//!
//! This crate provides the numeric building blocks of the report generator:
//!
//! - **Descriptive statistics**: sample size, mean, sample standard deviation
//! - **Percentiles**: linear interpolation between order statistics
//! - **Distributions**: log-gamma, incomplete beta, F and t tail probabilities
//! - **Hypothesis tests**: one-way ANOVA and Welch's two-sample t-test
//! - **Correction**: Bonferroni adjustment for pairwise comparisons
//! - **Rounding**: decimal rounding of reported values
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile computation and storage
//! - [`distribution`]: Special functions used for p-values
//! - [`testing`]: Omnibus and pairwise significance tests
//! - [`correction`]: Multiple testing correction
//! - [`rounding`]: Decimal rounding helpers
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use agenorm_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```
//!
//! ## Computing percentiles
//!
//! ```
//! use agenorm_stats::percentiles::Percentiles;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let percentiles = Percentiles::new(&values, &[25.0, 50.0, 75.0]);
//! assert_eq!(percentiles.get(50.0), Some(3.0));
//! ```
//!
//! ## Comparing groups
//!
//! ```
//! use agenorm_stats::{correction::bonferroni, testing::{anova_oneway, welch_t_test}};
//!
//! let a = [10.0, 12.0, 11.0];
//! let b = [20.0, 22.0, 21.0];
//! let c = [10.0, 11.0, 12.0];
//!
//! let anova = anova_oneway(&[&a, &b, &c]).unwrap();
//! assert!(anova.p_value < 0.05);
//!
//! let pair = welch_t_test(&a, &b).unwrap();
//! assert!(bonferroni(pair.p_value, 3) < 0.05);
//! ```

pub mod correction;
pub mod descriptive;
pub mod distribution;
pub mod percentiles;
pub mod rounding;
pub mod testing;
