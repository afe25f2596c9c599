//! Per-metric statistics: descriptive tables, omnibus test and post-hoc comparisons.

use std::fmt;

use agenorm_stats::{
    correction::{bonferroni, num_pairs},
    descriptive::DescriptiveStats,
    percentiles::Percentiles,
    rounding::round_to,
    testing::{AnovaResult, TestError, anova_oneway, welch_t_test},
};
use serde::{Serialize, Serializer, ser::SerializeStruct as _};

use crate::group::{BracketGroup, ResolvedGroups};

/// Percentiles reported for every bracket.
pub const PERCENTILE_POINTS: [f64; 7] = [5.0, 10.0, 25.0, 50.0, 75.0, 90.0, 95.0];

/// Threshold below which a (corrected) p-value is significant.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Descriptive statistics of one metric within one bracket, rounded for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    #[serde(rename = "Fascia")]
    pub label: &'static str,
    #[serde(rename = "ID", serialize_with = "serialize_ordinal")]
    pub ordinal: usize,
    #[serde(rename = "N")]
    pub count: usize,
    #[serde(rename = "Media")]
    pub mean: f64,
    #[serde(rename = "DS")]
    pub std_dev: f64,
    #[serde(rename = "P5")]
    pub p5: f64,
    #[serde(rename = "P10")]
    pub p10: f64,
    #[serde(rename = "P25")]
    pub p25: f64,
    #[serde(rename = "P50")]
    pub p50: f64,
    #[serde(rename = "P75")]
    pub p75: f64,
    #[serde(rename = "P90")]
    pub p90: f64,
    #[serde(rename = "P95")]
    pub p95: f64,
}

impl GroupStats {
    /// Summarizes a bracket. Returns `None` for a bracket without values.
    #[must_use]
    pub fn from_group(group: &BracketGroup) -> Option<Self> {
        let mut sorted = group.values.clone();
        sorted.sort_by(f64::total_cmp);
        let stats = DescriptiveStats::from_sorted(&sorted)?;
        let percentiles = Percentiles::from_sorted(&sorted, &PERCENTILE_POINTS);
        let p = |point: f64| round_to(percentiles.get(point).unwrap_or(f64::NAN), 2);

        Some(Self {
            label: group.label,
            ordinal: group.ordinal,
            count: stats.count,
            mean: round_to(stats.mean, 2),
            std_dev: round_to(stats.std_dev, 2),
            p5: p(5.0),
            p10: p(10.0),
            p25: p(25.0),
            p50: p(50.0),
            p75: p(75.0),
            p90: p(90.0),
            p95: p(95.0),
        })
    }

    /// Percentile values in ascending percentile order.
    #[must_use]
    pub fn percentiles(&self) -> [f64; 7] {
        [
            self.p5, self.p10, self.p25, self.p50, self.p75, self.p90, self.p95,
        ]
    }
}

/// Outcome of the one-way ANOVA across the present brackets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OmnibusResult {
    Computed(AnovaResult),
    /// Fewer than two brackets, or data on which the test is undefined.
    NotComputable(TestError),
}

impl OmnibusResult {
    #[must_use]
    pub fn from_groups(groups: &[BracketGroup]) -> Self {
        let samples = groups.iter().map(|g| g.values.as_slice()).collect::<Vec<_>>();
        match anova_oneway(&samples) {
            Ok(result) => Self::Computed(result),
            Err(err) => Self::NotComputable(err),
        }
    }

    #[must_use]
    pub fn is_significant(&self) -> bool {
        match self {
            Self::Computed(result) => result.p_value < SIGNIFICANCE_LEVEL,
            Self::NotComputable(_) => false,
        }
    }

    /// Short text shown next to the significance flag.
    #[must_use]
    pub fn summary(&self) -> String {
        match self {
            Self::Computed(result) => {
                format!("F={:.2}, p={:.4}", result.f_statistic, result.p_value)
            }
            Self::NotComputable(_) => "N/A".to_owned(),
        }
    }
}

impl Serialize for OmnibusResult {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("OmnibusResult", 2)?;
        s.serialize_field("sig", &self.is_significant())?;
        s.serialize_field("text", &self.summary())?;
        s.end()
    }
}

/// A bracket pair whose means differ after Bonferroni correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostHocComparison {
    pub ordinal_a: usize,
    pub ordinal_b: usize,
    /// Corrected p-value, below [`SIGNIFICANCE_LEVEL`].
    pub p_adjusted: f64,
}

impl PostHocComparison {
    /// Welch tests on every unordered pair of brackets, keeping the
    /// significant pairs.
    ///
    /// The correction factor is the number of enumerated pairs, including
    /// pairs whose test could not be computed (those are skipped).
    #[must_use]
    pub fn from_groups(groups: &[BracketGroup]) -> Vec<Self> {
        let num_tests = num_pairs(groups.len());
        let mut comparisons = Vec::new();
        for (i, a) in groups.iter().enumerate() {
            for b in &groups[i + 1..] {
                let Ok(result) = welch_t_test(&a.values, &b.values) else {
                    continue;
                };
                let p_adjusted = bonferroni(result.p_value, num_tests);
                if p_adjusted < SIGNIFICANCE_LEVEL {
                    comparisons.push(Self {
                        ordinal_a: a.ordinal,
                        ordinal_b: b.ordinal,
                        p_adjusted,
                    });
                }
            }
        }
        comparisons
    }
}

impl fmt::Display for PostHocComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<b>{} vs {}</b> (p={:.3})",
            self.ordinal_a, self.ordinal_b, self.p_adjusted
        )
    }
}

impl Serialize for PostHocComparison {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Raw values of one bracket, for plotting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    #[serde(rename = "group", serialize_with = "serialize_ordinal")]
    pub ordinal: usize,
    pub values: Vec<f64>,
}

/// Everything reported for one metric under one binning mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricResult {
    pub name: String,
    #[serde(rename = "anova")]
    pub omnibus: OmnibusResult,
    #[serde(rename = "posthoc")]
    pub post_hoc: Vec<PostHocComparison>,
    #[serde(rename = "table")]
    pub group_stats: Vec<GroupStats>,
    #[serde(rename = "chart_data")]
    pub chart: Vec<ChartSeries>,
}

impl MetricResult {
    /// Runs every statistic for a metric whose brackets have been resolved.
    ///
    /// The reported name is `display_name` in upper case. Post-hoc comparisons
    /// run only after a significant omnibus test.
    #[must_use]
    pub fn compute(display_name: &str, resolved: &ResolvedGroups) -> Self {
        let groups = resolved.groups();
        let omnibus = OmnibusResult::from_groups(groups);
        let post_hoc = if omnibus.is_significant() {
            PostHocComparison::from_groups(groups)
        } else {
            vec![]
        };
        let group_stats = groups.iter().filter_map(GroupStats::from_group).collect();
        let chart = groups
            .iter()
            .map(|g| ChartSeries {
                ordinal: g.ordinal,
                values: g.values.clone(),
            })
            .collect();

        Self {
            name: display_name.to_uppercase(),
            omnibus,
            post_hoc,
            group_stats,
            chart,
        }
    }
}

fn serialize_ordinal<S>(ordinal: &usize, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(ordinal)
}
