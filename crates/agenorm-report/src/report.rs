//! Assembly of the full report: per-mode metric results, sex rosters and the
//! global sample summary.
//!
//! The report is built bottom-up by [`ReportBuilder`] and never mutated
//! afterwards:
//!
//! ```text
//! GroupStats / OmnibusResult / PostHocComparison
//!     ↓
//! MetricResult
//!     ↓
//! CategoryResults (category name → metric results)
//!     ↓
//! ModeReport (one per binning mode)
//!     ↓
//! Report (+ rosters, sample summary)
//! ```

use agenorm_stats::rounding::round_to;
use serde::{Serialize, Serializer, ser::SerializeStruct as _};

use crate::{
    bracket::{BinningMode, PerMode},
    catalogue::{Category, Metric, MetricCatalogue},
    group::resolve_groups,
    metric::MetricResult,
    table::{AGE_COLUMN, SEX_COLUMN, SampleTable},
};

/// Metric results of one category, in catalogue order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryResults {
    pub name: String,
    pub metrics: Vec<MetricResult>,
}

/// Results of every category under one binning mode.
///
/// Serialized as a JSON object keyed by category name, preserving catalogue order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeReport {
    pub categories: Vec<CategoryResults>,
}

impl ModeReport {
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&CategoryResults> {
        self.categories.iter().find(|c| c.name == name)
    }
}

impl Serialize for ModeReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_map(self.categories.iter().map(|c| (&c.name, &c.metrics)))
    }
}

/// Sex counts of one canonical bracket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    /// 1-based position of the bracket in the mode's canonical list.
    #[serde(rename = "fascia")]
    pub position: usize,
    #[serde(rename = "M")]
    pub male: usize,
    #[serde(rename = "F")]
    pub female: usize,
}

/// Counts male and female subjects per canonical bracket present in the table.
///
/// Sex codes match case-insensitively; other or missing codes count in
/// neither column.
#[must_use]
pub fn roster(table: &SampleTable, mode: BinningMode) -> Vec<RosterEntry> {
    let Some(labels) = table.text_column(mode.grouping_column()) else {
        return vec![];
    };
    let sexes = table
        .text_column(SEX_COLUMN)
        .unwrap_or_else(|| vec![None; labels.len()]);

    mode.brackets()
        .iter()
        .enumerate()
        .filter_map(|(i, bracket)| {
            let mut present = false;
            let mut entry = RosterEntry {
                position: i + 1,
                male: 0,
                female: 0,
            };
            for (label, sex) in labels.iter().zip(&sexes) {
                if *label != Some(*bracket) {
                    continue;
                }
                present = true;
                match sex {
                    Some(s) if s.eq_ignore_ascii_case("M") => entry.male += 1,
                    Some(s) if s.eq_ignore_ascii_case("F") => entry.female += 1,
                    _ => {}
                }
            }
            present.then_some(entry)
        })
        .collect()
}

/// Age statistics over the whole sample, in months.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AgeSummary {
    /// Mean age, rounded to one decimal.
    #[serde(rename = "media")]
    pub mean: Option<f64>,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

/// Global description of the sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SampleSummary {
    /// Number of subjects (table rows).
    #[serde(rename = "totale")]
    pub total: usize,
    #[serde(rename = "eta")]
    pub age: AgeSummary,
}

impl SampleSummary {
    /// Summarizes the table. Age fields are `None` when no subject has a
    /// parsable age.
    #[expect(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_table(table: &SampleTable) -> Self {
        let ages = table
            .numeric_column(AGE_COLUMN)
            .unwrap_or_default()
            .into_iter()
            .flatten()
            .collect::<Vec<_>>();
        let mean = (!ages.is_empty())
            .then(|| round_to(ages.iter().sum::<f64>() / ages.len() as f64, 1));
        let min = ages.iter().copied().reduce(f64::min).map(|v| v as i64);
        let max = ages.iter().copied().reduce(f64::max).map(|v| v as i64);

        Self {
            total: table.len(),
            age: AgeSummary { mean, min, max },
        }
    }
}

/// The complete report rendered by the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub results: PerMode<ModeReport>,
    pub rosters: PerMode<Vec<RosterEntry>>,
    pub sample: SampleSummary,
}

impl Report {
    #[must_use]
    pub fn mode(&self, mode: BinningMode) -> &ModeReport {
        self.results.get(mode)
    }
}

impl Serialize for Report {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Report", BinningMode::ALL.len() + 2)?;
        for (mode, results) in self.results.iter() {
            s.serialize_field(mode.key(), results)?;
        }
        s.serialize_field("descrittive", &self.rosters)?;
        s.serialize_field("info_campione", &self.sample)?;
        s.end()
    }
}

/// Runs the statistics of every catalogued metric under every binning mode.
#[derive(Debug, Clone, Copy)]
pub struct ReportBuilder<'a> {
    catalogue: &'a MetricCatalogue,
}

impl<'a> ReportBuilder<'a> {
    #[must_use]
    pub fn new(catalogue: &'a MetricCatalogue) -> Self {
        Self { catalogue }
    }

    #[must_use]
    pub fn build(&self, table: &SampleTable) -> Report {
        Report {
            results: PerMode::from_fn(|mode| self.mode_report(table, mode)),
            rosters: PerMode::from_fn(|mode| roster(table, mode)),
            sample: SampleSummary::from_table(table),
        }
    }

    /// Results of one mode. Categories left without any metric are omitted.
    #[must_use]
    pub fn mode_report(&self, table: &SampleTable, mode: BinningMode) -> ModeReport {
        let categories = self
            .catalogue
            .categories()
            .iter()
            .filter_map(|category| Self::category_results(table, mode, category))
            .collect();
        ModeReport { categories }
    }

    fn category_results(
        table: &SampleTable,
        mode: BinningMode,
        category: &Category,
    ) -> Option<CategoryResults> {
        let metrics = category
            .metrics
            .iter()
            .filter_map(|metric| Self::metric_result(table, mode, metric))
            .collect::<Vec<_>>();
        (!metrics.is_empty()).then(|| CategoryResults {
            name: category.name.clone(),
            metrics,
        })
    }

    /// `None` when the metric column is absent or holds no value in any
    /// canonical bracket.
    fn metric_result(
        table: &SampleTable,
        mode: BinningMode,
        metric: &Metric,
    ) -> Option<MetricResult> {
        if !table.has_column(&metric.source) {
            return None;
        }
        let resolved = resolve_groups(table, &metric.source, mode.grouping_column(), mode)?;
        Some(MetricResult::compute(&metric.display, &resolved))
    }
}
