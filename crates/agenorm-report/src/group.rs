//! Partitioning of a metric column into the canonical age brackets present in the data.

use crate::{bracket::BinningMode, table::SampleTable};

/// Values of one metric for subjects in a single present bracket.
#[derive(Debug, Clone, PartialEq)]
pub struct BracketGroup {
    /// Canonical bracket label.
    pub label: &'static str,
    /// 1-based rank of the bracket among the present brackets, in canonical order.
    pub ordinal: usize,
    /// Metric values, in table row order.
    pub values: Vec<f64>,
}

/// Present brackets of one metric under one binning mode.
///
/// Always holds at least one group.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedGroups {
    groups: Vec<BracketGroup>,
}

impl ResolvedGroups {
    #[must_use]
    pub fn groups(&self) -> &[BracketGroup] {
        &self.groups
    }
}

/// Collects the values of `metric_column` per canonical bracket of `mode`,
/// reading bracket labels from `group_column`.
///
/// Rows with a missing or non-numeric metric value or a missing label are
/// dropped, as are labels outside the mode's catalogue. Returns `None` when
/// either column is absent or no canonical bracket is left.
#[must_use]
pub fn resolve_groups(
    table: &SampleTable,
    metric_column: &str,
    group_column: &str,
    mode: BinningMode,
) -> Option<ResolvedGroups> {
    let values = table.numeric_column(metric_column)?;
    let labels = table.text_column(group_column)?;

    let mut buckets = vec![Vec::new(); mode.brackets().len()];
    for (value, label) in values.into_iter().zip(labels) {
        let (Some(value), Some(label)) = (value, label) else {
            continue;
        };
        if let Some(i) = mode.brackets().iter().position(|b| *b == label) {
            buckets[i].push(value);
        }
    }

    let groups = mode
        .brackets()
        .iter()
        .zip(buckets)
        .filter(|(_, values)| !values.is_empty())
        .enumerate()
        .map(|(i, (&label, values))| BracketGroup {
            label,
            ordinal: i + 1,
            values,
        })
        .collect::<Vec<_>>();

    if groups.is_empty() {
        return None;
    }
    Some(ResolvedGroups { groups })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[(&str, &str)]) -> SampleTable {
        SampleTable::new(
            ["score", "fascia eta 6m"],
            rows.iter()
                .map(|(v, g)| {
                    [v, g]
                        .iter()
                        .map(|c| (!c.is_empty()).then(|| c.to_string()))
                        .collect()
                })
                .collect(),
        )
    }

    fn resolve(table: &SampleTable) -> Option<ResolvedGroups> {
        let mode = BinningMode::Semestral;
        resolve_groups(table, "score", mode.grouping_column(), mode)
    }

    #[test]
    fn test_ordinals_follow_canonical_order_of_present_brackets() {
        let table = table(&[
            ("1", "6.0-6.5"),
            ("2", "4.0-4.5"),
            ("3", "6.0-6.5"),
            ("4", "4.0-4.5"),
            ("5", "4.0-4.5"),
        ]);
        let resolved = resolve(&table).unwrap();
        let summary = resolved
            .groups()
            .iter()
            .map(|g| (g.label, g.ordinal, g.values.clone()))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                ("4.0-4.5", 1, vec![2.0, 4.0, 5.0]),
                ("6.0-6.5", 2, vec![1.0, 3.0]),
            ]
        );
    }

    #[test]
    fn test_missing_and_foreign_values_are_dropped() {
        let table = table(&[
            ("1", "3.6-3.11"),
            ("", "3.6-3.11"),
            ("n.v.", "3.6-3.11"),
            ("7", ""),
            ("8", "3.6-4.5"),
            ("9", "3.6-3.11 "),
        ]);
        let resolved = resolve(&table).unwrap();
        assert_eq!(resolved.groups().len(), 1);
        assert_eq!(resolved.groups()[0].values, vec![1.0]);
    }

    #[test]
    fn test_no_data() {
        let table = table(&[("", "4.0-4.5"), ("3", "9.9-9.9")]);
        assert!(resolve(&table).is_none());
        assert!(resolve_groups(&table, "absent", "fascia eta 6m", BinningMode::Semestral).is_none());
        assert!(resolve_groups(&table, "score", "absent", BinningMode::Semestral).is_none());
    }
}
