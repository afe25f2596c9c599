//! Canonical age brackets for each binning mode.

use std::fmt;

/// Scheme used to partition subjects into age brackets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BinningMode {
    /// Twelve-month brackets.
    Annual,
    /// Six-month brackets.
    Semestral,
}

const ANNUAL_BRACKETS: &[&str] = &["3.6-4.5", "4.6-5.5", "5.6-6.5"];
const SEMESTRAL_BRACKETS: &[&str] = &[
    "3.6-3.11", "4.0-4.5", "4.6-4.11", "5.0-5.5", "5.6-5.11", "6.0-6.5",
];

impl BinningMode {
    /// All modes, in report order.
    pub const ALL: [Self; 2] = [Self::Annual, Self::Semestral];

    /// Key identifying the mode in the report.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::Annual => "annuale",
            Self::Semestral => "semestrale",
        }
    }

    /// Column of the sample table holding the bracket label for this mode.
    #[must_use]
    pub fn grouping_column(self) -> &'static str {
        match self {
            Self::Annual => "fascia eta 12m",
            Self::Semestral => "fascia eta 6m",
        }
    }

    /// Canonical bracket labels, youngest first.
    ///
    /// These are the only labels recognized for the mode; any other value in
    /// the grouping column is ignored.
    #[must_use]
    pub fn brackets(self) -> &'static [&'static str] {
        match self {
            Self::Annual => ANNUAL_BRACKETS,
            Self::Semestral => SEMESTRAL_BRACKETS,
        }
    }
}

impl fmt::Display for BinningMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A value stored once per binning mode.
#[derive(Debug, Clone, PartialEq)]
pub struct PerMode<T> {
    annual: T,
    semestral: T,
}

impl<T> PerMode<T> {
    /// Builds the value for every mode.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(BinningMode) -> T,
    {
        Self {
            annual: f(BinningMode::Annual),
            semestral: f(BinningMode::Semestral),
        }
    }

    #[must_use]
    pub fn get(&self, mode: BinningMode) -> &T {
        match mode {
            BinningMode::Annual => &self.annual,
            BinningMode::Semestral => &self.semestral,
        }
    }

    /// Iterates `(mode, value)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (BinningMode, &T)> {
        BinningMode::ALL.into_iter().map(|mode| (mode, self.get(mode)))
    }
}

impl<T> serde::Serialize for PerMode<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_map(self.iter().map(|(mode, value)| (mode.key(), value)))
    }
}
