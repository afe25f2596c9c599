//! In-memory sample table loaded from a delimited text file.
//!
//! Cells are kept as text; numeric interpretation happens per column on
//! demand, so the same table serves metric columns, bracket labels and the
//! sex code alike.

use std::{collections::HashMap, fs::File, io, path::Path};

/// Column holding the subject age in months.
pub const AGE_COLUMN: &str = "eta mesi";
/// Column holding the single-letter sex code.
pub const SEX_COLUMN: &str = "sesso";

/// Cell contents treated as missing values.
const NA_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum TableError {
    #[display("failed to open {path}")]
    Open { path: String, source: io::Error },
    #[display("failed to parse CSV")]
    Csv(csv::Error),
}

/// Clinical sample: one row per subject, one column per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

impl SampleTable {
    /// Table with no columns and no rows.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from header names and rows of optional cells.
    ///
    /// Header names are trimmed; when a name repeats, the first column wins.
    /// Rows shorter than the header are padded with missing cells.
    #[must_use]
    pub fn new<H, S>(headers: H, rows: Vec<Vec<Option<String>>>) -> Self
    where
        H: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = headers
            .into_iter()
            .map(|h| h.as_ref().trim().to_owned())
            .collect::<Vec<_>>();
        let mut index = HashMap::new();
        for (i, name) in columns.iter().enumerate() {
            index.entry(name.clone()).or_insert(i);
        }
        let rows = rows
            .into_iter()
            .map(|mut row| {
                row.resize(columns.len(), None);
                row
            })
            .collect();
        Self {
            columns,
            index,
            rows,
        }
    }

    /// Reads a CSV file with a header row.
    pub fn from_path<P>(path: P, delimiter: u8) -> Result<Self, TableError>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| TableError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file, delimiter)
    }

    /// Reads CSV data with a header row.
    pub fn from_reader<R>(reader: R, delimiter: u8) -> Result<Self, TableError>
    where
        R: io::Read,
    {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers().map_err(TableError::Csv)?.clone();
        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(TableError::Csv)?;
            rows.push(
                record
                    .iter()
                    .take(headers.len())
                    .map(|cell| (!NA_MARKERS.contains(&cell)).then(|| cell.to_owned()))
                    .collect(),
            );
        }
        Ok(Self::new(headers.iter(), rows))
    }

    /// Number of subjects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    #[must_use]
    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Text cells of a column, `None` if the column does not exist.
    #[must_use]
    pub fn text_column(&self, name: &str) -> Option<Vec<Option<&str>>> {
        let i = *self.index.get(name)?;
        Some(self.rows.iter().map(|row| row[i].as_deref()).collect())
    }

    /// Cells of a column coerced to numbers, `None` if the column does not exist.
    ///
    /// Unparseable cells become missing values.
    #[must_use]
    pub fn numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let cells = self.text_column(name)?;
        Some(cells.into_iter().map(|c| c.and_then(parse_number)).collect())
    }
}

/// Parses a number written with either a decimal point or a decimal comma.
///
/// Returns `None` for unparseable or non-finite values.
#[must_use]
pub fn parse_number(cell: &str) -> Option<f64> {
    let normalized = cell.trim().replace(',', ".");
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("12"), Some(12.0));
        assert_eq!(parse_number("3,75"), Some(3.75));
        assert_eq!(parse_number(" 4.5 "), Some(4.5));
        assert_eq!(parse_number("abc"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number(""), None);
    }

    #[test]
    fn test_read_csv() {
        let data = "eta mesi , sesso,score\n50,M,\"3,5\"\n60,f,NA\n55,,x\n";
        let table = SampleTable::from_reader(data.as_bytes(), b',').unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.columns(), ["eta mesi", "sesso", "score"]);
        assert_eq!(
            table.numeric_column("score").unwrap(),
            vec![Some(3.5), None, None]
        );
        assert_eq!(
            table.text_column(SEX_COLUMN).unwrap(),
            vec![Some("M"), Some("f"), None]
        );
        assert_eq!(
            table.numeric_column(AGE_COLUMN).unwrap(),
            vec![Some(50.0), Some(60.0), Some(55.0)]
        );
        assert!(table.numeric_column("missing").is_none());
    }

    #[test]
    fn test_short_rows_are_padded() {
        let data = "a;b;c\n1;2\n4;5;6\n";
        let table = SampleTable::from_reader(data.as_bytes(), b';').unwrap();
        assert_eq!(table.numeric_column("c").unwrap(), vec![None, Some(6.0)]);
    }

    #[test]
    fn test_from_path() {
        let mut file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(file, "eta mesi,sesso").unwrap();
        writeln!(file, "48,M").unwrap();
        file.flush().unwrap();

        let table = SampleTable::from_path(file.path(), b',').unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.has_column("sesso"));
    }

    #[test]
    fn test_missing_file() {
        let err = SampleTable::from_path("/nonexistent/normative_data.csv", b',').unwrap_err();
        assert!(matches!(err, TableError::Open { .. }));
    }

    #[test]
    fn test_duplicate_header_keeps_first() {
        let table = SampleTable::new(
            ["x", " x "],
            vec![vec![Some("1".to_owned()), Some("2".to_owned())]],
        );
        assert_eq!(table.numeric_column("x").unwrap(), vec![Some(1.0)]);
    }
}
