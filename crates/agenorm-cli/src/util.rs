use std::{
    fs::File,
    io::{self, BufWriter, StdoutLock, Write as _},
    path::{Path, PathBuf},
};

use agenorm_report::catalogue::MetricCatalogue;
use anyhow::Context;

#[derive(Debug)]
pub enum Output {
    Stdout {
        writer: StdoutLock<'static>,
    },
    File {
        writer: BufWriter<File>,
        path: PathBuf,
    },
}

impl Output {
    pub fn save_json<T>(value: &T, output_path: Option<PathBuf>) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        let mut output = Output::from_output_path(output_path)?;
        output.write_json(value)
    }

    pub fn from_output_path(output_path: Option<PathBuf>) -> anyhow::Result<Self> {
        match output_path {
            Some(path) => Output::open(path),
            None => Ok(Output::stdout()),
        }
    }

    pub fn stdout() -> Self {
        Output::Stdout {
            writer: io::stdout().lock(),
        }
    }

    pub fn open(path: PathBuf) -> anyhow::Result<Self> {
        let file = File::create(&path)
            .with_context(|| format!("Failed to create output file: {}", path.display()))?;
        Ok(Output::File {
            writer: BufWriter::new(file),
            path,
        })
    }

    pub fn display_path(&self) -> String {
        match self {
            Output::Stdout { .. } => "stdout".to_string(),
            Output::File { path, .. } => path.display().to_string(),
        }
    }

    /// Writes `value` as pretty JSON followed by a newline, then flushes.
    pub fn write_json<T>(&mut self, value: T) -> anyhow::Result<()>
    where
        T: serde::Serialize,
    {
        serde_json::to_writer_pretty(&mut *self, &value)
            .with_context(|| format!("Failed to write JSON to {}", self.display_path()))?;
        writeln!(&mut *self).with_context(|| {
            format!(
                "Failed to write newline after JSON to {}",
                self.display_path()
            )
        })?;
        self.flush()
            .with_context(|| format!("Failed to flush output to {}", self.display_path()))?;
        Ok(())
    }
}

impl io::Write for Output {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Output::Stdout { writer } => writer.write(buf),
            Output::File { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Output::Stdout { writer } => writer.flush(),
            Output::File { writer, .. } => writer.flush(),
        }
    }
}

/// Read a metric catalogue from a JSON file
///
/// # Errors
///
/// Returns error if the file cannot be opened, is not valid JSON, or repeats
/// a category name
pub fn read_catalogue_file<P>(path: P) -> anyhow::Result<MetricCatalogue>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open catalogue file: {}", path.display()))?;
    let reader = io::BufReader::new(file);
    MetricCatalogue::from_reader(reader)
        .with_context(|| format!("Failed to parse catalogue file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_read_catalogue_file() {
        let mut file = NamedTempFile::with_suffix(".json").unwrap();
        write!(
            file,
            r#"{{"categories": [{{"name": "Lessico", "metrics": ["MTLD", ["vocD", "VOC-D"]]}}]}}"#
        )
        .unwrap();
        file.flush().unwrap();

        let catalogue = read_catalogue_file(file.path()).unwrap();
        assert_eq!(catalogue.categories()[0].name, "Lessico");
        assert_eq!(catalogue.categories()[0].metrics[1].display, "VOC-D");
    }

    #[test]
    fn test_read_missing_catalogue_file() {
        let err = read_catalogue_file("/nonexistent/catalogue.json").unwrap_err();
        assert!(err.to_string().contains("Failed to open catalogue file"));
    }

    #[test]
    fn test_output_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogue.json");
        Output::save_json(&MetricCatalogue::builtin(), Some(path.clone())).unwrap();
        let catalogue = read_catalogue_file(&path).unwrap();
        assert_eq!(catalogue, MetricCatalogue::builtin());
    }
}
