use std::path::{Path, PathBuf};

use agenorm_report::{
    bracket::BinningMode,
    catalogue::MetricCatalogue,
    envelope,
    report::{Report, ReportBuilder},
    table::SampleTable,
};
use anyhow::Context as _;

use crate::util::{self, Output};

const DEFAULT_INPUT: &str = "normative_data.csv";
const DEFAULT_OUTPUT: &str = "data.js";

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct GenerateArg {
    /// Sample CSV file path
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,
    /// Output file path (`-` for stdout)
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Metric catalogue JSON file (built-in catalogue when omitted)
    #[arg(long)]
    catalogue: Option<PathBuf>,
    /// Field delimiter of the sample file
    #[arg(long, default_value_t = ',')]
    delimiter: char,
}

impl Default for GenerateArg {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            catalogue: None,
            delimiter: ',',
        }
    }
}

pub(crate) fn run(arg: &GenerateArg) -> anyhow::Result<()> {
    let GenerateArg {
        input,
        output,
        catalogue,
        delimiter,
    } = arg;

    let delimiter = u8::try_from(*delimiter)
        .ok()
        .filter(u8::is_ascii)
        .with_context(|| format!("Delimiter must be an ASCII character: {delimiter:?}"))?;

    let catalogue = match catalogue {
        Some(path) => util::read_catalogue_file(path)?,
        None => MetricCatalogue::builtin(),
    };

    eprintln!("Loading sample from {}...", input.display());
    let table = load_sample(input, delimiter);

    eprintln!("Computing statistics...");
    let report = ReportBuilder::new(&catalogue).build(&table);
    print_report_summary(&report);

    let mut writer = Output::from_output_path(output_path(output))?;
    envelope::write_report(&mut writer, &report)
        .with_context(|| format!("Failed to write report to {}", writer.display_path()))?;
    eprintln!("Report written to {}", writer.display_path());
    eprintln!("Generation completed.");

    Ok(())
}

/// `None` (stdout) for `-`.
fn output_path(output: &Path) -> Option<PathBuf> {
    (output.as_os_str() != "-").then(|| output.to_owned())
}

/// Reads the sample table, falling back to an empty table when it cannot be read.
fn load_sample(input: &Path, delimiter: u8) -> SampleTable {
    match SampleTable::from_path(input, delimiter) {
        Ok(table) => {
            eprintln!(
                "Loaded {} rows, {} columns",
                table.len(),
                table.columns().len()
            );
            table
        }
        Err(err) => {
            let err = anyhow::Error::new(err);
            eprintln!("Failed to load sample: {err:#}");
            eprintln!("Continuing with an empty sample");
            SampleTable::empty()
        }
    }
}

fn print_report_summary(report: &Report) {
    for mode in BinningMode::ALL {
        let mode_report = report.mode(mode);
        let num_metrics = mode_report
            .categories
            .iter()
            .map(|c| c.metrics.len())
            .sum::<usize>();
        let num_significant = mode_report
            .categories
            .iter()
            .flat_map(|c| &c.metrics)
            .filter(|m| m.omnibus.is_significant())
            .count();
        eprintln!(
            "  {mode}: {num_metrics} metrics in {} categories, {num_significant} with significant ANOVA",
            mode_report.categories.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    const HEADER: &str = "eta mesi;sesso;fascia eta 12m;fascia eta 6m;MTLD";

    fn arg(input: PathBuf, output: PathBuf) -> GenerateArg {
        GenerateArg {
            input,
            output,
            ..GenerateArg::default()
        }
    }

    fn assert_degenerate_artifact(path: &Path) {
        let text = fs::read_to_string(path).unwrap();
        assert!(text.starts_with("const GLOBAL_DATA = "));
        assert!(text.ends_with(';'));
        assert!(text.contains("\"totale\": 0"));
        assert!(text.contains("\"annuale\": {}"));
        assert!(text.contains("\"semestrale\": {}"));
    }

    #[test]
    fn test_missing_input_writes_degenerate_report() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("data.js");
        run(&arg(dir.path().join("missing.csv"), output.clone())).unwrap();
        assert_degenerate_artifact(&output);
    }

    #[test]
    fn test_unreadable_input_writes_degenerate_report() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("broken.csv");
        fs::write(&input, [0xff, 0xfe, b'\n', b'1', b'\n']).unwrap();
        let output = dir.path().join("data.js");
        run(&arg(input, output.clone())).unwrap();
        assert_degenerate_artifact(&output);
    }

    #[test]
    fn test_generate_with_delimiter_and_catalogue() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("sample.csv");
        fs::write(
            &input,
            format!("{HEADER}\n45;M;3.6-4.5;3.6-3.11;30\n70;F;5.6-6.5;5.6-5.11;40\n"),
        )
        .unwrap();
        let catalogue = dir.path().join("catalogue.json");
        fs::write(
            &catalogue,
            r#"{"categories": [{"name": "Lessico", "metrics": [["MTLD", "Diversità"]]}]}"#,
        )
        .unwrap();
        let output = dir.path().join("data.js");

        run(&GenerateArg {
            input,
            output: output.clone(),
            catalogue: Some(catalogue),
            delimiter: ';',
        })
        .unwrap();

        let text = fs::read_to_string(&output).unwrap();
        assert!(text.contains("\"Lessico\""));
        assert!(text.contains("\"DIVERSITÀ\""));
        assert!(text.contains("\"totale\": 2"));
    }

    #[test]
    fn test_non_ascii_delimiter_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("data.js");
        let err = run(&GenerateArg {
            delimiter: 'é',
            ..arg(dir.path().join("sample.csv"), output.clone())
        })
        .unwrap_err();
        assert!(err.to_string().contains("ASCII"));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_catalogue_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let catalogue = dir.path().join("catalogue.json");
        fs::write(&catalogue, "{").unwrap();
        let output = dir.path().join("data.js");
        let result = run(&GenerateArg {
            catalogue: Some(catalogue),
            ..arg(dir.path().join("missing.csv"), output.clone())
        });
        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_dash_output_means_stdout() {
        assert_eq!(output_path(Path::new("-")), None);
        assert_eq!(
            output_path(Path::new("out/data.js")),
            Some(PathBuf::from("out/data.js"))
        );
    }
}
