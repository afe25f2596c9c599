use std::path::PathBuf;

use agenorm_report::catalogue::MetricCatalogue;

use crate::util::Output;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct ExportCatalogueArg {
    /// Output file path (stdout when omitted)
    #[arg(long)]
    output: Option<PathBuf>,
}

pub(crate) fn run(arg: &ExportCatalogueArg) -> anyhow::Result<()> {
    Output::save_json(&MetricCatalogue::builtin(), arg.output.clone())
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::util::read_catalogue_file;

    use super::*;

    #[test]
    fn test_export_catalogue_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogue.json");
        run(&ExportCatalogueArg {
            output: Some(path.clone()),
        })
        .unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("{\n  \"categories\": [\n"));
        assert!(text.ends_with("}\n"));
        assert_eq!(read_catalogue_file(&path).unwrap(), MetricCatalogue::builtin());
    }
}
