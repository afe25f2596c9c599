//! Persisted form of the report: a script assigning the JSON document to a constant.

use std::io::{self, Write};

use crate::report::Report;

/// Text preceding the JSON document.
pub const ENVELOPE_PREFIX: &str = "const GLOBAL_DATA = ";
/// Text following the JSON document.
pub const ENVELOPE_SUFFIX: &str = ";";

/// Writes `const GLOBAL_DATA = <json>;` with the report pretty-printed
/// (two-space indentation, non-ASCII characters left unescaped).
pub fn write_report<W>(mut writer: W, report: &Report) -> io::Result<()>
where
    W: Write,
{
    writer.write_all(ENVELOPE_PREFIX.as_bytes())?;
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.write_all(ENVELOPE_SUFFIX.as_bytes())?;
    writer.flush()
}
