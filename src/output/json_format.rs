//! JSON output formatting.

use crate::scanner::HostResults;
use std::io::Write;

/// Write results as a pretty-printed JSON array.
pub fn write_json<W: Write>(out: &mut W, results: &[HostResults]) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(&mut *out, results)?;
    writeln!(out).map_err(serde_json::Error::io)
}
