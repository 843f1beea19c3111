//! Output formatting module.
//!
//! Provides formatters for plain text, JSON, and CSV output of scan results.

mod csv_format;
mod json_format;
mod plain;

pub use csv_format::write_csv;
pub use json_format::write_json;
pub use plain::{print_error, write_plain};

use crate::cli::OutputFormat;
use crate::error::CliResult;
use crate::scanner::{HostResults, Protocol};
use std::io::Write;

/// Format and write scan results according to the specified format.
pub fn write_results<W: Write>(
    out: &mut W,
    format: OutputFormat,
    protocol: Protocol,
    results: &[HostResults],
) -> CliResult<()> {
    match format {
        OutputFormat::Plain => write_plain(out, protocol, results)?,
        OutputFormat::Json => write_json(out, results)?,
        OutputFormat::Csv => write_csv(out, results)?,
    }
    Ok(())
}
