//! Plain text output formatting.
//!
//! The report itself is unstyled text; error messages on stderr use colors.

use crate::scanner::{HostResults, Protocol};
use console::style;
use std::io::{self, Write};

/// Write a report in plain text format.
///
/// ```text
/// TCP scan:
/// localhost:
///     22: open
///     80: closed
///
/// nosuchhost: Host not found
///
/// ```
pub fn write_plain<W: Write>(
    out: &mut W,
    protocol: Protocol,
    results: &[HostResults],
) -> io::Result<()> {
    writeln!(out, "{} scan:", protocol)?;

    for result in results {
        if result.not_found {
            writeln!(out, "{}: Host not found", result.host)?;
            writeln!(out)?;
            continue;
        }

        writeln!(out, "{}:", result.host)?;
        for state in &result.port_states {
            writeln!(out, "\t{}", state)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Print an error message.
pub fn print_error(msg: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), msg);
}
