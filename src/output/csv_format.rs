//! CSV output formatting.

use crate::scanner::HostResults;
use std::io::Write;

/// State column value for hosts that did not resolve.
const NOT_FOUND: &str = "not found";

/// Write results as `host,port,state` rows.
///
/// A host that did not resolve gets a single row with an empty port.
pub fn write_csv<W: Write>(out: W, results: &[HostResults]) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(out);

    wtr.write_record(["host", "port", "state"])?;

    for result in results {
        if result.not_found {
            wtr.write_record([result.host.as_str(), "", NOT_FOUND])?;
            continue;
        }
        for state in &result.port_states {
            let port = state.port.to_string();
            wtr.write_record([result.host.as_str(), port.as_str(), state.state_str()])?;
        }
    }

    wtr.flush()?;
    Ok(())
}
