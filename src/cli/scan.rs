//! Scan subcommand implementation.
//!
//! Handles the `pscan scan` command: probes the configured ports on every
//! host in the host list and prints the report.

use crate::cli::{Context, OutputFormat};
use crate::config::AppSettings;
use crate::error::CliResult;
use crate::output;
use crate::scanner::{Resolver, ScanConfig, ScanEngine};
use crate::storage::HostSet;
use clap::Parser;
use std::io::Write;
use std::time::Duration;
use tracing::warn;

/// Scan every host in the host list.
#[derive(Parser, Debug, Default)]
pub struct ScanCommand {
    /// Ports to scan: single ports or inclusive ranges (e.g. "22", "20-25", "22,80,8000-8080")
    #[arg(short, long, value_name = "SPEC", value_delimiter = ',')]
    pub ports: Vec<String>,

    /// Use a TCP connect scan
    #[arg(short = 'T', long)]
    pub tcp: bool,

    /// Use a UDP scan (any reply within the timeout counts as open)
    #[arg(short = 'U', long)]
    pub udp: bool,

    /// Output format for results
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// TCP connect timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub tcp_timeout: Option<u64>,

    /// UDP reply timeout in milliseconds
    #[arg(long, value_name = "MS")]
    pub udp_timeout: Option<u64>,

    /// Hostname resolution strategy
    #[arg(long, value_enum)]
    pub resolver: Option<Resolver>,
}

impl ScanCommand {
    /// Build the scan configuration, filling unset options from `settings`.
    pub fn scan_config(&self, settings: &AppSettings) -> ScanConfig {
        let ports = if self.ports.is_empty() {
            settings.default_ports.clone()
        } else {
            self.ports.clone()
        };

        ScanConfig {
            tcp: self.tcp,
            udp: self.udp,
            ports,
            ..ScanConfig::default()
        }
        .with_tcp_timeout(
            self.tcp_timeout
                .map_or_else(|| settings.tcp_timeout(), Duration::from_millis),
        )
        .with_udp_timeout(
            self.udp_timeout
                .map_or_else(|| settings.udp_timeout(), Duration::from_millis),
        )
        .with_resolver(self.resolver.unwrap_or(settings.resolver))
    }

    /// Execute the scan command.
    pub async fn execute<W: Write>(&self, out: &mut W, ctx: &Context) -> CliResult<()> {
        let config = self.scan_config(&ctx.settings);

        // Configuration problems surface before the host list is touched.
        let engine = ScanEngine::new(&config)?;

        let hosts = HostSet::from_file(&ctx.hosts_file)?;
        if hosts.is_empty() {
            warn!(
                path = %ctx.hosts_file.display(),
                "host list is empty, add hosts with `pscan hosts add`"
            );
        }
        if engine.ports().is_empty() {
            warn!("no valid ports to scan");
        }

        let results = engine.run(&hosts).await;

        let format = self.output.unwrap_or(ctx.settings.default_output_format);
        output::write_results(out, format, engine.protocol(), &results)
    }
}
