//! CLI subcommand definitions and handlers.
//!
//! Implements a git-like subcommand architecture:
//! - `pscan hosts add|list|delete` - Manage the host list
//! - `pscan scan` - Scan every host in the list

mod hosts;
mod scan;

pub use hosts::{add_hosts, delete_hosts, list_hosts, HostsAction, HostsCommand};
pub use scan::ScanCommand;

use crate::config::{AppSettings, Paths};
use crate::error::CliResult;
use clap::{ArgAction, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

/// pscan - check which ports answer on a list of hosts.
///
/// Keeps a persistent list of hostnames and probes TCP or UDP ports on each
/// of them, reporting every port as open or closed.
#[derive(Parser, Debug)]
#[command(name = "pscan")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Fast TCP/UDP port reachability checker for a list of hosts", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to custom configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Host list file
    #[arg(long, global = true, value_name = "PATH", env = "PSCAN_HOSTS_FILE")]
    pub hosts_file: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage the host list
    #[command(alias = "h")]
    Hosts(HostsCommand),

    /// Scan every host in the list
    #[command(alias = "s")]
    Scan(ScanCommand),
}

impl Commands {
    /// Execute the selected subcommand, writing its report to `out`.
    pub async fn execute<W: Write>(&self, out: &mut W, ctx: &Context) -> CliResult<()> {
        match self {
            Self::Hosts(cmd) => cmd.execute(out, ctx),
            Self::Scan(cmd) => cmd.execute(out, ctx).await,
        }
    }
}

/// Settings and file locations shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Context {
    pub settings: AppSettings,
    pub hosts_file: PathBuf,
}

impl Context {
    pub fn new(settings: AppSettings, hosts_file: impl Into<PathBuf>) -> Self {
        Self {
            settings,
            hosts_file: hosts_file.into(),
        }
    }
}

impl Cli {
    /// Load settings and locate the host list.
    ///
    /// Command-line flags take precedence over the settings file, which takes
    /// precedence over the XDG defaults.
    pub fn context(&self) -> CliResult<Context> {
        let settings = match &self.config {
            Some(path) => AppSettings::load_from(path)?,
            None => AppSettings::load(&Paths::new()?)?,
        };

        let hosts_file = match &self.hosts_file {
            Some(path) => path.clone(),
            None => settings.hosts_file()?,
        };

        Ok(Context::new(settings, hosts_file))
    }
}

/// Output format for results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable plain text
    #[default]
    Plain,
    /// JSON structured output
    Json,
    /// CSV format for data analysis
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Plain => write!(f, "plain"),
            Self::Json => write!(f, "json"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
