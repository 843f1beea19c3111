//! Hosts subcommand implementation.
//!
//! Handles `pscan hosts add|list|delete` for managing the persisted host
//! list.

use crate::cli::Context;
use crate::error::{CliResult, HostsError};
use crate::storage::HostSet;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Manage the host list.
#[derive(Parser, Debug)]
pub struct HostsCommand {
    #[command(subcommand)]
    pub action: HostsAction,
}

/// Host list operations.
#[derive(Subcommand, Debug)]
pub enum HostsAction {
    /// Add hosts to the list
    #[command(alias = "a")]
    Add {
        /// Hostnames or IP addresses to add
        #[arg(value_name = "HOST", required = true)]
        hosts: Vec<String>,
    },

    /// List the hosts in the list
    #[command(alias = "l", alias = "ls")]
    List,

    /// Delete hosts from the list
    #[command(alias = "d", alias = "rm", alias = "remove")]
    Delete {
        /// Hostnames to delete
        #[arg(value_name = "HOST", required = true)]
        hosts: Vec<String>,
    },
}

impl HostsCommand {
    /// Execute the hosts command.
    pub fn execute<W: Write>(&self, out: &mut W, ctx: &Context) -> CliResult<()> {
        match &self.action {
            HostsAction::Add { hosts } => add_hosts(out, &ctx.hosts_file, hosts),
            HostsAction::List => list_hosts(out, &ctx.hosts_file),
            HostsAction::Delete { hosts } => delete_hosts(out, &ctx.hosts_file, hosts),
        }
    }
}

/// Add each host to the list at `path` and save it.
///
/// Stops at the first host already present; hosts added before it are kept.
pub fn add_hosts<W: Write>(out: &mut W, path: &Path, hosts: &[String]) -> CliResult<()> {
    update_hosts(out, path, hosts, "Added host", |set, host| set.add(host))
}

/// Delete each host from the list at `path` and save it.
///
/// Stops at the first host not in the list; hosts deleted before it stay
/// deleted.
pub fn delete_hosts<W: Write>(out: &mut W, path: &Path, hosts: &[String]) -> CliResult<()> {
    update_hosts(out, path, hosts, "Deleted host", |set, host| set.remove(host))
}

/// Print every host in the list at `path`, one per line.
pub fn list_hosts<W: Write>(out: &mut W, path: &Path) -> CliResult<()> {
    let set = HostSet::from_file(path)?;
    for host in set.iter() {
        writeln!(out, "{}", host)?;
    }
    Ok(())
}

fn update_hosts<W, F>(
    out: &mut W,
    path: &Path,
    hosts: &[String],
    verb: &str,
    mut apply: F,
) -> CliResult<()>
where
    W: Write,
    F: FnMut(&mut HostSet, &str) -> Result<(), HostsError>,
{
    let mut set = HostSet::from_file(path)?;

    let mut outcome = Ok(());
    for host in hosts {
        if let Err(e) = apply(&mut set, host) {
            outcome = Err(e);
            break;
        }
        writeln!(out, "{}: {}", verb, host)?;
    }

    set.save(path)?;
    info!(path = %path.display(), hosts = set.len(), "host list updated");

    outcome.map_err(Into::into)
}
