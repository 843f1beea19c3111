//! # pscan - Host List Port Reachability Checker
//!
//! pscan keeps a persisted list of target hostnames and, on demand, probes a
//! set of TCP or UDP ports on each of them, reporting every port as open or
//! closed, or the host as not found.
//!
//! ## Features
//!
//! - **Host list**: sorted, duplicate-free, stored as a plain text file
//! - **Port specifications**: single ports (`"80"`) and inclusive ranges (`"20-25"`)
//! - **TCP connect probes** with a 1 second default timeout
//! - **UDP datagram probes** with a 200 millisecond default reply window
//! - **Multiple Output Formats**: Plain text, JSON, and CSV
//!
//! Scans are strictly sequential: hosts in list order, ports in
//! specification order.
//!
//! ## Example Usage
//!
//! ```rust,ignore
//! use pscan::scanner::{run_scan, Protocol, ScanConfig};
//! use pscan::storage::HostSet;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut hosts = HostSet::new();
//!     hosts.add("localhost").unwrap();
//!
//!     let config = ScanConfig::new(Protocol::Tcp, ["22", "8000-8010"]);
//!     for result in run_scan(&hosts, &config).await.unwrap() {
//!         for state in &result.port_states {
//!             println!("{}: {}", result.host, state);
//!         }
//!     }
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`types`] - Validated ports, port specifications and resolved targets
//! - [`storage`] - The persisted host list
//! - [`scanner`] - Resolution, the `Prober` trait and the scan engine
//! - [`config`] - XDG paths and application settings
//! - [`output`] - Report formatting
//! - [`cli`] - Command-line interface
//! - [`error`] - Error types

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod scanner;
pub mod storage;
pub mod types;

// Re-export commonly used types
pub use error::{CliError, HostsError, ScanError};
pub use scanner::{run_scan, HostResults, PortState, Protocol, ScanConfig, ScanEngine};
pub use storage::HostSet;
pub use types::{Port, PortSpec};
