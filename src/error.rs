//! Error types for pscan.
//!
//! Uses `thiserror` for ergonomic error definitions. Only configuration and
//! persistence problems are errors; unreachable hosts and closed ports are
//! reported as scan data.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while managing the host list.
#[derive(Error, Debug)]
pub enum HostsError {
    #[error("host already in the list: {0}")]
    AlreadyExists(String),

    #[error("host not in the list: {0}")]
    NotFound(String),

    #[error("invalid host name {0:?}: must be non-empty and contain no whitespace")]
    InvalidHost(String),

    #[error("host list {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for host list operations.
pub type HostsResult<T> = Result<T, HostsError>;

/// Scan configuration errors, raised before any network I/O.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScanError {
    #[error("no scan protocol selected: choose TCP or UDP")]
    NoProtocol,

    #[error("TCP and UDP scans are mutually exclusive: choose one")]
    ConflictingProtocols,
}

/// Result type alias for scan operations.
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors related to application settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not determine a home directory for configuration files")]
    DirectoryNotFound,

    #[error("failed to read {}: {reason}", .path.display())]
    ReadFailed { path: PathBuf, reason: String },

    #[error("failed to write {}: {reason}", .path.display())]
    WriteFailed { path: PathBuf, reason: String },

    #[error("invalid settings format: {0}")]
    InvalidFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level error for command execution.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Hosts(#[from] HostsError),

    #[error(transparent)]
    Scan(#[from] ScanError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("failed to write CSV output: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to write JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for command execution.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hosts_error_messages() {
        let err = HostsError::AlreadyExists("host1".to_string());
        assert_eq!(err.to_string(), "host already in the list: host1");

        let err = HostsError::NotFound("host2".to_string());
        assert_eq!(err.to_string(), "host not in the list: host2");

        let err = HostsError::InvalidHost(" db".to_string());
        assert_eq!(
            err.to_string(),
            "invalid host name \" db\": must be non-empty and contain no whitespace"
        );
    }

    #[test]
    fn test_cli_error_is_transparent() {
        let err: CliError = ScanError::NoProtocol.into();
        assert_eq!(err.to_string(), ScanError::NoProtocol.to_string());
    }
}
