//! Flat-file host list storage.
//!
//! The host list is a newline-delimited text file with one hostname per
//! line. In memory the hosts are kept sorted, so membership checks are a
//! plain binary search and never reorder anything.

use crate::error::{HostsError, HostsResult};
use std::fs;
use std::io::{self, ErrorKind};
use std::path::Path;
use tracing::{debug, warn};

/// An ordered set of unique target hostnames.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostSet {
    hosts: Vec<String>,
}

impl HostSet {
    /// Create an empty host set.
    pub const fn new() -> Self {
        Self { hosts: Vec::new() }
    }

    /// Create a host set from the contents of a host list file.
    ///
    /// A missing file yields an empty set.
    pub fn from_file(path: impl AsRef<Path>) -> HostsResult<Self> {
        let mut set = Self::new();
        set.load(path)?;
        Ok(set)
    }

    /// Add a host, keeping the set sorted.
    ///
    /// Names that could not be read back from the host list file unchanged
    /// (empty, or containing whitespace or line breaks) are rejected.
    pub fn add(&mut self, host: impl Into<String>) -> HostsResult<()> {
        let host = host.into();
        if !is_storable(&host) {
            return Err(HostsError::InvalidHost(host));
        }
        match self.search(&host) {
            Ok(_) => Err(HostsError::AlreadyExists(host)),
            Err(index) => {
                self.hosts.insert(index, host);
                Ok(())
            }
        }
    }

    /// Remove a host. The remaining hosts keep their order.
    pub fn remove(&mut self, host: &str) -> HostsResult<()> {
        match self.search(host) {
            Ok(index) => {
                self.hosts.remove(index);
                Ok(())
            }
            Err(_) => Err(HostsError::NotFound(host.to_string())),
        }
    }

    /// Check whether a host is in the set (exact, case-sensitive match).
    pub fn contains(&self, host: &str) -> bool {
        self.search(host).is_ok()
    }

    fn search(&self, host: &str) -> Result<usize, usize> {
        self.hosts.binary_search_by(|probe| probe.as_str().cmp(host))
    }

    /// Append the hosts listed in `path` to this set.
    ///
    /// Blank lines are ignored and surrounding whitespace is trimmed. Entries
    /// are not deduplicated. A missing file is treated as an empty list.
    pub fn load(&mut self, path: impl AsRef<Path>) -> HostsResult<()> {
        let path = path.as_ref();

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "host list does not exist yet");
                return Ok(());
            }
            Err(source) => {
                return Err(HostsError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let before = self.hosts.len();
        self.hosts.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
        self.hosts.sort();

        if self.hosts.windows(2).any(|pair| pair[0] == pair[1]) {
            warn!(path = %path.display(), "host list contains duplicate entries");
        }
        debug!(
            path = %path.display(),
            loaded = self.hosts.len() - before,
            "loaded host list"
        );

        Ok(())
    }

    /// Write every host to `path`, one per line, replacing the file.
    pub fn save(&self, path: impl AsRef<Path>) -> HostsResult<()> {
        let path = path.as_ref();
        let io_error = |source: io::Error| HostsError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error)?;
        }

        let content: String = self.hosts.iter().map(|h| format!("{}\n", h)).collect();
        fs::write(path, content).map_err(io_error)?;

        debug!(path = %path.display(), hosts = self.hosts.len(), "saved host list");
        Ok(())
    }

    /// Hosts in their current (sorted) order.
    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.hosts.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}

/// A host name survives `save` followed by `load` only if it is one
/// non-empty token.
fn is_storable(host: &str) -> bool {
    !host.is_empty() && !host.chars().any(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn set_of(hosts: &[&str]) -> HostSet {
        let mut set = HostSet::new();
        for host in hosts {
            set.add(*host).unwrap();
        }
        set
    }

    #[test]
    fn test_add_keeps_sorted_order() {
        let set = set_of(&["host3", "host1", "host2"]);
        assert_eq!(set.hosts(), ["host1", "host2", "host3"]);
        assert!(set.contains("host2"));
        assert!(!set.contains("HOST2"));
    }

    #[test]
    fn test_add_existing_host_fails() {
        let mut set = set_of(&["host1", "host2"]);
        let before = set.clone();

        let err = set.add("host1").unwrap_err();
        assert!(matches!(err, HostsError::AlreadyExists(ref h) if h == "host1"));
        assert_eq!(set, before);
    }

    #[test]
    fn test_remove() {
        let mut set = set_of(&["host1", "host2", "host3"]);

        set.remove("host2").unwrap();
        assert_eq!(set.hosts(), ["host1", "host3"]);
        assert!(!set.contains("host2"));

        let err = set.remove("host2").unwrap_err();
        assert!(matches!(err, HostsError::NotFound(ref h) if h == "host2"));
        assert_eq!(set.hosts(), ["host1", "host3"]);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hosts");

        let set = set_of(&["zeta.example", "alpha.example", "localhost"]);
        set.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "alpha.example\nlocalhost\nzeta.example\n");

        let loaded = HostSet::from_file(&path).unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let set = HostSet::from_file(dir.path().join("absent")).unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_load_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = HostSet::from_file(dir.path()).unwrap_err();
        assert!(matches!(err, HostsError::Io { .. }));
    }

    #[test]
    fn test_load_appends_and_sorts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hosts");
        fs::write(&path, "web2\n\n  db1  \nweb1\r\n").unwrap();

        let mut set = set_of(&["cache"]);
        set.load(&path).unwrap();

        assert_eq!(set.hosts(), ["cache", "db1", "web1", "web2"]);
        assert!(set.contains("db1"));
    }

    #[test]
    fn test_load_keeps_duplicates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hosts");
        fs::write(&path, "host1\nhost1\n").unwrap();

        let mut set = HostSet::from_file(&path).unwrap();
        assert_eq!(set.len(), 2);

        set.remove("host1").unwrap();
        assert_eq!(set.hosts(), ["host1"]);
    }

    #[test]
    fn test_add_rejects_names_that_do_not_round_trip() {
        let mut set = set_of(&["host1"]);
        let before = set.clone();

        for bad in ["", " host1", "host1 ", "db\nweb", "a b", "\t", "host\r"] {
            let err = set.add(bad).unwrap_err();
            assert!(
                matches!(err, HostsError::InvalidHost(ref h) if h == bad),
                "{bad:?} should be rejected"
            );
        }
        assert_eq!(set, before);
    }

    #[test]
    fn test_added_hosts_survive_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("hosts");

        let mut set = HostSet::new();
        for host in [" host1", "host1", "", "host2", "10.0.0.1", "::1"] {
            let _ = set.add(host);
        }
        assert_eq!(set.hosts(), ["10.0.0.1", "::1", "host1", "host2"]);

        set.save(&path).unwrap();
        let loaded = HostSet::from_file(&path).unwrap();
        assert_eq!(loaded, set);
        assert_eq!(loaded.len(), 4);
    }

    #[test]
    fn test_save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("hosts");

        set_of(&["host1"]).save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "host1\n");
    }
}
