//! Host list persistence.
//!
//! Provides the sorted, unique `HostSet` and its flat-file storage.

mod host_list;

pub use host_list::HostSet;
