//! Configuration management for pscan.
//!
//! Provides XDG-compliant paths and the application settings file.

mod settings;

pub use settings::{AppSettings, Paths};
