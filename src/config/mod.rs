//! Configuration management for portaudit.
//!
//! Provides XDG-compliant settings storage that supplies defaults for the
//! command line.

mod settings;

pub use settings::{AppSettings, Paths};
