//! Hosts file access for hostsctl
//!
//! Locked reads and writes, change detection between load and save,
//! backups, and the user's [`Settings`].

pub mod checksum;
pub mod config;
pub mod error;
pub mod hosts_file;
pub mod io;
pub mod path;

pub use config::{ConfigStore, Settings, default_hosts_path};
pub use error::{Error, Result};
pub use hosts_file::HostsFile;
pub use path::NormalizedPath;
