//! Hosts file context shared by all commands
//!
//! Resolves which hosts file to use and how to write it: defaults, then the
//! settings file, then `--hosts-file` (or `HOSTSCTL_HOSTS_FILE`).

use std::path::Path;

use hosts_dom::{Document, FormatMode};
use hosts_fs::{HostsFile, Settings};

use crate::error::Result;

/// The hosts file a command operates on.
#[derive(Debug)]
pub struct Context {
    file: HostsFile,
}

impl Context {
    pub fn new(config: Option<&Path>, hosts_file: Option<&Path>) -> Result<Self> {
        let mut settings = Settings::load(config)?;
        if let Some(path) = hosts_file {
            settings.hosts_file = Some(path.to_path_buf());
        }
        tracing::debug!(
            hosts_file = %settings.hosts_path().display(),
            format = %settings.format,
            atomic_writes = settings.atomic_writes,
            "Resolved settings"
        );
        Ok(Self {
            file: HostsFile::with_settings(settings),
        })
    }

    pub fn file(&self) -> &HostsFile {
        &self.file
    }

    pub fn file_mut(&mut self) -> &mut HostsFile {
        &mut self.file
    }

    /// Layout used for saving edits.
    pub fn format(&self) -> FormatMode {
        self.file.settings().format
    }

    pub fn load(&mut self) -> Result<Document> {
        Ok(self.file.load()?)
    }

    /// Save an edited document in the configured layout.
    pub fn save(&mut self, document: &Document) -> Result<()> {
        let mode = self.format();
        self.save_as(document, mode)
    }

    pub fn save_as(&mut self, document: &Document, mode: FormatMode) -> Result<()> {
        Ok(self.file.save(document, mode)?)
    }
}
