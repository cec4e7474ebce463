//! A hosts file on disk

use std::path::{Path, PathBuf};

use hosts_dom::{Document, FormatMode};

use crate::checksum::{compute_content_checksum, compute_file_checksum};
use crate::{Error, NormalizedPath, Result, Settings, io};

/// Handle to a hosts file.
///
/// [`load`](Self::load) remembers a checksum of what was read, and
/// [`save`](Self::save) refuses to overwrite the file if it changed in the
/// meantime.
#[derive(Debug, Clone)]
pub struct HostsFile {
    path: NormalizedPath,
    settings: Settings,
    loaded_checksum: Option<String>,
}

impl HostsFile {
    /// A hosts file at `path` with default settings.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: NormalizedPath::new(path),
            settings: Settings::default(),
            loaded_checksum: None,
        }
    }

    /// The hosts file named by `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            path: NormalizedPath::new(settings.hosts_path()),
            settings,
            loaded_checksum: None,
        }
    }

    /// The operating system's hosts file.
    pub fn system() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn path(&self) -> &NormalizedPath {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Absolute, symlink-free location if the file exists.
    pub fn resolved_path(&self) -> PathBuf {
        let native = self.path.to_native();
        dunce::canonicalize(&native).unwrap_or(native)
    }

    /// Where [`backup`](Self::backup) writes by default.
    pub fn backup_path(&self) -> NormalizedPath {
        self.path.with_suffix(&self.settings.backup_suffix)
    }

    /// Checksum recorded by the last load or save.
    pub fn loaded_checksum(&self) -> Option<&str> {
        self.loaded_checksum.as_deref()
    }

    /// Read and parse the file.
    pub fn load(&mut self) -> Result<Document> {
        let content = io::read_bytes(&self.path)?;
        let checksum = compute_content_checksum(&content);
        let document = hosts_dom::read(content.as_slice())?;

        tracing::debug!(path = %self.path, checksum = %checksum, "Loaded hosts file");
        self.loaded_checksum = Some(checksum);
        Ok(document)
    }

    /// Render `document` in `mode` and write it back.
    ///
    /// Fails with [`Error::Modified`] if the file no longer matches what
    /// [`load`](Self::load) read.
    pub fn save(&mut self, document: &Document, mode: FormatMode) -> Result<()> {
        self.check_unmodified()?;

        let mut content = Vec::new();
        document.write(&mut content, mode)?;
        self.write(&content)?;

        tracing::info!(path = %self.path, mode = %mode, "Saved hosts file");
        Ok(())
    }

    /// Copy the hosts file to `target`, or to [`backup_path`](Self::backup_path).
    ///
    /// An existing backup is only replaced when `force` is set.
    pub fn backup(&self, target: Option<&Path>, force: bool) -> Result<NormalizedPath> {
        let target = target.map_or_else(|| self.backup_path(), NormalizedPath::new);
        if target.exists() && !force {
            return Err(Error::BackupExists {
                path: target.to_native(),
            });
        }

        let content = io::read_bytes(&self.path)?;
        io::write_atomic(&target, &content)?;

        tracing::info!(source = %self.path, target = %target, "Backed up hosts file");
        Ok(target)
    }

    /// Overwrite the hosts file with `source`, or with the default backup.
    pub fn restore(&mut self, source: Option<&Path>) -> Result<NormalizedPath> {
        let source = source.map_or_else(|| self.backup_path(), NormalizedPath::new);
        if !source.is_file() {
            return Err(Error::BackupNotFound {
                path: source.to_native(),
            });
        }

        let content = io::read_bytes(&source)?;
        self.write(&content)?;

        tracing::info!(source = %source, target = %self.path, "Restored hosts file");
        Ok(source)
    }

    fn check_unmodified(&self) -> Result<()> {
        let Some(expected) = &self.loaded_checksum else {
            return Ok(());
        };
        let native = self.path.to_native();
        let current = if native.exists() {
            Some(compute_file_checksum(&native)?)
        } else {
            None
        };

        if current.as_ref() != Some(expected) {
            tracing::warn!(
                path = %self.path,
                expected = %expected,
                current = current.as_deref().unwrap_or("<missing>"),
                "Hosts file changed since it was loaded"
            );
            return Err(Error::Modified { path: native });
        }
        Ok(())
    }

    fn write(&mut self, content: &[u8]) -> Result<()> {
        if self.settings.atomic_writes {
            io::write_atomic(&self.path, content)?;
        } else {
            io::write_in_place(&self.path, content)?;
        }
        self.loaded_checksum = Some(compute_content_checksum(content));
        Ok(())
    }
}
