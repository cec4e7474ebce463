//! SHA-256 checksums for detecting edits made behind our back
//!
//! Checksums use the `sha256:<hex>` form so they can be logged and compared
//! as plain strings.

use sha2::{Digest, Sha256};
use std::path::Path;

use crate::{Error, Result};

const PREFIX: &str = "sha256:";

/// Checksum of in-memory content.
pub fn compute_content_checksum(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    format!("{}{:x}", PREFIX, hasher.finalize())
}

/// Checksum of a file's current contents.
///
/// # Errors
///
/// Returns [`Error::Io`] if the file cannot be read.
pub fn compute_file_checksum(path: &Path) -> Result<String> {
    let content = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(compute_content_checksum(&content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_value() {
        assert_eq!(
            compute_content_checksum(b"hello world"),
            "sha256:b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn line_endings_change_checksum() {
        assert_ne!(
            compute_content_checksum(b"a\nb\n"),
            compute_content_checksum(b"a\r\nb\r\n")
        );
    }

    #[test]
    fn file_checksum_matches_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hosts");
        std::fs::write(&path, "127.0.0.1 localhost\n").unwrap();
        assert_eq!(
            compute_file_checksum(&path).unwrap(),
            compute_content_checksum(b"127.0.0.1 localhost\n")
        );
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing");
        let err = compute_file_checksum(&path).unwrap_err();
        assert!(matches!(err, Error::Io { path: p, .. } if p == path));
    }
}
