//! [`TestHosts`] temporary hosts file for end-to-end scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A hosts file in its own temporary directory.
///
/// # Example
///
/// ```rust,no_run
/// use hosts_test_utils::{TestHosts, fixtures};
///
/// let hosts = TestHosts::new(fixtures::ANNOTATED);
/// hosts.assert_contains("# [20] lab");
/// ```
pub struct TestHosts {
    temp_dir: TempDir,
    path: PathBuf,
}

impl TestHosts {
    /// Write `content` to `<tempdir>/hosts`.
    pub fn new(content: &str) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hosts");
        fs::write(&path, content).unwrap();
        Self { temp_dir, path }
    }

    /// The directory holding the hosts file.
    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path as a string, for command-line arguments.
    pub fn path_str(&self) -> &str {
        self.path.to_str().expect("temp path is not UTF-8")
    }

    /// Default backup location, `<path>.bak`.
    pub fn backup_path(&self) -> PathBuf {
        self.temp_dir.path().join("hosts.bak")
    }

    pub fn read(&self) -> String {
        fs::read_to_string(&self.path)
            .unwrap_or_else(|_| panic!("Could not read {}", self.path.display()))
    }

    pub fn write(&self, content: &str) {
        fs::write(&self.path, content).unwrap();
    }

    /// Write a settings file next to the hosts file and return its path.
    pub fn write_config(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    /// # Panics
    /// Panics if the hosts file does not contain `content`.
    pub fn assert_contains(&self, content: &str) {
        let actual = self.read();
        assert!(
            actual.contains(content),
            "Hosts file does not contain expected content.\nExpected: {}\nActual:\n{}",
            content,
            actual
        );
    }

    /// # Panics
    /// Panics if the hosts file contains `content`.
    pub fn assert_not_contains(&self, content: &str) {
        let actual = self.read();
        assert!(
            !actual.contains(content),
            "Hosts file unexpectedly contains {}.\nActual:\n{}",
            content,
            actual
        );
    }
}
