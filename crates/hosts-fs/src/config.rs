//! Settings and format-agnostic configuration loading

use std::path::{Path, PathBuf};

use hosts_dom::FormatMode;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::{Error, NormalizedPath, Result, io};

/// Directory under the user's config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "hostsctl";
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Format-agnostic configuration store.
///
/// The format is picked from the file extension:
/// - `.toml` -> TOML
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigStore;

impl ConfigStore {
    pub fn new() -> Self {
        Self
    }

    pub fn load<T: DeserializeOwned>(&self, path: &NormalizedPath) -> Result<T> {
        let content = io::read_text(path)?;
        let extension = path.extension().unwrap_or("");
        let parse_error = |format: &str, message: String| Error::ConfigParse {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        match extension.to_lowercase().as_str() {
            "toml" => toml::from_str(&content).map_err(|e| parse_error("TOML", e.to_string())),
            "json" => {
                serde_json::from_str(&content).map_err(|e| parse_error("JSON", e.to_string()))
            }
            "yaml" | "yml" => {
                serde_yaml::from_str(&content).map_err(|e| parse_error("YAML", e.to_string()))
            }
            _ => Err(Error::UnsupportedFormat {
                extension: extension.to_string(),
            }),
        }
    }

    /// Save `value`, replacing the file atomically.
    pub fn save<T: Serialize>(&self, path: &NormalizedPath, value: &T) -> Result<()> {
        let extension = path.extension().unwrap_or("");
        let serialize_error = |format: &str, message: String| Error::ConfigSerialize {
            path: path.to_native(),
            format: format.into(),
            message,
        };

        let content = match extension.to_lowercase().as_str() {
            "toml" => toml::to_string_pretty(value)
                .map_err(|e| serialize_error("TOML", e.to_string()))?,
            "json" => serde_json::to_string_pretty(value)
                .map_err(|e| serialize_error("JSON", e.to_string()))?,
            "yaml" | "yml" => {
                serde_yaml::to_string(value).map_err(|e| serialize_error("YAML", e.to_string()))?
            }
            _ => {
                return Err(Error::UnsupportedFormat {
                    extension: extension.to_string(),
                });
            }
        };

        io::write_atomic(path, content.as_bytes())
    }
}

/// User settings for hostsctl.
///
/// Every field is optional in the file; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hosts file to operate on. `None` means the platform's system file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosts_file: Option<PathBuf>,
    /// Appended to the hosts path to name the default backup.
    pub backup_suffix: String,
    /// Layout used when saving after an edit.
    pub format: FormatMode,
    /// Replace the file via temp file and rename instead of rewriting it.
    pub atomic_writes: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hosts_file: None,
            backup_suffix: ".bak".into(),
            format: FormatMode::Keep,
            atomic_writes: true,
        }
    }
}

impl Settings {
    /// Load settings from `explicit`, or from the default config file.
    ///
    /// An explicit path must exist. The default file is optional; without
    /// it the defaults are returned.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let store = ConfigStore::new();
        if let Some(path) = explicit {
            return store.load(&NormalizedPath::new(path));
        }

        match Self::default_config_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path, "Loading settings");
                store.load(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/hostsctl/config.toml`, if the platform has a config dir.
    pub fn default_config_path() -> Option<NormalizedPath> {
        dirs::config_dir()
            .map(|dir| NormalizedPath::new(dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME)))
    }

    /// The hosts file these settings point at.
    pub fn hosts_path(&self) -> PathBuf {
        self.hosts_file.clone().unwrap_or_else(default_hosts_path)
    }
}

/// The operating system's hosts file.
#[cfg(windows)]
pub fn default_hosts_path() -> PathBuf {
    let root = std::env::var_os("SystemRoot").unwrap_or_else(|| r"C:\Windows".into());
    PathBuf::from(root)
        .join("System32")
        .join("drivers")
        .join("etc")
        .join("hosts")
}

/// The operating system's hosts file.
#[cfg(not(windows))]
pub fn default_hosts_path() -> PathBuf {
    PathBuf::from("/etc/hosts")
}
