use std::collections::HashMap;
use std::path::PathBuf;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub profile: Option<String>,
    pub profiles: HashMap<String, Profile>,
    #[serde(default)]
    pub archive: ArchiveConfig,
    #[serde(default)]
    pub remote: RemoteConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
pub struct Profile {
    /// Vault to migrate notes from.
    pub vault_root: String,
    /// Directory attachment references are resolved against.
    pub attachments_dir: String,
    /// Root of the categorized output tree.
    pub output_dir: String,
    /// Folders to skip while enumerating notes (relative to vault_root).
    #[serde(default)]
    pub excluded_folders: Vec<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ArchiveConfig {
    /// Password tried on every protected archive.
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RemoteConfig {
    #[serde(default = "default_remote_domain")]
    pub domain: String,
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default)]
    pub token: Option<String>,
    /// Request timeout in seconds; 0 disables the timeout.
    #[serde(default)]
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            domain: default_remote_domain(),
            api_base: default_api_base(),
            token: None,
            timeout_secs: 0,
        }
    }
}

fn default_remote_domain() -> String {
    "disk.yandex.ru".to_string()
}

fn default_api_base() -> String {
    "https://cloud-api.yandex.net/v1/disk".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub active_profile: String,
    pub vault_root: PathBuf,
    pub attachments_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Folders excluded from note enumeration (relative or absolute).
    pub excluded_folders: Vec<PathBuf>,
    pub archive: ArchiveConfig,
    pub remote: RemoteConfig,
    pub logging: LoggingConfig,
}
