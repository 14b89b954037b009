use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_VERSION: u64 = 1;

pub const STORE_FILE_NAME: &str = "store.json";

pub const DEFAULT_ASSISTANT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_ASSISTANT_MODEL: &str = "gpt-3.5-turbo";

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("~/.local/share"))
        .join("second-brain")
}

fn default_version() -> u64 {
    CONFIG_VERSION
}

fn default_endpoint() -> String {
    DEFAULT_ASSISTANT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_ASSISTANT_MODEL.to_string()
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct BrainConfig {
    #[serde(default = "default_version")]
    pub version: u64,
    pub data_directory: PathBuf,
    pub debug_logging: bool,
    #[serde(default = "default_endpoint")]
    pub assistant_endpoint: String,
    #[serde(default = "default_model")]
    pub assistant_model: String,
    /// Never contact the remote assistant, even with an API key set.
    pub offline_only: bool,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            data_directory: default_data_dir(),
            debug_logging: false,
            assistant_endpoint: default_endpoint(),
            assistant_model: default_model(),
            offline_only: false,
        }
    }
}

impl BrainConfig {
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("second-brain")
            .join("config.json")
    }

    /// Read the config file. A missing or unreadable file yields defaults.
    pub fn load(path: &Path) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Self::default(),
            Err(e) => {
                log::warn!("Failed to read config {}: {}", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str::<Self>(&content) {
            Ok(config) => {
                if config.version > CONFIG_VERSION {
                    log::warn!(
                        "Config version {} is newer than supported version {}",
                        config.version,
                        CONFIG_VERSION
                    );
                }
                config
            }
            Err(e) => {
                log::warn!("Invalid config {}, using defaults: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// The single persisted document holding every collection.
    pub fn store_path(&self) -> PathBuf {
        self.data_directory.join(STORE_FILE_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = BrainConfig::load(&dir.path().join("config.json"));
        assert_eq!(config, BrainConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"data_directory": "/tmp/brain", "offline_only": true}"#)
            .unwrap();
        let config = BrainConfig::load(&path);
        assert_eq!(config.store_path(), PathBuf::from("/tmp/brain/store.json"));
        assert!(config.offline_only);
        assert_eq!(config.assistant_model, DEFAULT_ASSISTANT_MODEL);
        assert_eq!(config.version, CONFIG_VERSION);
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "offline_only = true").unwrap();
        assert_eq!(BrainConfig::load(&path), BrainConfig::default());
    }
}
