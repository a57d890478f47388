use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SpendError};

pub const DATA_DIR_ENV: &str = "SPENDLOG_DATA_DIR";

/// Where spendlog keeps its database. Lives in `~/.config/spendlog/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_data_dir_string")]
    pub data_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir_string(),
        }
    }
}

fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("spendlog")
}

fn config_path() -> PathBuf {
    config_dir().join("config.json")
}

fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("Documents")
        .join("spendlog")
}

fn default_data_dir_string() -> String {
    default_data_dir().to_string_lossy().to_string()
}

pub fn load_config_from(path: &Path) -> Config {
    if !path.exists() {
        return Config::default();
    }
    let content = std::fs::read_to_string(path).unwrap_or_default();
    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring unreadable config {}: {e}", path.display());
            Config::default()
        }
    }
}

pub fn load_config() -> Config {
    load_config_from(&config_path())
}

pub fn save_config_to(path: &Path, config: &Config) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let json = serde_json::to_string_pretty(config)
        .map_err(|e| SpendError::Config(e.to_string()))?;
    std::fs::write(path, format!("{json}\n"))?;
    Ok(())
}

pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(&config_path(), config)
}

pub fn expand_home(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Resolve the data directory: explicit flag, then `SPENDLOG_DATA_DIR`, then
/// the config file.
pub fn resolve_data_dir(flag: Option<&str>) -> PathBuf {
    if let Some(dir) = flag {
        return PathBuf::from(expand_home(dir));
    }
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        if !dir.is_empty() {
            return PathBuf::from(expand_home(&dir));
        }
    }
    PathBuf::from(expand_home(&load_config().data_dir))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let config = Config {
            data_dir: "/tmp/spend".to_string(),
        };
        save_config_to(&path, &config).unwrap();
        let loaded = load_config_from(&path);
        assert_eq!(loaded.data_dir, "/tmp/spend");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = load_config_from(&dir.path().join("absent.json"));
        assert!(loaded.data_dir.ends_with("spendlog"));
    }

    #[test]
    fn test_unreadable_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(!load_config_from(&path).data_dir.is_empty());
    }

    #[test]
    fn test_empty_object_merges_with_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert!(config.data_dir.ends_with("spendlog"));
    }

    #[test]
    fn test_flag_wins() {
        assert_eq!(resolve_data_dir(Some("/srv/spend")), PathBuf::from("/srv/spend"));
    }
}
