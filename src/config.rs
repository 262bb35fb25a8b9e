//! Configuration Management
//!
//! Handles persistent configuration storage for pokebase.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::api::http::DEFAULT_LIST_LIMIT;
use crate::api::{ClientBuilder, BASE_URL};

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API root to fetch from
    #[serde(default)]
    pub base_url: Option<String>,
    /// Directory for the on-disk response cache
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    /// Persist responses between runs
    #[serde(default = "default_disk_cache")]
    pub disk_cache: bool,
    /// Entries requested per category listing
    #[serde(default)]
    pub list_limit: Option<usize>,
}

fn default_disk_cache() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: None,
            cache_dir: None,
            disk_cache: default_disk_cache(),
            list_limit: None,
        }
    }
}

impl Config {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("pokebase").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from a specific file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring invalid config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        let Some(path) = Self::config_path() else {
            return Ok(());
        };
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective base URL (CLI > config > default)
    pub fn effective_base_url(&self, cli: Option<&str>) -> String {
        cli.map(str::to_string)
            .or_else(|| self.base_url.clone())
            .unwrap_or_else(|| BASE_URL.to_string())
    }

    /// Get effective cache directory, `None` when disk caching is off
    pub fn effective_cache_dir(&self, no_cache: bool) -> Option<PathBuf> {
        if no_cache || !self.disk_cache {
            return None;
        }
        self.cache_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|p| p.join("pokebase")))
    }

    pub fn effective_list_limit(&self) -> usize {
        self.list_limit.unwrap_or(DEFAULT_LIST_LIMIT)
    }

    /// Client builder configured from these settings
    pub fn client_builder(&self, base_url: Option<&str>, no_cache: bool) -> ClientBuilder {
        ClientBuilder::default()
            .base_url(&self.effective_base_url(base_url))
            .cache_dir(self.effective_cache_dir(no_cache))
            .list_limit(self.effective_list_limit())
    }

    /// Set base URL and save
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        self.base_url = Some(base_url.to_string());
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.json"));
        assert!(config.disk_cache);
        assert_eq!(config.effective_base_url(None), BASE_URL);
        assert_eq!(config.effective_list_limit(), DEFAULT_LIST_LIMIT);
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(Config::load_from(&path).base_url.is_none());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let config = Config {
            base_url: Some("http://localhost:8000/api/v2".to_string()),
            disk_cache: false,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path);
        assert_eq!(loaded.base_url.as_deref(), Some("http://localhost:8000/api/v2"));
        assert!(!loaded.disk_cache);
    }

    #[test]
    fn test_partial_file_keeps_disk_cache_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"list_limit": 50}"#).unwrap();

        let config = Config::load_from(&path);
        assert!(config.disk_cache);
        assert_eq!(config.effective_list_limit(), 50);
    }

    #[test]
    fn test_precedence() {
        let config = Config {
            base_url: Some("http://config".to_string()),
            cache_dir: Some(PathBuf::from("/tmp/pokebase-test")),
            ..Config::default()
        };
        assert_eq!(config.effective_base_url(Some("http://cli")), "http://cli");
        assert_eq!(config.effective_base_url(None), "http://config");
        assert_eq!(
            config.effective_cache_dir(false),
            Some(PathBuf::from("/tmp/pokebase-test"))
        );
        assert_eq!(config.effective_cache_dir(true), None);
    }
}
