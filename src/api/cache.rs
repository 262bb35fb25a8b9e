//! Response cache
//!
//! Keeps every successful response in memory for the lifetime of the
//! transport and, when a directory is configured, as one JSON file per
//! request path so later runs skip the network entirely.

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

pub struct ResponseCache {
    memory: RwLock<HashMap<String, Value>>,
    dir: Option<PathBuf>,
}

impl ResponseCache {
    /// Memory-only cache
    pub fn in_memory() -> Self {
        Self {
            memory: RwLock::new(HashMap::new()),
            dir: None,
        }
    }

    /// Memory cache backed by JSON files under `dir`
    pub fn with_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            memory: RwLock::new(HashMap::new()),
            dir: Some(dir.into()),
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    /// Look up a cached response, promoting disk hits into memory
    pub async fn get(&self, key: &str) -> Option<Value> {
        if let Some(value) = self.memory.read().await.get(key) {
            tracing::trace!("cache hit (memory): {}", key);
            return Some(value.clone());
        }

        let path = self.file_path(key)?;
        let content = tokio::fs::read_to_string(&path).await.ok()?;
        match serde_json::from_str::<Value>(&content) {
            Ok(value) => {
                tracing::trace!("cache hit (disk): {}", key);
                self.memory
                    .write()
                    .await
                    .insert(key.to_string(), value.clone());
                Some(value)
            }
            Err(e) => {
                tracing::warn!("ignoring corrupt cache file {:?}: {}", path, e);
                None
            }
        }
    }

    /// Store a response. Disk write failures are logged, never fatal.
    pub async fn put(&self, key: &str, value: &Value) {
        self.memory
            .write()
            .await
            .insert(key.to_string(), value.clone());

        if let Some(path) = self.file_path(key) {
            if let Err(e) = write_file(&path, value).await {
                tracing::warn!("failed to write cache file {:?}: {:#}", path, e);
            }
        }
    }

    /// Drop every cached response, including files on disk
    pub async fn clear(&self) -> Result<()> {
        self.memory.write().await.clear();

        if let Some(dir) = &self.dir {
            if tokio::fs::try_exists(dir).await.unwrap_or(false) {
                tokio::fs::remove_dir_all(dir)
                    .await
                    .with_context(|| format!("Failed to remove cache directory {:?}", dir))?;
            }
        }
        Ok(())
    }

    fn file_path(&self, key: &str) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(file_name(key)))
    }
}

/// Flatten a request path into a file name, e.g. `berry/1` -> `berry_1.json`
fn file_name(key: &str) -> String {
    let stem: String = key
        .trim_matches('/')
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{}.json", stem)
}

async fn write_file(path: &Path, value: &Value) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let content = serde_json::to_string(value)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_file_name_flattens_path() {
        assert_eq!(file_name("berry/1"), "berry_1.json");
        assert_eq!(file_name("/berry-firmness/"), "berry-firmness.json");
        assert_eq!(file_name("berry?limit=10"), "berry_limit_10.json");
    }

    #[tokio::test]
    async fn test_memory_round_trip() {
        let cache = ResponseCache::in_memory();
        assert!(cache.get("berry/1").await.is_none());

        cache.put("berry/1", &json!({"name": "cheri"})).await;
        assert_eq!(cache.get("berry/1").await, Some(json!({"name": "cheri"})));

        cache.clear().await.unwrap();
        assert!(cache.get("berry/1").await.is_none());
    }

    #[tokio::test]
    async fn test_disk_entries_survive_a_new_cache() {
        let dir = tempfile::tempdir().unwrap();

        let first = ResponseCache::with_dir(dir.path());
        first.put("berry/2", &json!({"name": "chesto"})).await;
        assert!(dir.path().join("berry_2.json").exists());

        let second = ResponseCache::with_dir(dir.path());
        assert_eq!(second.get("berry/2").await, Some(json!({"name": "chesto"})));
    }

    #[tokio::test]
    async fn test_corrupt_file_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("berry_3.json"), "{not json").unwrap();

        let cache = ResponseCache::with_dir(dir.path());
        assert!(cache.get("berry/3").await.is_none());
    }
}
