use crate::utils::error::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

// 快取 8 小時
const CACHE_TTL_HOURS: i64 = 8;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    value: String,
    stored_at: DateTime<Utc>,
}

/// Sticky defaults for options the user keeps re-typing (stack name,
/// template filename, codebuild project, ...). Entries expire after eight
/// hours and, like diskcache's `add`, a live entry is never overwritten.
#[derive(Debug)]
pub struct DefaultsCache {
    path: PathBuf,
    entries: HashMap<String, CacheEntry>,
    ttl: Duration,
}

impl DefaultsCache {
    pub fn open_default() -> Self {
        let path = dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".cftcli")
            .join("defaults.json");
        Self::open(path)
    }

    /// Loads the cache file, tolerating a missing or unreadable file so a
    /// corrupt cache never blocks the tool.
    pub fn open(path: PathBuf) -> Self {
        let entries = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();

        Self {
            path,
            entries,
            ttl: Duration::hours(CACHE_TTL_HOURS),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let entry = self.entries.get(key)?;
        if Utc::now() - entry.stored_at > self.ttl {
            tracing::debug!("cache entry '{}' expired", key);
            return None;
        }
        Some(entry.value.clone())
    }

    /// Stores a value unless a live entry already exists. Empty values are
    /// never cached.
    pub fn add(&mut self, key: &str, value: &str) {
        if value.is_empty() || self.get(key).is_some() {
            return;
        }
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value: value.to_string(),
                stored_at: Utc::now(),
            },
        );
    }

    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache_in(dir: &std::path::Path) -> DefaultsCache {
        DefaultsCache::open(dir.join("defaults.json"))
    }

    #[test]
    fn missing_file_yields_empty_cache() {
        let dir = tempfile::tempdir().unwrap();
        let cache = cache_in(dir.path());
        assert_eq!(cache.get("stackname"), None);
    }

    #[test]
    fn add_then_get_roundtrips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(dir.path());
        cache.add("stackname", "web");
        cache.save().unwrap();

        let reloaded = cache_in(dir.path());
        assert_eq!(reloaded.get("stackname").as_deref(), Some("web"));
    }

    #[test]
    fn live_entries_are_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(dir.path());
        cache.add("region", "us-east-1");
        cache.add("region", "eu-west-1");
        assert_eq!(cache.get("region").as_deref(), Some("us-east-1"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(dir.path());
        cache.add("filename", "");
        assert_eq!(cache.get("filename"), None);
    }

    #[test]
    fn expired_entries_are_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = cache_in(dir.path());
        cache.entries.insert(
            "stackname".to_string(),
            CacheEntry {
                value: "old".to_string(),
                stored_at: Utc::now() - Duration::hours(9),
            },
        );
        assert_eq!(cache.get("stackname"), None);
        // and an expired slot may be written again
        cache.add("stackname", "fresh");
        assert_eq!(cache.get("stackname").as_deref(), Some("fresh"));
    }

    #[test]
    fn corrupt_cache_file_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("defaults.json"), "not json").unwrap();
        let cache = cache_in(dir.path());
        assert_eq!(cache.get("stackname"), None);
    }
}
