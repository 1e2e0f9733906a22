use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tempfile::NamedTempFile;

/// How long a cached entry may satisfy reads before the source is consulted
/// again.
pub const DEFAULT_TTL: Duration = Duration::from_secs(6 * 60 * 60);

/// Keyed string storage backing the cache. Injected so tests can substitute
/// an in-memory store for the on-disk one.
pub trait CacheStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Envelope persisted for every cached resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    data: serde_json::Value,
    /// Epoch milliseconds of the write.
    timestamp: u64,
}

impl CacheEntry {
    fn is_fresh(&self, now_ms: u64, ttl: Duration) -> bool {
        now_ms.saturating_sub(self.timestamp) < ttl.as_millis() as u64
    }
}

pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Read-through cache around a remote fetch.
///
/// Returns the stored value when the entry under `key` is younger than
/// `ttl`; otherwise runs `fetch`, overwrites the entry on success and
/// returns the fresh value. A fetch error propagates and leaves the cache
/// untouched. Absent, expired and malformed entries are all treated as a
/// miss.
pub fn get_or_fetch<T, F>(store: &dyn CacheStore, key: &str, ttl: Duration, fetch: F) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Result<T>,
{
    get_or_fetch_at(store, key, ttl, now_ms(), fetch)
}

fn get_or_fetch_at<T, F>(
    store: &dyn CacheStore,
    key: &str,
    ttl: Duration,
    now_ms: u64,
    fetch: F,
) -> Result<T>
where
    T: Serialize + DeserializeOwned,
    F: FnOnce() -> Result<T>,
{
    if let Some(raw) = store.get(key) {
        match serde_json::from_str::<CacheEntry>(&raw) {
            Ok(entry) if entry.is_fresh(now_ms, ttl) => {
                match serde_json::from_value::<T>(entry.data) {
                    Ok(data) => return Ok(data),
                    Err(err) => {
                        tracing::debug!(key, %err, "cached data has unexpected shape; refetching")
                    }
                }
            }
            Ok(_) => tracing::debug!(key, "cache entry expired"),
            Err(err) => tracing::debug!(key, %err, "malformed cache entry; refetching"),
        }
    }

    let data = fetch()?;
    let entry = CacheEntry {
        data: serde_json::to_value(&data)?,
        timestamp: now_ms,
    };
    match serde_json::to_string(&entry) {
        Ok(json) => {
            if let Err(err) = store.set(key, &json) {
                tracing::warn!(key, %err, "failed to persist cache entry");
            }
        }
        Err(err) => tracing::warn!(key, %err, "failed to serialize cache entry"),
    }
    Ok(data)
}

/// One JSON file per key inside a cache directory.
pub struct DiskCacheStore {
    dir: PathBuf,
}

impl DiskCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn atomic_write(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.flush()?;
    tmp.persist(path)?;
    Ok(())
}

impl CacheStore for DiskCacheStore {
    fn get(&self, key: &str) -> Option<String> {
        fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        atomic_write(&self.path_for(key), value.as_bytes()).context("atomic write")
    }
}

/// In-memory store used by tests.
#[derive(Default)]
pub struct MemoryCacheStore {
    map: Mutex<HashMap<String, String>>,
}

impl CacheStore for MemoryCacheStore {
    fn get(&self, key: &str) -> Option<String> {
        self.map.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if let Ok(mut map) = self.map.lock() {
            map.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::cell::Cell;

    fn raw_entry(store: &MemoryCacheStore, key: &str) -> CacheEntry {
        serde_json::from_str(&store.get(key).expect("entry present")).unwrap()
    }

    #[test]
    fn fresh_entry_skips_fetch() {
        let store = MemoryCacheStore::default();
        let calls = Cell::new(0u32);
        let fetch = || {
            calls.set(calls.get() + 1);
            Ok(String::from("live"))
        };

        let first: String = get_or_fetch_at(&store, "k", DEFAULT_TTL, 1_000, fetch).unwrap();
        assert_eq!(first, "live");
        assert_eq!(calls.get(), 1);

        // One hour later: still inside the freshness window, no second fetch.
        let second: String = get_or_fetch_at(&store, "k", DEFAULT_TTL, 1_000 + 3_600_000, || {
            calls.set(calls.get() + 1);
            Ok(String::from("newer"))
        })
        .unwrap();
        assert_eq!(second, "live");
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn expired_entry_is_refetched_and_overwritten() {
        let store = MemoryCacheStore::default();
        let _: String =
            get_or_fetch_at(&store, "k", DEFAULT_TTL, 0, || Ok(String::from("old"))).unwrap();
        let first_ts = raw_entry(&store, "k").timestamp;

        let later = DEFAULT_TTL.as_millis() as u64;
        let value: String =
            get_or_fetch_at(&store, "k", DEFAULT_TTL, later, || Ok(String::from("new"))).unwrap();
        assert_eq!(value, "new");
        let entry = raw_entry(&store, "k");
        assert_eq!(entry.data, serde_json::json!("new"));
        assert!(entry.timestamp > first_ts);
    }

    #[test]
    fn zero_ttl_always_fetches() {
        let store = MemoryCacheStore::default();
        let calls = Cell::new(0u32);
        for _ in 0..3 {
            let _: u32 = get_or_fetch_at(&store, "k", Duration::ZERO, 5, || {
                calls.set(calls.get() + 1);
                Ok(7)
            })
            .unwrap();
        }
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn malformed_entry_is_a_miss() {
        let store = MemoryCacheStore::default();
        store.set("k", "{not json").unwrap();
        let value: u32 = get_or_fetch_at(&store, "k", DEFAULT_TTL, 10, || Ok(42)).unwrap();
        assert_eq!(value, 42);
        // The bad entry was replaced by a well-formed one.
        assert_eq!(raw_entry(&store, "k").data, serde_json::json!(42));
    }

    #[test]
    fn shape_mismatch_is_a_miss() {
        let store = MemoryCacheStore::default();
        let _: String =
            get_or_fetch_at(&store, "k", DEFAULT_TTL, 0, || Ok(String::from("text"))).unwrap();
        let value: Vec<u32> = get_or_fetch_at(&store, "k", DEFAULT_TTL, 1, || Ok(vec![1])).unwrap();
        assert_eq!(value, vec![1]);
    }

    #[test]
    fn fetch_error_leaves_cache_untouched() {
        let store = MemoryCacheStore::default();
        let result: Result<u32> = get_or_fetch_at(&store, "k", DEFAULT_TTL, 0, || bail!("offline"));
        assert!(result.is_err());
        assert!(store.get("k").is_none());

        // And an existing expired entry survives a failed refresh.
        let _: u32 = get_or_fetch_at(&store, "k", DEFAULT_TTL, 0, || Ok(1)).unwrap();
        let later = DEFAULT_TTL.as_millis() as u64 + 1;
        let result: Result<u32> =
            get_or_fetch_at(&store, "k", DEFAULT_TTL, later, || bail!("offline"));
        assert!(result.is_err());
        assert_eq!(raw_entry(&store, "k").data, serde_json::json!(1));
    }
}
