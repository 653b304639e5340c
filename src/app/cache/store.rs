//! Document store implementations
//!
//! The [`DocumentStore`] trait is the seam between the fetcher and its cache.
//! [`DiskStore`] is the durable production store, [`MemoryStore`] backs tests,
//! and [`NoopStore`] transparently disables caching.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tracing::{debug, warn};

use crate::constants::cache;
use crate::errors::{CacheError, CacheResult};

use super::config::CacheConfig;

/// Persistent URL-to-document mapping consumed by the fetcher
///
/// One entry per URL; a later `put` for the same URL overwrites the earlier
/// entry. Entries never expire.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Look up the cached document for a URL, if any
    async fn get(&self, url: &str) -> Option<Value>;

    /// Store a document keyed by its source URL
    async fn put(&self, url: &str, document: &Value) -> CacheResult<()>;
}

/// Durable store writing one JSON file per URL under a cache root
#[derive(Debug)]
pub struct DiskStore {
    cache_root: PathBuf,
}

impl DiskStore {
    /// Create a disk store, creating the cache root if necessary
    pub async fn new(config: CacheConfig) -> CacheResult<Self> {
        let cache_root = config.resolve_root();
        Self::ensure_directory_exists(&cache_root).await?;
        debug!("Initialized disk cache at {}", cache_root.display());
        Ok(Self { cache_root })
    }

    async fn ensure_directory_exists(path: &Path) -> CacheResult<()> {
        if !path.exists() {
            fs::create_dir_all(path)
                .await
                .map_err(|_| CacheError::DirectoryNotAccessible {
                    path: path.to_path_buf(),
                })?;
            debug!("Created cache directory: {}", path.display());
        }
        Ok(())
    }

    /// File path for a URL's cache entry
    ///
    /// URLs are hashed rather than sanitized so that entries are filesystem
    /// safe regardless of URL length or characters.
    fn entry_path(&self, url: &str) -> PathBuf {
        let digest = md5::compute(url.as_bytes());
        self.cache_root
            .join(format!("{:x}.{}", digest, cache::CACHE_FILE_EXTENSION))
    }
}

#[async_trait]
impl DocumentStore for DiskStore {
    async fn get(&self, url: &str) -> Option<Value> {
        let path = self.entry_path(url);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(_) => return None,
        };
        match serde_json::from_slice(&bytes) {
            Ok(document) => {
                debug!("Cache hit for {}", url);
                Some(document)
            }
            Err(e) => {
                warn!("Discarding corrupt cache entry {}: {}", path.display(), e);
                None
            }
        }
    }

    async fn put(&self, url: &str, document: &Value) -> CacheResult<()> {
        let path = self.entry_path(url);
        let bytes = serde_json::to_vec_pretty(document)?;

        // Write to a temp file and rename so a crash mid-write never leaves
        // a truncated entry behind.
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, &bytes).await?;
        fs::rename(&temp_path, &path).await?;

        debug!("Cached document for {} at {}", url, path.display());
        Ok(())
    }
}

/// In-memory store used by tests and short-lived runs
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, url: &str) -> Option<Value> {
        self.entries.lock().unwrap().get(url).cloned()
    }

    async fn put(&self, url: &str, document: &Value) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(url.to_string(), document.clone());
        Ok(())
    }
}

/// Store that caches nothing, used when caching is disabled
#[derive(Debug, Default)]
pub struct NoopStore;

impl NoopStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DocumentStore for NoopStore {
    async fn get(&self, _url: &str) -> Option<Value> {
        None
    }

    async fn put(&self, _url: &str, _document: &Value) -> CacheResult<()> {
        Ok(())
    }
}
