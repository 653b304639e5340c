//! Cache configuration types and defaults

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::constants::cache;

/// Configuration for the document cache
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache root directory; `None` uses the default under the system temp dir
    pub cache_root: Option<PathBuf>,
    /// Bypass cache reads but still write fetched documents
    pub skip_read: bool,
    /// Disable the cache entirely (reads and writes become no-ops)
    pub disabled: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            cache_root: None,
            skip_read: false,
            disabled: false,
        }
    }
}

impl CacheConfig {
    /// Resolve the effective cache root directory
    pub fn resolve_root(&self) -> PathBuf {
        match &self.cache_root {
            Some(path) => path.clone(),
            None => Self::default_cache_dir(),
        }
    }

    /// Default cache directory under the system temp dir
    pub fn default_cache_dir() -> PathBuf {
        std::env::temp_dir().join(cache::CACHE_DIR_NAME)
    }
}
