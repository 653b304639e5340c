//! Document cache for fetched IIIF responses
//!
//! This module provides a pluggable store for parsed JSON documents keyed by
//! their source URL. Entries never expire: a cached document is assumed
//! equivalent to a fresh fetch at the time it was written, which is an
//! accepted trade-off for harvesting workloads that re-run over the same
//! collection trees.
//!
//! # Module Organization
//!
//! - [`config`] - Cache configuration and default locations
//! - [`store`] - The [`DocumentStore`] trait and its disk, memory, and no-op
//!   implementations
//!
//! # Examples
//!
//! ```rust,no_run
//! use loam_iiif::app::cache::{CacheConfig, DiskStore, DocumentStore};
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = DiskStore::new(CacheConfig::default()).await?;
//! store.put("https://example.org/manifest.json", &json!({"id": 1})).await?;
//! let cached = store.get("https://example.org/manifest.json").await;
//! assert!(cached.is_some());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod store;

pub use config::CacheConfig;
pub use store::{DiskStore, DocumentStore, MemoryStore, NoopStore};
