//! Core harvesting logic for loam_iiif
//!
//! This module contains the main application components: the document cache,
//! the resilient HTTP client, the collection traversal engine, and the image
//! URL synthesizer. The traversal engine and the synthesizer both consume the
//! client's single fetch primitive; the client consumes the cache.
//!
//! # Examples
//!
//! ```rust,no_run
//! use loam_iiif::app::{traverse, CacheConfig, ClientConfig, IiifClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = IiifClient::new(ClientConfig::default(), CacheConfig::default()).await?;
//!
//! let result = traverse(&client, "https://example.org/iiif/collection/top", None).await?;
//! for manifest in &result.manifests {
//!     println!("Found manifest: {}", manifest);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod client;
pub mod images;
pub mod traverse;

// Re-export main public API
pub use cache::{CacheConfig, DiskStore, DocumentStore, MemoryStore, NoopStore};
pub use client::{ClientConfig, IiifClient};
pub use images::{manifest_images, ImageOptions, ManifestVersion};
pub use traverse::{traverse, Item, ItemKind, TraversalResult};
