//! loam_iiif library
//!
//! A Rust library for harvesting manifest and collection identifiers from
//! IIIF Presentation API (v2 and v3) collection hierarchies. Provides a
//! resilient JSON fetcher with retry logic and response caching, a
//! breadth-first collection traversal engine, and an image URL synthesizer
//! for resolving manifests into fetchable image requests.

pub mod app;
pub mod cli;
pub mod constants;
pub mod errors;

// Re-export commonly used types for convenience
pub use errors::{AppError, Result};
