//! Application constants for loam_iiif
//!
//! This module centralizes all constants used throughout the application,
//! organized by functional domain for maintainability and clarity.

use std::time::Duration;

/// HTTP client configuration constants
pub mod http {
    use super::Duration;

    /// Default user agent for all HTTP requests
    pub const USER_AGENT: &str = "loam-iiif/0.1.0 (IIIF Harvesting Tool)";

    /// Accept header requesting JSON and JSON-LD payloads
    pub const ACCEPT_JSON: &str = "application/json, application/ld+json";

    /// Default per-request timeout
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Connection establishment timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Connection pool idle timeout
    pub const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

    /// Maximum connections per host in pool
    pub const POOL_MAX_PER_HOST: usize = 4;
}

/// Retry and backoff configuration
pub mod limits {
    /// Default total retry attempts for a single fetch
    pub const DEFAULT_RETRY_TOTAL: u32 = 2;

    /// Default exponential backoff factor
    pub const DEFAULT_BACKOFF_FACTOR: f64 = 1.0;

    /// Base delay for exponential backoff (milliseconds)
    pub const RETRY_BASE_DELAY_MS: u64 = 1000;

    /// HTTP status codes eligible for retry
    pub const RETRY_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];
}

/// IIIF Presentation API constants
pub mod iiif {
    /// Context identifier for Presentation API 2.x documents
    pub const PRESENTATION_V2_CONTEXT: &str = "http://iiif.io/api/presentation/2/context.json";

    /// Context identifier for Presentation API 3.0 documents
    pub const PRESENTATION_V3_CONTEXT: &str = "http://iiif.io/api/presentation/3/context.json";

    /// Default requested image width
    pub const DEFAULT_IMAGE_WIDTH: u32 = 768;

    /// Default requested image height
    pub const DEFAULT_IMAGE_HEIGHT: u32 = 2000;

    /// Default image format extension
    pub const DEFAULT_IMAGE_FORMAT: &str = "jpg";
}

/// Cache storage constants
pub mod cache {
    /// Directory name for the default cache root under the system temp dir
    pub const CACHE_DIR_NAME: &str = "loam-iiif";

    /// File extension for cached documents
    pub const CACHE_FILE_EXTENSION: &str = "json";
}

// Re-export commonly used constants for convenience
pub use http::{ACCEPT_JSON, USER_AGENT};
pub use iiif::{PRESENTATION_V2_CONTEXT, PRESENTATION_V3_CONTEXT};
pub use limits::{DEFAULT_BACKOFF_FACTOR, DEFAULT_RETRY_TOTAL, RETRY_STATUS_CODES};
