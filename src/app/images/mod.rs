//! Image URL synthesis from IIIF manifests
//!
//! This module resolves a single manifest into an ordered list of directly
//! fetchable image-service request URLs. The manifest's `@context` selects
//! one of two independent structural walks (Presentation 2 or 3); an
//! unrecognized context yields an empty list rather than an error.
//!
//! # Module Organization
//!
//! - [`version`] - Manifest schema version detection
//! - [`extract`] - The structural walks and per-image URL formatting

pub mod extract;
pub mod version;

pub use extract::{manifest_images, ImageOptions};
pub use version::ManifestVersion;
