//! Resilient IIIF document fetcher
//!
//! This module provides the HTTP client used by both the traversal engine and
//! the image synthesizer. A single [`IiifClient`] owns one connection pool and
//! one document store for its lifetime, and exposes [`IiifClient::fetch_json`]
//! as the shared fetch primitive.
//!
//! # Resilience
//!
//! - Retries with exponential backoff on 429/500/502/503/504 and transport
//!   errors
//! - Trailing-comma repair before JSON decoding (see [`repair`])
//! - Read-through / write-through caching against a pluggable
//!   [`DocumentStore`](crate::app::cache::DocumentStore)
//!
//! # Module Organization
//!
//! - [`config`] - Client configuration and HTTP client construction
//! - [`http`] - The [`IiifClient`] fetch loop
//! - [`repair`] - Lenient JSON pre-processing

pub mod config;
pub mod http;
pub mod repair;

pub use config::ClientConfig;
pub use http::IiifClient;
