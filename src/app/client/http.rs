//! Core fetch loop with retry and cache integration

use reqwest::header::ACCEPT;
use reqwest::{Client, Response};
use serde_json::Value;
use tracing::{debug, error, warn};

use crate::app::cache::{CacheConfig, DiskStore, DocumentStore, NoopStore};
use crate::constants::{http, limits};
use crate::errors::{FetchError, FetchResult, Result};

use super::config::ClientConfig;
use super::repair;

/// Client for fetching IIIF documents with retries and caching
///
/// Owns one connection pool and one document store for its lifetime. All
/// fetches issued through one client are strictly sequential; the retry loop
/// inside a single fetch may issue multiple physical requests transparently.
pub struct IiifClient {
    client: Client,
    config: ClientConfig,
    store: Box<dyn DocumentStore>,
    skip_cache_read: bool,
}

impl IiifClient {
    /// Create a client with a disk-backed cache (or no cache, if disabled)
    pub async fn new(config: ClientConfig, cache: CacheConfig) -> Result<Self> {
        let skip_cache_read = cache.skip_read;
        let store: Box<dyn DocumentStore> = if cache.disabled {
            Box::new(NoopStore::new())
        } else {
            Box::new(DiskStore::new(cache).await?)
        };
        Self::with_store(config, store, skip_cache_read)
    }

    /// Create a client over an explicit document store
    ///
    /// Tests substitute a [`MemoryStore`](crate::app::cache::MemoryStore)
    /// here.
    pub fn with_store(
        config: ClientConfig,
        store: Box<dyn DocumentStore>,
        skip_cache_read: bool,
    ) -> Result<Self> {
        let client = config.build_http_client()?;
        Ok(Self {
            client,
            config,
            store,
            skip_cache_read,
        })
    }

    /// The document store backing this client
    pub fn store(&self) -> &dyn DocumentStore {
        self.store.as_ref()
    }

    /// Fetch and decode a JSON document, consulting the cache first
    ///
    /// On a cache hit no network request is made. On a successful fetch the
    /// parsed document is written back to the store before returning.
    pub async fn fetch_json(&self, url: &str) -> FetchResult<Value> {
        if !self.skip_cache_read {
            if let Some(document) = self.store.get(url).await {
                return Ok(document);
            }
        }

        debug!("Fetching URL: {}", url);
        let response = self.get_with_retries(url).await?;

        let status = response.status();
        if !status.is_success() {
            error!("HTTP error while fetching {}: {}", url, status);
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })?;

        let repaired = repair::strip_trailing_commas(&body);
        let document: Value =
            serde_json::from_str(&repaired).map_err(|e| FetchError::MalformedJson {
                url: url.to_string(),
                source: e,
            })?;
        debug!("Successfully fetched data from {}", url);

        if let Err(e) = self.store.put(url, &document).await {
            warn!("Failed to cache document for {}: {}", url, e);
        }

        Ok(document)
    }

    /// Issue a GET with retry on transient failures
    ///
    /// Retries apply only to the retry-eligible status codes and to transport
    /// errors. Exhausting retries on an eligible status returns the final
    /// response rather than erroring here; the caller maps non-2xx to a
    /// status error.
    async fn get_with_retries(&self, url: &str) -> FetchResult<Response> {
        let mut attempt = 0;
        loop {
            let result = self
                .client
                .get(url)
                .header(ACCEPT, http::ACCEPT_JSON)
                .send()
                .await;

            match result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if limits::RETRY_STATUS_CODES.contains(&status)
                        && attempt < self.config.retry_total
                    {
                        attempt += 1;
                        let delay = self.config.backoff_delay(attempt);
                        warn!(
                            "Retryable status {} from {} (attempt {}/{}). Backing off for {}ms",
                            status,
                            url,
                            attempt,
                            self.config.retry_total,
                            delay.as_millis()
                        );
                        tokio::time::sleep(delay).await;
                        continue;
                    }
                    return Ok(response);
                }
                Err(e) if attempt < self.config.retry_total => {
                    attempt += 1;
                    let delay = self.config.backoff_delay(attempt);
                    warn!(
                        "Request to {} failed (attempt {}/{}): {}. Retrying in {}ms",
                        url,
                        attempt,
                        self.config.retry_total,
                        e,
                        delay.as_millis()
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!(
                        "Request to {} failed after {} retries: {}",
                        url, self.config.retry_total, e
                    );
                    return Err(FetchError::Transport {
                        url: url.to_string(),
                        source: e,
                    });
                }
            }
        }
    }
}
