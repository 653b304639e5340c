//! Command handlers for the loam_iiif CLI
//!
//! This module implements the handlers that coordinate between CLI arguments
//! and the core harvesting functionality.

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, info};

use url::Url;

use crate::app::{manifest_images, traverse, ClientConfig, IiifClient, ImageOptions};
use crate::errors::{AppError, Result};

use super::args::{GlobalArgs, ImagesArgs, TraverseArgs};
use super::output::{render, sanitize_filename, write_output};

/// Handle the traverse command
///
/// Runs the traversal engine over the given collection URL and renders the
/// discovered identifiers, optionally downloading every manifest body.
pub async fn handle_traverse(global: &GlobalArgs, args: TraverseArgs) -> Result<()> {
    validate_url(&args.url)?;

    let cache_config = global.cache_config();
    debug!(
        "Starting traversal of IIIF collection: {} (cache root: {})",
        args.url,
        cache_config.resolve_root().display()
    );

    let client = IiifClient::new(ClientConfig::default(), cache_config).await?;
    let result = traverse(&client, &args.url, args.max_manifests).await?;

    info!(
        "Traversal completed. Found {} unique manifests and {} collections",
        result.manifests.len(),
        result.collections.len()
    );

    if args.download_manifests && !global.no_cache {
        let wrote_files =
            download_manifests(&client, &result.manifests, args.output.as_deref()).await?;
        if wrote_files {
            // Manifest bodies already written; skip identifier rendering
            return Ok(());
        }
    }

    let rendered = render(&result, args.format);
    write_output(&rendered, args.output.as_deref())
}

/// Handle the images command
pub async fn handle_images(global: &GlobalArgs, args: ImagesArgs) -> Result<()> {
    validate_url(&args.url)?;

    let client = IiifClient::new(ClientConfig::default(), global.cache_config()).await?;

    let options = ImageOptions {
        width: args.width,
        height: args.height,
        format: args.image_format.clone(),
        exact: args.exact,
        use_max: args.use_max,
    };

    let urls = manifest_images(&client, &args.url, &options).await?;
    info!("Extracted {} image URLs from {}", urls.len(), args.url);

    let mut rendered = urls.join("\n");
    if !rendered.is_empty() {
        rendered.push('\n');
    }
    write_output(&rendered, args.output.as_deref())
}

/// Reject arguments that are not absolute HTTP(S) URLs before any fetching
fn validate_url(raw: &str) -> Result<()> {
    let url = Url::parse(raw)
        .map_err(|e| AppError::generic(format!("Invalid URL '{}': {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::generic(format!(
            "Unsupported URL scheme '{}': {}",
            url.scheme(),
            raw
        )));
    }
    Ok(())
}

/// Fetch every discovered manifest, populating the cache
///
/// When an output directory is given, each manifest body is additionally
/// written to `<sanitized-last-url-segment>.json` inside it. Returns whether
/// files were written (in which case identifier rendering is skipped).
async fn download_manifests(
    client: &IiifClient,
    manifests: &[String],
    output: Option<&Path>,
) -> Result<bool> {
    debug!("Downloading JSON contents for {} manifests", manifests.len());

    if let Some(dir) = output {
        std::fs::create_dir_all(dir)?;
        debug!("Will save manifest files to directory: {}", dir.display());
    }

    let progress = ProgressBar::new(manifests.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    progress.set_message("downloading manifests");

    for manifest_url in manifests {
        match client.fetch_json(manifest_url).await {
            Ok(document) => {
                if let Some(dir) = output {
                    let last_segment = manifest_url.rsplit('/').next().unwrap_or(manifest_url);
                    let filename = format!("{}.json", sanitize_filename(last_segment));
                    let path = dir.join(filename);
                    let body = serde_json::to_string_pretty(&document)
                        .map_err(|e| crate::errors::AppError::generic(e.to_string()))?;
                    std::fs::write(&path, body)?;
                    debug!("Saved manifest to {}", path.display());
                }
            }
            Err(e) => {
                error!("Failed to download manifest {}: {}", manifest_url, e);
            }
        }
        progress.inc(1);
    }

    progress.finish_and_clear();
    Ok(output.is_some())
}
