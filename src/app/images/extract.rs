//! Structural walks and image URL formatting

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, error};

use crate::app::client::IiifClient;
use crate::constants::iiif;
use crate::errors::Result;

use super::version::ManifestVersion;

lazy_static! {
    /// Matches an identifier that already embeds a fully qualified image
    /// request, e.g. `.../full/!100,200/0/default.jpg`
    static ref FULL_REQUEST_RE: Regex =
        Regex::new(r"/full/(?:max|full|!?\d+,\d+)/0/default\.[A-Za-z0-9]+$").unwrap();

    static ref INFO_JSON_RE: Regex = Regex::new(r"/info\.json$").unwrap();
}

/// Options for synthesized image requests
#[derive(Debug, Clone)]
pub struct ImageOptions {
    /// Desired image width
    pub width: u32,
    /// Desired image height
    pub height: u32,
    /// Image format extension, e.g. `jpg` or `png`
    pub format: String,
    /// Request exact dimensions instead of aspect-ratio-preserving scaling
    pub exact: bool,
    /// Request the server's maximum size (`max` for v3, `full` for v2)
    /// instead of specific dimensions
    pub use_max: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            width: iiif::DEFAULT_IMAGE_WIDTH,
            height: iiif::DEFAULT_IMAGE_HEIGHT,
            format: iiif::DEFAULT_IMAGE_FORMAT.to_string(),
            exact: false,
            use_max: false,
        }
    }
}

/// Extract formatted image URLs from a manifest
///
/// Fetch errors propagate; an unrecognized manifest context and per-image
/// formatting failures are recoverable and yield an empty or partial list.
/// Order follows the structural walk.
pub async fn manifest_images(
    client: &IiifClient,
    manifest_url: &str,
    options: &ImageOptions,
) -> Result<Vec<String>> {
    let document = client.fetch_json(manifest_url).await?;

    let Some(version) = ManifestVersion::detect(&document) else {
        error!(
            "Unsupported or missing IIIF context in manifest {}: {:?}",
            manifest_url,
            document.get("@context")
        );
        return Ok(Vec::new());
    };

    let image_ids = match version {
        ManifestVersion::V3 => collect_v3_image_ids(&document),
        ManifestVersion::V2 => collect_v2_image_ids(&document),
    };

    if image_ids.is_empty() {
        debug!("No image IDs found in manifest {}", manifest_url);
        return Ok(Vec::new());
    }

    let urls = image_ids
        .iter()
        .filter_map(|id| format_image_url(id.as_deref(), version, options))
        .collect();

    Ok(urls)
}

/// Walk a Presentation 3 manifest: canvases, annotation pages, annotations
///
/// An annotation body with a direct `id` contributes that identifier (with
/// any embedded `/full/...` request stripped). A body with only a `service`
/// contributes the service's identifier, even when absent; the null check is
/// deferred to formatting so one malformed body never blocks the rest of the
/// walk.
fn collect_v3_image_ids(document: &Value) -> Vec<Option<String>> {
    let mut image_ids = Vec::new();

    for canvas in array_field(document, "items") {
        for anno_page in array_field(canvas, "items") {
            for annotation in array_field(anno_page, "items") {
                let Some(body) = annotation.get("body").filter(|b| b.is_object()) else {
                    continue;
                };

                if let Some(id) = body.get("id").and_then(Value::as_str) {
                    image_ids.push(Some(strip_full_request(id)));
                } else if let Some(service) = body.get("service") {
                    let service = match service {
                        Value::Array(entries) => entries.first(),
                        other => Some(other),
                    };
                    let id = service
                        .filter(|s| s.is_object())
                        .and_then(|s| s.get("@id").or_else(|| s.get("id")))
                        .and_then(Value::as_str)
                        .map(str::to_string);
                    image_ids.push(id);
                }
            }
        }
    }

    image_ids
}

/// Walk a Presentation 2 manifest: first sequence's canvases' images
fn collect_v2_image_ids(document: &Value) -> Vec<Option<String>> {
    let mut image_ids = Vec::new();

    let canvases = document
        .get("sequences")
        .and_then(Value::as_array)
        .and_then(|sequences| sequences.first())
        .map(|sequence| array_field(sequence, "canvases"))
        .unwrap_or_default();

    for canvas in canvases {
        for image in array_field(canvas, "images") {
            let Some(resource) = image.get("resource") else {
                continue;
            };

            if let Some(id) = resource.get("@id").and_then(Value::as_str) {
                image_ids.push(Some(strip_full_request(id)));
            } else if let Some(id) = resource
                .get("service")
                .and_then(|s| s.get("@id"))
                .and_then(Value::as_str)
            {
                image_ids.push(Some(id.to_string()));
            }
        }
    }

    image_ids
}

fn array_field<'a>(value: &'a Value, field: &str) -> Vec<&'a Value> {
    value
        .get(field)
        .and_then(Value::as_array)
        .map(|values| values.iter().collect())
        .unwrap_or_default()
}

/// Reduce an identifier embedding a full image request to its base URL
fn strip_full_request(id: &str) -> String {
    match id.split_once("/full/") {
        Some((base, _)) => base.to_string(),
        None => id.to_string(),
    }
}

/// Format one base identifier into a fetchable image request URL
///
/// A missing identifier is logged and skipped. Identifiers already matching
/// a fully qualified request pattern are passed through untouched, so
/// re-formatting is idempotent.
fn format_image_url(
    base: Option<&str>,
    version: ManifestVersion,
    options: &ImageOptions,
) -> Option<String> {
    let Some(base) = base else {
        error!("Skipping image with missing identifier");
        return None;
    };

    let base = INFO_JSON_RE.replace(base, "").into_owned();
    if FULL_REQUEST_RE.is_match(&base) {
        return Some(base);
    }

    let size = if options.use_max {
        match version {
            ManifestVersion::V2 => "full".to_string(),
            ManifestVersion::V3 => "max".to_string(),
        }
    } else {
        let prefix = if options.exact { "" } else { "!" };
        format!("{}{},{}", prefix, options.width, options.height)
    };

    Some(format!(
        "{}/full/{}/0/default.{}",
        base, size, options.format
    ))
}
