//! The breadth-first traversal loop

use std::collections::{HashSet, VecDeque};

use tracing::{debug, info, warn};

use crate::app::client::IiifClient;
use crate::errors::Result;

use super::types::{child_items, Item, ItemKind};

/// Identifiers discovered by one traversal call
///
/// Both sets are deduplicated; neither carries an ordering contract. The
/// collection set is the set of successfully processed collection URLs and
/// includes the root on success.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraversalResult {
    pub manifests: Vec<String>,
    pub collections: Vec<String>,
}

/// Walk a collection graph breadth-first, collecting manifest and nested
/// collection identifiers
///
/// A fetch failure on a non-root collection is logged and skipped without
/// aborting the traversal; a failure on the very first fetch (the root)
/// propagates to the caller. When `max_manifests` is reached the walk stops
/// immediately and the returned manifest set is truncated to that size.
pub async fn traverse(
    client: &IiifClient,
    root_url: &str,
    max_manifests: Option<usize>,
) -> Result<TraversalResult> {
    let mut manifest_ids: HashSet<String> = HashSet::new();
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue: VecDeque<String> = VecDeque::from([root_url.to_string()]);
    let mut first_fetch = true;

    while let Some(url) = queue.pop_front() {
        if visited.contains(&url) {
            debug!("Already processed collection: {}", url);
            continue;
        }

        let document = match client.fetch_json(&url).await {
            Ok(document) => document,
            Err(e) if first_fetch => return Err(e.into()),
            Err(e) => {
                warn!("Skipping collection due to fetch error: {} ({})", url, e);
                continue;
            }
        };
        first_fetch = false;

        let items: Vec<Item> = child_items(&document)
            .iter()
            .filter_map(|value| Item::from_value(value, &url))
            .collect();

        for item in &items {
            match item.kind {
                ItemKind::Manifest => {
                    if manifest_ids.insert(item.id.clone()) {
                        debug!("Added manifest: {}", item.id);
                    }
                }
                ItemKind::Collection => {
                    debug!("Found nested collection: {}", item.id);
                    // No pre-filtering against the visited set here; the
                    // check happens at pop time
                    queue.push_back(item.id.clone());
                }
                ItemKind::Unknown => {
                    debug!("Ignoring item of unknown kind: {}", item.id);
                }
            }
        }

        visited.insert(url.clone());
        info!("Processed collection: {}", url);

        if let Some(max) = max_manifests {
            if manifest_ids.len() >= max {
                info!("Reached maximum number of manifests: {}", max);
                break;
            }
        }
    }

    let mut manifests: Vec<String> = manifest_ids.into_iter().collect();
    if let Some(max) = max_manifests {
        manifests.truncate(max);
    }
    let collections: Vec<String> = visited.into_iter().collect();

    info!(
        "Completed traversal of {}: {} unique manifests, {} nested collections",
        root_url,
        manifests.len(),
        collections.len().saturating_sub(1)
    );

    Ok(TraversalResult {
        manifests,
        collections,
    })
}
