//! Result rendering and file output

use std::io::Write;
use std::path::Path;

use clap::ValueEnum;
use lazy_static::lazy_static;
use regex::Regex;
use serde_json::json;
use tracing::debug;

use crate::app::TraversalResult;
use crate::errors::Result;

lazy_static! {
    static ref UNSAFE_FILENAME_RE: Regex = Regex::new(r"[^\w\-.]").unwrap();
}

/// Supported output formats for traversal results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON object with manifests and collections
    Json,
    /// JSON Lines, one object per identifier
    Jsonl,
    /// Plain-text tables
    Table,
}

/// Render a traversal result in the requested format
pub fn render(result: &TraversalResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => render_json(result),
        OutputFormat::Jsonl => render_jsonl(result),
        OutputFormat::Table => render_table(result),
    }
}

fn render_json(result: &TraversalResult) -> String {
    let value = json!({
        "manifests": result.manifests,
        "collections": result.collections,
    });
    serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
}

fn render_jsonl(result: &TraversalResult) -> String {
    let mut lines = String::new();
    for manifest in &result.manifests {
        lines.push_str(&json!({ "manifest": manifest }).to_string());
        lines.push('\n');
    }
    for collection in &result.collections {
        lines.push_str(&json!({ "collection": collection }).to_string());
        lines.push('\n');
    }
    lines
}

fn render_table(result: &TraversalResult) -> String {
    let mut out = String::new();
    if !result.manifests.is_empty() {
        out.push_str("Manifests\n");
        out.push_str(&"-".repeat(40));
        out.push('\n');
        for (idx, manifest) in result.manifests.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", idx + 1, manifest));
        }
    }
    if !result.collections.is_empty() {
        if !out.is_empty() {
            out.push('\n');
        }
        out.push_str("Collections\n");
        out.push_str(&"-".repeat(40));
        out.push('\n');
        for (idx, collection) in result.collections.iter().enumerate() {
            out.push_str(&format!("{}. {}\n", idx + 1, collection));
        }
    }
    out
}

/// Write rendered content to a file, or stdout when no path is given
pub fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)?;
            file.write_all(content.as_bytes())?;
            debug!("Results saved to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            if !content.ends_with('\n') {
                stdout.write_all(b"\n")?;
            }
        }
    }
    Ok(())
}

/// Sanitize a filename by replacing characters outside `[A-Za-z0-9._-]`
pub fn sanitize_filename(name: &str) -> String {
    UNSAFE_FILENAME_RE.replace_all(name, "_").into_owned()
}
