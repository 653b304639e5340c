//! Command-line argument parsing for loam_iiif
//!
//! This module defines the CLI structure using clap derive macros, providing
//! an interface for collection traversal and manifest image extraction.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::CacheConfig;
use crate::constants::iiif;

use super::output::OutputFormat;

/// loam_iiif - Harvest IIIF collections and manifests
#[derive(Parser, Debug)]
#[command(
    name = "loam_iiif",
    version,
    about = "Harvest manifest and collection identifiers from IIIF collections",
    long_about = "A tool for traversing IIIF Presentation API (v2 and v3) collection hierarchies.
Discovers every reachable manifest and nested collection, caches fetched documents,
and can resolve manifests into directly fetchable image URLs."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Effective log level derived from verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.global.very_verbose {
            "debug"
        } else if self.global.verbose {
            "info"
        } else if self.global.quiet {
            "error"
        } else {
            "warn"
        }
    }
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory to cache fetched documents. Defaults to the system temp
    /// directory
    #[arg(short = 'c', long, global = true, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Skip reading from cache but still write to it
    #[arg(long, global = true)]
    pub skip_cache: bool,

    /// Disable document caching completely
    #[arg(long, global = true)]
    pub no_cache: bool,
}

impl GlobalArgs {
    /// Cache configuration derived from the global flags
    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            cache_root: self.cache_dir.clone(),
            skip_read: self.skip_cache,
            disabled: self.no_cache,
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Traverse a collection and list discovered manifests and collections
    Traverse(TraverseArgs),

    /// Extract image URLs from a single manifest
    Images(ImagesArgs),
}

/// Arguments for the traverse command
#[derive(Args, Debug, Clone)]
pub struct TraverseArgs {
    /// The IIIF collection URL to traverse
    pub url: String,

    /// Output file to save the results (directory when combined with
    /// --download-manifests)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    pub format: OutputFormat,

    /// Maximum number of manifests to retrieve. If not specified, all
    /// manifests are retrieved
    #[arg(short, long, value_name = "N")]
    pub max_manifests: Option<usize>,

    /// Download full JSON contents of each discovered manifest
    #[arg(short, long)]
    pub download_manifests: bool,
}

/// Arguments for the images command
#[derive(Args, Debug, Clone)]
pub struct ImagesArgs {
    /// The IIIF manifest URL to extract image URLs from
    pub url: String,

    /// Output file to save the URLs (one per line)
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Desired image width
    #[arg(long, default_value_t = iiif::DEFAULT_IMAGE_WIDTH)]
    pub width: u32,

    /// Desired image height
    #[arg(long, default_value_t = iiif::DEFAULT_IMAGE_HEIGHT)]
    pub height: u32,

    /// Image format extension (e.g. jpg, png)
    #[arg(long, default_value = iiif::DEFAULT_IMAGE_FORMAT)]
    pub image_format: String,

    /// Use exact dimensions without aspect ratio preservation
    #[arg(long)]
    pub exact: bool,

    /// Request the server's maximum size instead of specific dimensions
    #[arg(long)]
    pub use_max: bool,
}
