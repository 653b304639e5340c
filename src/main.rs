//! loam_iiif CLI application
//!
//! Command-line interface for harvesting IIIF collections: traverses
//! collection hierarchies, lists discovered manifests, and resolves manifests
//! into fetchable image URLs.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use loam_iiif::cli::{handle_images, handle_traverse, Cli, Commands};
use loam_iiif::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(&cli);

    info!("loam_iiif v{} starting", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Traverse(args) => handle_traverse(&cli.global, args).await,
        Commands::Images(args) => handle_images(&cli.global, args).await,
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    let filter = EnvFilter::from_default_env()
        .add_directive(format!("loam_iiif={}", log_level).parse().unwrap());

    // Logs go to stderr so rendered results on stdout stay pipeable
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    }
}
