//! Command-line interface for loam_iiif
//!
//! This module wires the CLI surface to the core harvesting logic: argument
//! parsing with clap, command handlers, and output rendering.
//!
//! # Module Organization
//!
//! - [`args`] - CLI structure and argument parsing
//! - [`commands`] - Command handlers
//! - [`output`] - Result rendering and file output

pub mod args;
pub mod commands;
pub mod output;

pub use args::{Cli, Commands, GlobalArgs, ImagesArgs, TraverseArgs};
pub use commands::{handle_images, handle_traverse};
pub use output::{sanitize_filename, OutputFormat};
