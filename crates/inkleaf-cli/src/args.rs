//! Command-line argument definitions for the Inkleaf CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the record store and document, an
//! optional gesture script to replay, the exported page, configuration file
//! selection and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Inkleaf annotation tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the JSON annotation record store
    #[arg(help = "Path to the record store (created on --save if missing)")]
    pub input: String,

    /// Path to the output SVG file
    #[arg(short, long, default_value = "out.svg")]
    pub output: String,

    /// 1-based page to export
    #[arg(short, long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,

    /// Document whose annotations are loaded
    #[arg(long, default_value_t = 1)]
    pub pdf_id: u64,

    /// Gesture script (JSON) to replay before exporting
    #[arg(short, long)]
    pub script: Option<String>,

    /// Persist strokes committed by the script back to the record store
    #[arg(long)]
    pub save: bool,

    /// Surface width in pixels, overriding the configuration
    #[arg(long)]
    pub width: Option<f32>,

    /// Surface height in pixels, overriding the configuration
    #[arg(long)]
    pub height: Option<f32>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
