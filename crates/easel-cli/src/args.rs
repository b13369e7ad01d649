//! Command-line argument definitions for the Easel CLI.
//!
//! This module defines the [`Args`] structure parsed from the command
//! line using [`clap`]. Arguments select the input layout, the output
//! artifact, the symbol to emit, and the logging verbosity.

use clap::Parser;

/// Command-line arguments for the Easel layout compiler
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input layout file
    #[arg(help = "Path to the input layout file")]
    pub input: String,

    /// Path to the output artifact
    #[arg(help = "Path to the generated source artifact")]
    pub output: String,

    /// Base name for the emitted data array and descriptor
    #[arg(help = "Symbol name for the emitted array and descriptor")]
    pub symbol: String,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
