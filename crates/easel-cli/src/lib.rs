//! CLI logic for the Easel layout compiler.
//!
//! This module contains the core CLI logic: reading the source, driving
//! the compile pipeline, and guaranteeing that no partial artifact is
//! left behind on any failure path.

pub mod error_adapter;

mod args;

pub use args::Args;

use std::fs::{self, File};
use std::io::{BufWriter, Write};

use log::{info, warn};

use easel::{EaselError, LayoutCompiler};

/// Run the Easel CLI application.
///
/// Reads the input layout, compiles it, and writes the artifact to the
/// output path. The artifact is written incrementally during the single
/// validation pass; if anything fails after the output file was created,
/// the partial file is deleted so downstream build steps never consume a
/// corrupt artifact.
///
/// # Arguments
///
/// * `args` - Command-line arguments
///
/// # Errors
///
/// Returns `EaselError` for:
/// - File I/O errors reading the source or writing the artifact
/// - Malformed XML in the source
/// - Layout grammar violations
pub fn run(args: &Args) -> Result<(), EaselError> {
    info!(
        input_path = args.input,
        output_path = args.output,
        symbol = args.symbol;
        "Compiling layout"
    );

    let source = fs::read_to_string(&args.input)?;

    let file = File::create(&args.output)?;
    let mut writer = BufWriter::new(file);

    let result = LayoutCompiler::new()
        .compile(&source, &args.symbol, &mut writer)
        .and_then(|stats| {
            writer.flush()?;
            Ok(stats)
        });

    match result {
        Ok(stats) => {
            info!(
                output_file = args.output,
                uncompressed_size = stats.uncompressed_size,
                compressed_size = stats.compressed_size;
                "Artifact written"
            );
            Ok(())
        }
        Err(err) => {
            drop(writer);
            if let Err(remove_err) = fs::remove_file(&args.output) {
                warn!(
                    path = args.output,
                    error:? = remove_err;
                    "Failed to remove partial artifact"
                );
            }
            Err(err)
        }
    }
}
