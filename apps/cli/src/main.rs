// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `indoorgml-convert`: GeoJSON floor plans to IndoorGML-like XML.
//!
//! ```bash
//! indoorgml-convert building.geojson out/building.gml --force
//! INDOORGML_PREVIEW_DIR=previews indoorgml-convert plan.geojson plan.gml -v
//! ```

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use indoorgml_lite_processing::{run_conversion, ConvertOptions};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "indoorgml-convert", version)]
#[command(about = "Convert indoor GeoJSON features into an IndoorGML-like document")]
struct Args {
    /// Input GeoJSON file
    input: PathBuf,

    /// Output XML file
    output: PathBuf,

    /// Overwrite the output file if it exists
    #[arg(short, long)]
    force: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Skip the per-floor PNG previews
    #[arg(long)]
    no_visual: bool,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Input file not found: {0}")]
    MissingInput(PathBuf),

    #[error("Output exists (use --force to overwrite): {0}")]
    OutputExists(PathBuf),

    #[error("Cannot create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = prepare_paths(&args.input, &args.output, args.force) {
        tracing::error!("{}", e);
        return ExitCode::FAILURE;
    }

    let options = ConvertOptions::from_env().with_visualize(!args.no_visual);
    if run_conversion(&args.input, &args.output, &options) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// `RUST_LOG` wins; otherwise `debug` with `--verbose`, `info` without.
/// Logs go to stderr so the report tables own stdout.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Checks the input is a file and the output may be written, creating the
/// output's parent directory when missing.
fn prepare_paths(input: &Path, output: &Path, force: bool) -> Result<(), CliError> {
    if !input.is_file() {
        return Err(CliError::MissingInput(input.to_path_buf()));
    }
    if output.exists() && !force {
        return Err(CliError::OutputExists(output.to_path_buf()));
    }
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| CliError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}
