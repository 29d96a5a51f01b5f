// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end conversion: load, build, normalize, connect, export, preview.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use indoorgml_lite_core::{attach_semantics, build_cell_spaces, load_features};
use indoorgml_lite_export::{generate_document, write_document};
use indoorgml_lite_preview::render_previews;
use indoorgml_lite_topology::build_transitions;
use serde::Serialize;

use crate::error::Result;
use crate::options::ConvertOptions;
use crate::report::{adjacency_table, feature_table, Table};

/// Counters and timings for one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConversionStats {
    pub cell_spaces: usize,
    pub transitions: usize,
    pub topology_time_ms: u64,
    pub total_time_ms: u64,
}

/// Everything a successful run produced besides the document itself.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub output: PathBuf,
    pub previews: Vec<PathBuf>,
    pub adjacency: Table,
    pub features: Table,
    pub stats: ConversionStats,
}

impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nConverted → {}", self.output.display())?;
        writeln!(f, "\n=== Adjacency ===")?;
        writeln!(f, "{}", self.adjacency)?;
        writeln!(f, "\n=== Features ===")?;
        write!(f, "{}", self.features)
    }
}

/// Converts `input` GeoJSON into an IndoorGML-like document at `output`.
///
/// Nothing is written before every in-memory stage has succeeded; previews
/// are rendered after the document.
pub fn convert(input: &Path, output: &Path, options: &ConvertOptions) -> Result<ConversionReport> {
    let total_start = Instant::now();

    tracing::info!(path = %input.display(), "Loading GeoJSON");
    let records = load_features(input)?;

    tracing::info!(count = records.len(), "Building cell spaces");
    let mut cell_spaces = build_cell_spaces(records);

    tracing::info!("Attaching semantics");
    attach_semantics(&mut cell_spaces);

    tracing::info!("Building transitions");
    let topology_start = Instant::now();
    let transitions = build_transitions(&cell_spaces);
    let topology_time = topology_start.elapsed();

    tracing::info!("Generating IndoorGML document");
    let document = generate_document(&cell_spaces, &transitions);
    write_document(&document, output)?;

    let adjacency = adjacency_table(&cell_spaces, &transitions);
    let features = feature_table(&cell_spaces, &transitions);

    let previews = if options.visualize {
        tracing::info!("Rendering floor-by-floor previews");
        render_previews(&cell_spaces, &transitions, output, &options.preview)?
    } else {
        Vec::new()
    };

    let stats = ConversionStats {
        cell_spaces: cell_spaces.len(),
        transitions: transitions.len(),
        topology_time_ms: topology_time.as_millis() as u64,
        total_time_ms: total_start.elapsed().as_millis() as u64,
    };
    tracing::info!(
        cell_spaces = stats.cell_spaces,
        transitions = stats.transitions,
        previews = previews.len(),
        total_time_ms = stats.total_time_ms,
        "Conversion complete"
    );

    Ok(ConversionReport {
        output: output.to_path_buf(),
        previews,
        adjacency,
        features,
        stats,
    })
}

/// Runs [`convert`], prints the report to stdout on success and logs any
/// failure. Returns whether the run succeeded.
pub fn run_conversion(input: &Path, output: &Path, options: &ConvertOptions) -> bool {
    match convert(input, output, options) {
        Ok(report) => {
            println!("{}", report);
            true
        }
        Err(e) => {
            tracing::error!(
                input = %input.display(),
                output = %output.display(),
                error = %e,
                "Conversion error"
            );
            false
        }
    }
}
