// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IndoorGML-Lite Processing
//!
//! The conversion pipeline shared by the command-line tool and embedders:
//!
//! 1. load GeoJSON features
//! 2. build cell spaces and back-fill floor, name and feature properties
//! 3. derive transitions from touching geometries
//! 4. write the IndoorGML-like document
//! 5. optionally render per-floor previews
//!
//! ```rust,ignore
//! use indoorgml_lite_processing::{convert, ConvertOptions};
//!
//! let report = convert(Path::new("in.geojson"), Path::new("out.gml"), &ConvertOptions::from_env())?;
//! println!("{}", report);
//! ```

pub mod error;
pub mod options;
pub mod pipeline;
pub mod report;

pub use error::{Error, Result};
pub use options::ConvertOptions;
pub use pipeline::{convert, run_conversion, ConversionReport, ConversionStats};
pub use report::{adjacency_table, feature_table, Table};
