// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IndoorGML-Lite Core
//!
//! Data model and semantic heuristics for converting indoor GeoJSON into
//! IndoorGML cell spaces.
//!
//! ## Overview
//!
//! - **Loading**: GeoJSON features exploded into single-part records
//! - **Cell spaces**: one [`CellSpace`] per record with a unique id
//! - **Floor detection**: [`detect_level`] maps inconsistent floor hints
//!   (`floor_name`, `storey`, numeric `z`, `"3rd"`, ...) to one label
//! - **Semantics**: [`attach_semantics`] back-fills floor, name and feature
//!   keys in place
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use indoorgml_lite_core::{attach_semantics, build_cell_spaces, load_features};
//!
//! let records = load_features(Path::new("building.geojson"))?;
//! let mut cells = build_cell_spaces(records);
//! attach_semantics(&mut cells);
//!
//! for cell in &cells {
//!     println!("{} on floor {}", cell.id(), detect_level(cell.properties()));
//! }
//! ```

pub mod cell_space;
pub mod error;
pub mod floor;
pub mod geometry;
pub mod loader;
pub mod properties;
pub mod semantics;

pub use cell_space::{build_cell_spaces, CellSpace};
pub use error::{Error, Result};
pub use floor::{
    detect_floor, detect_level, floor_sort_key, normalize_floor, parse_ordinal, FloorDetection,
    BASEMENT, GROUND, UNKNOWN_FLOOR,
};
pub use geometry::{Bounds, Coord, Geometry};
pub use loader::{load_features, parse_features, FeatureRecord};
pub use properties::{format_float, PropertyValue, Properties};
pub use semantics::{attach_semantics, FLOOR_KEYS};
