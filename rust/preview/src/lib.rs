// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IndoorGML-Lite Preview
//!
//! Writes one PNG per building floor: cell spaces colour coded by feature
//! type, with dotted lines between adjacent spaces on the same floor.
//!
//! ```rust,ignore
//! use indoorgml_lite_preview::{render_previews, PreviewConfig};
//!
//! let written = render_previews(&cells, &transitions, Path::new("out.gml"), &PreviewConfig::from_env())?;
//! ```

pub mod config;
pub mod error;
pub mod feature_type;
pub mod render;

pub use config::{PreviewConfig, DEFAULT_SIZE};
pub use error::{Error, Result};
pub use feature_type::FeatureType;
pub use render::{group_by_floor, preview_path, render_previews};
