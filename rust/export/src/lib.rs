// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # IndoorGML-Lite Export
//!
//! Serializes cell spaces and their transitions into an IndoorGML-like XML
//! document with GML geometry.
//!
//! ```rust,ignore
//! use indoorgml_lite_export::{generate_document, write_document};
//!
//! let document = generate_document(&cells, &transitions);
//! write_document(&document, Path::new("building.gml"))?;
//! ```

pub mod document;
pub mod error;
pub mod xml;

pub use document::{
    generate_document, write_document, CORE_NAMESPACE, GML_NAMESPACE, ROOT_TAG, SRS_NAME,
};
pub use error::{Error, Result};
pub use xml::{sanitize_name, Element};
