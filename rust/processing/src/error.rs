// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Result type for a conversion run
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a conversion run
#[derive(Error, Debug)]
pub enum Error {
    #[error("Loading failed: {0}")]
    Load(#[from] indoorgml_lite_core::Error),

    #[error("Export failed: {0}")]
    Export(#[from] indoorgml_lite_export::Error),

    #[error("Preview failed: {0}")]
    Preview(#[from] indoorgml_lite_preview::Error),
}
