// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use indoorgml_lite_preview::PreviewConfig;

/// Options for a conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Write per-floor PNG previews after the document.
    pub visualize: bool,
    pub preview: PreviewConfig,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            visualize: true,
            preview: PreviewConfig::default(),
        }
    }
}

impl ConvertOptions {
    /// Previews enabled, preview settings from the environment.
    pub fn from_env() -> Self {
        Self {
            visualize: true,
            preview: PreviewConfig::from_env(),
        }
    }

    pub fn with_visualize(mut self, visualize: bool) -> Self {
        self.visualize = visualize;
        self
    }
}
