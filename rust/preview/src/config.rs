// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Preview configuration loaded from environment variables.

use std::path::PathBuf;

/// Default square image size in pixels.
pub const DEFAULT_SIZE: u32 = 800;

/// Smallest accepted image size; below this nothing is legible.
const MIN_SIZE: u32 = 64;

/// Preview configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Directory for the PNG files. Next to the output document when unset.
    pub output_dir: Option<PathBuf>,
    /// Width and height of each image in pixels.
    pub size: u32,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            output_dir: None,
            size: DEFAULT_SIZE,
        }
    }
}

impl PreviewConfig {
    /// Load configuration from `INDOORGML_PREVIEW_DIR` and
    /// `INDOORGML_PREVIEW_SIZE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) over an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            output_dir: lookup("INDOORGML_PREVIEW_DIR")
                .filter(|s| !s.trim().is_empty())
                .map(PathBuf::from),
            size: lookup("INDOORGML_PREVIEW_SIZE")
                .and_then(|s| s.trim().parse().ok())
                .filter(|&size| size >= MIN_SIZE)
                .unwrap_or(DEFAULT_SIZE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_without_variables() {
        assert_eq!(PreviewConfig::from_lookup(|_| None), PreviewConfig::default());
    }

    #[test]
    fn reads_variables() {
        let config = PreviewConfig::from_lookup(|key| match key {
            "INDOORGML_PREVIEW_DIR" => Some("/tmp/previews".into()),
            "INDOORGML_PREVIEW_SIZE" => Some(" 400 ".into()),
            _ => None,
        });
        assert_eq!(config.output_dir, Some(PathBuf::from("/tmp/previews")));
        assert_eq!(config.size, 400);
    }

    #[test]
    fn invalid_size_falls_back() {
        for bad in ["huge", "-5", "10", ""] {
            let config = PreviewConfig::from_lookup(|key| {
                (key == "INDOORGML_PREVIEW_SIZE").then(|| bad.to_string())
            });
            assert_eq!(config.size, DEFAULT_SIZE, "value {:?}", bad);
        }
    }
}
