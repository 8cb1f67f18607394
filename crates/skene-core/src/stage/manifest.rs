// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! On-disk authoring format for scene sets.
//!
//! A manifest bundles a [`SceneSet`] with the [`LoadOptions`] it should be
//! loaded with, stored as human-readable RON so set definitions can be
//! inspected and diffed in version control.

use super::{LoadOptions, SceneSet};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

/// A scene set paired with the load options it is normally requested with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSetManifest {
    /// The authored set.
    pub set: SceneSet,
    /// The retention policy applied when this set is requested.
    pub options: LoadOptions,
}

impl SceneSetManifest {
    /// Parses a manifest from RON bytes.
    pub fn from_ron(data: &[u8]) -> Result<Self, ManifestError> {
        ron::de::from_bytes(data).map_err(|e| ManifestError::Parse(e.to_string()))
    }

    /// Serializes the manifest to pretty-printed RON.
    pub fn to_ron_pretty(&self) -> Result<String, ManifestError> {
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty_config)
            .map_err(|e| ManifestError::Format(e.to_string()))
    }

    /// Reads and parses a manifest file.
    pub fn read_from(path: &Path) -> Result<Self, ManifestError> {
        let data = fs::read(path).map_err(|e| ManifestError::Io(e.to_string()))?;
        Self::from_ron(&data)
    }

    /// Writes the manifest to a file as pretty-printed RON.
    pub fn write_to(&self, path: &Path) -> Result<(), ManifestError> {
        let text = self.to_ron_pretty()?;
        fs::write(path, text).map_err(|e| ManifestError::Io(e.to_string()))
    }
}

/// An error encountered while reading or writing a scene-set manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestError {
    /// The manifest file could not be read or written.
    Io(String),
    /// The manifest content is not valid RON for a [`SceneSetManifest`].
    Parse(String),
    /// The manifest could not be serialized.
    Format(String),
}

impl fmt::Display for ManifestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ManifestError::Io(details) => write!(f, "Manifest I/O error: {details}"),
            ManifestError::Parse(details) => write!(f, "Invalid manifest: {details}"),
            ManifestError::Format(details) => {
                write!(f, "Failed to serialize manifest: {details}")
            }
        }
    }
}

impl std::error::Error for ManifestError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stage::SceneDescriptor;

    fn sample_manifest() -> SceneSetManifest {
        SceneSetManifest {
            set: SceneSet::new(
                "hub",
                vec![
                    SceneDescriptor::new("hub_world", "scenes/hub_world.ron").as_primary(),
                    SceneDescriptor::new("hub_audio", "scenes/hub_audio.ron"),
                ],
            ),
            options: LoadOptions::CLEAR_EXISTING,
        }
    }

    #[test]
    fn ron_round_trip() {
        let manifest = sample_manifest();
        let text = manifest.to_ron_pretty().expect("serialize");
        let parsed = SceneSetManifest::from_ron(text.as_bytes()).expect("parse");
        assert_eq!(parsed, manifest);
    }

    #[test]
    fn file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("hub.sceneset.ron");

        let manifest = sample_manifest();
        manifest.write_to(&path).expect("write");

        let read_back = SceneSetManifest::read_from(&path).expect("read");
        assert_eq!(read_back, manifest);
    }

    #[test]
    fn rejects_malformed_manifest() {
        let result = SceneSetManifest::from_ron(b"(set: oops");
        assert!(matches!(result, Err(ManifestError::Parse(_))));
    }
}
