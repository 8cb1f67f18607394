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

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// An immutable descriptor naming a single loadable scene.
///
/// The `name` is the sole identity used for matching: two descriptors with
/// the same name are treated as the same scene regardless of their other
/// attributes. Names must be unique within any set or pool they appear in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneDescriptor {
    /// Unique name of the scene within a set.
    pub name: String,

    /// Whether this scene should become the environment's designated
    /// primary (foreground) scene once its load completes.
    pub primary: bool,

    /// Opaque locator handed to the host environment; never interpreted by
    /// the engine itself.
    pub path: PathBuf,
}

impl SceneDescriptor {
    /// Creates a descriptor for a regular (non-primary) scene.
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            primary: false,
            path: path.into(),
        }
    }

    /// Marks this scene as the primary scene of its set.
    #[must_use]
    pub fn as_primary(mut self) -> Self {
        self.primary = true;
        self
    }
}
