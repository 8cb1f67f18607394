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

use super::SceneDescriptor;
use serde::{Deserialize, Serialize};

/// A named, ordered group of scenes that is loaded and unloaded as one unit.
///
/// Sets are externally authored configuration data and are read-only to the
/// engine. The order of `scenes` is preserved through reconciliation: after a
/// set finishes loading, the active pool lists its scenes in exactly this
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSet {
    /// Name of the set, used for sequencing and event reporting.
    pub name: String,

    /// The scenes making up the set, in activation order.
    pub scenes: Vec<SceneDescriptor>,
}

impl SceneSet {
    /// Creates a set from a name and its scenes.
    pub fn new(name: impl Into<String>, scenes: Vec<SceneDescriptor>) -> Self {
        Self {
            name: name.into(),
            scenes,
        }
    }

    /// The zero-scene sentinel value.
    pub fn empty() -> Self {
        Self {
            name: String::new(),
            scenes: Vec::new(),
        }
    }

    /// Returns `true` if the set contains no scenes.
    pub fn is_empty(&self) -> bool {
        self.scenes.is_empty()
    }

    /// The names of the scenes in the set, in order.
    pub fn scene_names(&self) -> Vec<&str> {
        self.scenes.iter().map(|scene| scene.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sentinel_has_no_scenes() {
        let set = SceneSet::empty();
        assert!(set.is_empty());
        assert!(set.name.is_empty());
    }

    #[test]
    fn scene_names_preserve_order() {
        let set = SceneSet::new(
            "overworld",
            vec![
                SceneDescriptor::new("terrain", "scenes/terrain.ron").as_primary(),
                SceneDescriptor::new("props", "scenes/props.ron"),
            ],
        );
        assert_eq!(set.scene_names(), vec!["terrain", "props"]);
    }
}
