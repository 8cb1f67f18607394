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

use skene_core::stage::SceneDescriptor;

/// The per-index match vectors between the current pool and a pending set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetComparison {
    /// `current_matches[i]` is `true` if the name of `current[i]` appears
    /// anywhere in the pending set.
    pub current_matches: Vec<bool>,
    /// `pending_matches[j]` is `true` if the name of `pending[j]` appears
    /// anywhere in the current pool.
    pub pending_matches: Vec<bool>,
}

/// Compares two scene sequences by name equality.
///
/// Name equality is the only identity considered; descriptors that differ in
/// path or primary flag but share a name count as the same scene. Sets are
/// small (a handful of scenes), so the quadratic scan is fine.
pub fn compare_sets(current: &[SceneDescriptor], pending: &[SceneDescriptor]) -> SetComparison {
    let current_matches = current
        .iter()
        .map(|scene| find_index(&scene.name, pending).is_some())
        .collect();

    let pending_matches = pending
        .iter()
        .map(|scene| find_index(&scene.name, current).is_some())
        .collect();

    SetComparison {
        current_matches,
        pending_matches,
    }
}

/// Finds the position of the scene named `name`, if present.
pub fn find_index(name: &str, scenes: &[SceneDescriptor]) -> Option<usize> {
    scenes.iter().position(|scene| scene.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(name: &str) -> SceneDescriptor {
        SceneDescriptor::new(name, format!("scenes/{name}.ron"))
    }

    #[test]
    fn disjoint_sets_have_no_matches() {
        let current = vec![scene("a"), scene("b")];
        let pending = vec![scene("c"), scene("d")];

        let comparison = compare_sets(&current, &pending);
        assert_eq!(comparison.current_matches, vec![false, false]);
        assert_eq!(comparison.pending_matches, vec![false, false]);
    }

    #[test]
    fn overlapping_sets_match_by_name() {
        let current = vec![scene("a"), scene("b")];
        let pending = vec![scene("b"), scene("c")];

        let comparison = compare_sets(&current, &pending);
        assert_eq!(comparison.current_matches, vec![false, true]);
        assert_eq!(comparison.pending_matches, vec![true, false]);
    }

    #[test]
    fn name_is_the_only_identity() {
        // Same name, different path and primary flag: still a match.
        let current = vec![SceneDescriptor::new("hub", "old/hub.ron")];
        let pending = vec![SceneDescriptor::new("hub", "new/hub.ron").as_primary()];

        let comparison = compare_sets(&current, &pending);
        assert_eq!(comparison.current_matches, vec![true]);
        assert_eq!(comparison.pending_matches, vec![true]);
    }

    #[test]
    fn empty_sides_produce_empty_vectors() {
        let only = vec![scene("a")];

        let comparison = compare_sets(&[], &only);
        assert!(comparison.current_matches.is_empty());
        assert_eq!(comparison.pending_matches, vec![false]);
    }

    #[test]
    fn find_index_returns_first_position() {
        let scenes = vec![scene("a"), scene("b")];
        assert_eq!(find_index("b", &scenes), Some(1));
        assert_eq!(find_index("z", &scenes), None);
    }
}
