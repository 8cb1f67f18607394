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

//! Flags controlling how already-active scenes are treated during a set
//! transition.

use serde::{Deserialize, Serialize};

/// Retention-policy flags applied when reconciling to a new scene set.
///
/// Multiple flags can be combined using bitwise operations, though each
/// request normally carries a single meaningful combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadOptions {
    bits: u8,
}

impl LoadOptions {
    /// No special handling; matching scenes are kept as-is.
    pub const NONE: Self = Self { bits: 0 };
    /// Every scene currently in the pool is unloaded, matching or not.
    pub const CLEAR_EXISTING: Self = Self { bits: 1 << 0 };
    /// Scenes whose name matches one in the new set are unloaded and
    /// reloaded instead of kept.
    pub const RELOAD_MATCHING: Self = Self { bits: 1 << 1 };
    /// Matching scenes are preserved untouched. Reserved complement of
    /// [`Self::RELOAD_MATCHING`]; carries no force-unload behavior.
    pub const KEEP_MATCHING: Self = Self { bits: 1 << 2 };

    /// Creates a new set of load option flags from raw bits.
    pub const fn from_bits(bits: u8) -> Self {
        Self { bits }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks if these flags contain every flag in `other`.
    pub const fn contains(&self, other: Self) -> bool {
        (self.bits & other.bits) == other.bits
    }

    /// Checks if these flags are empty (no options set).
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Whether a name-matched scene must be unloaded (and reloaded) rather
    /// than kept.
    ///
    /// [`Self::CLEAR_EXISTING`] and [`Self::RELOAD_MATCHING`] are
    /// interchangeable for unload purposes: either one forces matched
    /// scenes out of the pool. This is the single derived boolean the
    /// reconciliation logic branches on.
    pub const fn forces_matched_unload(&self) -> bool {
        const FORCE_UNLOAD: LoadOptions =
            LoadOptions::CLEAR_EXISTING.union(LoadOptions::RELOAD_MATCHING);
        (self.bits & FORCE_UNLOAD.bits) != 0
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::NONE
    }
}

impl std::ops::BitOr for LoadOptions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for LoadOptions {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_options_keeps_matches() {
        assert!(!LoadOptions::NONE.forces_matched_unload());
        assert!(!LoadOptions::KEEP_MATCHING.forces_matched_unload());
    }

    #[test]
    fn clear_and_reload_both_force_unload() {
        assert!(LoadOptions::CLEAR_EXISTING.forces_matched_unload());
        assert!(LoadOptions::RELOAD_MATCHING.forces_matched_unload());
        assert!((LoadOptions::CLEAR_EXISTING | LoadOptions::RELOAD_MATCHING)
            .forces_matched_unload());
    }

    #[test]
    fn keep_matching_combined_with_force_still_forces() {
        let options = LoadOptions::KEEP_MATCHING | LoadOptions::RELOAD_MATCHING;
        assert!(options.forces_matched_unload());
    }

    #[test]
    fn union_and_contains() {
        let mut options = LoadOptions::NONE;
        assert!(options.is_empty());

        options |= LoadOptions::CLEAR_EXISTING;
        assert!(options.contains(LoadOptions::CLEAR_EXISTING));
        assert!(!options.contains(LoadOptions::RELOAD_MATCHING));

        let combined = options.union(LoadOptions::RELOAD_MATCHING);
        assert_eq!(combined.bits(), 0b11);
    }
}
