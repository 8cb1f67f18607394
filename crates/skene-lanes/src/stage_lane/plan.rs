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

use super::compare_sets;
use skene_core::stage::{LoadOptions, SceneDescriptor};
use thiserror::Error;

/// An error produced while building a [`ReconcilePlan`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// The requested target set contained zero scenes.
    #[error("cannot reconcile to an empty scene set")]
    EmptyRequest,
}

/// The work needed to transition the active pool to a requested set.
///
/// Order within each list follows the order of the inputs. The plan never
/// contains duplicate work: a scene is either unloaded, loaded, or kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Active scenes to unload, in pool order.
    pub unloads: Vec<SceneDescriptor>,
    /// Requested scenes to load, in request order.
    pub loads: Vec<SceneDescriptor>,
    /// Requested scenes kept from the pool without any operation.
    pub kept: Vec<SceneDescriptor>,
}

impl ReconcilePlan {
    /// Diffs `pool` against `target` under the given options.
    ///
    /// An active scene is unloaded when it has no name match in the target,
    /// or when the options force matched scenes out. A target scene is
    /// loaded when it has no name match in the pool, or under the same
    /// force. Everything else is kept untouched.
    pub fn build(
        pool: &[SceneDescriptor],
        target: &[SceneDescriptor],
        options: LoadOptions,
    ) -> Result<Self, PlanError> {
        if target.is_empty() {
            return Err(PlanError::EmptyRequest);
        }

        let comparison = compare_sets(pool, target);
        let force_matched_unload = options.forces_matched_unload();

        let unloads: Vec<SceneDescriptor> = pool
            .iter()
            .zip(&comparison.current_matches)
            .filter(|(_, matched)| !**matched || force_matched_unload)
            .map(|(scene, _)| scene.clone())
            .collect();

        let mut loads = Vec::new();
        let mut kept = Vec::new();
        for (scene, matched) in target.iter().zip(&comparison.pending_matches) {
            if !*matched || force_matched_unload {
                loads.push(scene.clone());
            } else {
                kept.push(scene.clone());
            }
        }

        log::debug!(
            "Reconcile plan: {} unloads, {} loads, {} kept",
            unloads.len(),
            loads.len(),
            kept.len()
        );

        Ok(Self {
            unloads,
            loads,
            kept,
        })
    }

    /// `true` when the plan contains no operations at all.
    pub fn is_noop(&self) -> bool {
        self.unloads.is_empty() && self.loads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene(name: &str) -> SceneDescriptor {
        SceneDescriptor::new(name, format!("scenes/{name}.ron"))
    }

    fn names(scenes: &[SceneDescriptor]) -> Vec<&str> {
        scenes.iter().map(|s| s.name.as_str()).collect()
    }

    #[test]
    fn empty_target_is_rejected() {
        let pool = vec![scene("a")];
        let result = ReconcilePlan::build(&pool, &[], LoadOptions::NONE);
        assert_eq!(result, Err(PlanError::EmptyRequest));
    }

    #[test]
    fn identical_sets_plan_nothing() {
        let pool = vec![scene("a"), scene("b")];
        let target = pool.clone();

        let plan = ReconcilePlan::build(&pool, &target, LoadOptions::NONE).expect("plan");
        assert!(plan.is_noop());
        assert_eq!(names(&plan.kept), vec!["a", "b"]);
    }

    #[test]
    fn disjoint_sets_swap_everything() {
        let pool = vec![scene("a"), scene("b")];
        let target = vec![scene("c"), scene("d")];

        let plan = ReconcilePlan::build(&pool, &target, LoadOptions::NONE).expect("plan");
        assert_eq!(names(&plan.unloads), vec!["a", "b"]);
        assert_eq!(names(&plan.loads), vec!["c", "d"]);
        assert!(plan.kept.is_empty());
    }

    #[test]
    fn matched_scene_is_kept_without_force() {
        let pool = vec![scene("a"), scene("b")];
        let target = vec![scene("b"), scene("c")];

        let plan = ReconcilePlan::build(&pool, &target, LoadOptions::NONE).expect("plan");
        assert_eq!(names(&plan.unloads), vec!["a"]);
        assert_eq!(names(&plan.loads), vec!["c"]);
        assert_eq!(names(&plan.kept), vec!["b"]);
    }

    #[test]
    fn reload_matching_forces_matched_scenes_through() {
        let pool = vec![scene("a"), scene("b")];
        let target = vec![scene("b"), scene("c")];

        let plan =
            ReconcilePlan::build(&pool, &target, LoadOptions::RELOAD_MATCHING).expect("plan");
        assert_eq!(names(&plan.unloads), vec!["a", "b"]);
        assert_eq!(names(&plan.loads), vec!["b", "c"]);
        assert!(plan.kept.is_empty());
    }

    #[test]
    fn clear_existing_unloads_the_whole_pool() {
        let pool = vec![scene("a"), scene("b")];
        let target = vec![scene("b")];

        let plan = ReconcilePlan::build(&pool, &target, LoadOptions::CLEAR_EXISTING).expect("plan");
        assert_eq!(names(&plan.unloads), vec!["a", "b"]);
        assert_eq!(names(&plan.loads), vec!["b"]);
    }

    #[test]
    fn keep_matching_behaves_like_no_options() {
        let pool = vec![scene("a"), scene("b")];
        let target = vec![scene("b"), scene("c")];

        let keep = ReconcilePlan::build(&pool, &target, LoadOptions::KEEP_MATCHING).expect("plan");
        let none = ReconcilePlan::build(&pool, &target, LoadOptions::NONE).expect("plan");
        assert_eq!(keep, none);
    }

    #[test]
    fn empty_pool_loads_the_full_target() {
        let target = vec![scene("a"), scene("b")];

        let plan = ReconcilePlan::build(&[], &target, LoadOptions::NONE).expect("plan");
        assert!(plan.unloads.is_empty());
        assert_eq!(names(&plan.loads), vec!["a", "b"]);
    }
}
