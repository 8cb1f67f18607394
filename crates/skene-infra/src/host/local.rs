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

//! A deterministic, in-process scene host.
//!
//! Operations advance a fixed fraction every [`pump`](LocalSceneHost::pump)
//! call instead of running on a real loader, which makes reconciliation
//! flows fully deterministic: the test or tool interleaves `pump()` with
//! the agents' `update()` and observes every intermediate state. Load
//! operations honor the hold-at-0.9 contract from
//! [`skene_core::host::LoadOperation`].

use skene_core::error::HostError;
use skene_core::host::{LoadOperation, SceneHost};
use skene_core::stage::SceneDescriptor;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OpKind {
    Load,
    Unload,
}

#[derive(Debug)]
struct OpState {
    raw: f32,
    released: bool,
    failed: Option<String>,
    applied: bool,
}

/// One simulated asynchronous operation, advanced by its host's `pump`.
pub struct LocalOperation {
    kind: OpKind,
    scene: SceneDescriptor,
    scripted_failure: Option<String>,
    state: Mutex<OpState>,
}

impl LoadOperation for LocalOperation {
    fn fraction_complete(&self) -> f32 {
        let state = self.state.lock().unwrap();
        match self.kind {
            // A held load reports at most 0.9; the last tenth is the
            // activation step.
            OpKind::Load if !state.released => state.raw.min(0.9),
            _ => state.raw,
        }
    }

    fn is_complete(&self) -> bool {
        let state = self.state.lock().unwrap();
        state.failed.is_none()
            && state.raw >= 1.0
            && (self.kind == OpKind::Unload || state.released)
    }

    fn failure(&self) -> Option<String> {
        self.state.lock().unwrap().failed.clone()
    }

    fn allow_activation(&self) {
        if self.kind == OpKind::Unload {
            return;
        }
        let mut state = self.state.lock().unwrap();
        state.released = true;
        // Once the fetch has crossed into the reserved tenth, the switch
        // itself is immediate.
        if state.raw >= 0.9 {
            state.raw = 1.0;
        }
    }
}

/// An in-process [`SceneHost`] whose operations advance only when pumped.
pub struct LocalSceneHost {
    step: f32,
    active: Mutex<Vec<SceneDescriptor>>,
    primary: Mutex<Option<String>>,
    ops: Mutex<Vec<Arc<LocalOperation>>>,
    load_failures: Mutex<HashSet<String>>,
    unload_failures: Mutex<HashSet<String>>,
    loads_issued: AtomicUsize,
    unloads_issued: AtomicUsize,
}

impl LocalSceneHost {
    /// Creates a host with no active scenes. Every `pump` advances each
    /// in-flight operation by `step_per_pump` of its total work.
    pub fn new(step_per_pump: f32) -> Self {
        Self::with_active(step_per_pump, Vec::new())
    }

    /// Creates a host that already has `active` scenes loaded, for seeding
    /// scenarios.
    pub fn with_active(step_per_pump: f32, active: Vec<SceneDescriptor>) -> Self {
        Self {
            step: step_per_pump,
            active: Mutex::new(active),
            primary: Mutex::new(None),
            ops: Mutex::new(Vec::new()),
            load_failures: Mutex::new(HashSet::new()),
            unload_failures: Mutex::new(HashSet::new()),
            loads_issued: AtomicUsize::new(0),
            unloads_issued: AtomicUsize::new(0),
        }
    }

    /// Makes the next load of the named scene fail mid-flight.
    pub fn fail_next_load(&self, name: &str) {
        self.load_failures.lock().unwrap().insert(name.to_string());
    }

    /// Makes the next unload of the named scene fail mid-flight.
    pub fn fail_next_unload(&self, name: &str) {
        self.unload_failures.lock().unwrap().insert(name.to_string());
    }

    /// Advances every in-flight operation by one step, applying completed
    /// operations to the active scene list and dropping settled handles.
    pub fn pump(&self) {
        let ops: Vec<Arc<LocalOperation>> = self.ops.lock().unwrap().clone();
        for op in &ops {
            let mut state = op.state.lock().unwrap();
            if state.applied || state.failed.is_some() {
                continue;
            }

            if let Some(reason) = &op.scripted_failure {
                state.failed = Some(reason.clone());
                log::warn!("Operation for scene '{}' failed: {reason}", op.scene.name);
                continue;
            }

            if state.raw < 1.0 {
                state.raw = (state.raw + self.step).min(1.0);
            }

            let complete =
                state.raw >= 1.0 && (op.kind == OpKind::Unload || state.released);
            if complete {
                state.applied = true;
                drop(state);
                self.apply_effect(op);
            }
        }

        self.ops.lock().unwrap().retain(|op| {
            let state = op.state.lock().unwrap();
            !state.applied && state.failed.is_none()
        });
    }

    /// The names of the scenes the host currently has active.
    pub fn active_scene_names(&self) -> Vec<String> {
        self.active
            .lock()
            .unwrap()
            .iter()
            .map(|scene| scene.name.clone())
            .collect()
    }

    /// The currently designated primary scene, if any.
    pub fn primary_scene(&self) -> Option<String> {
        self.primary.lock().unwrap().clone()
    }

    /// Total number of load operations begun on this host.
    pub fn loads_issued(&self) -> usize {
        self.loads_issued.load(Ordering::SeqCst)
    }

    /// Total number of unload operations begun on this host.
    pub fn unloads_issued(&self) -> usize {
        self.unloads_issued.load(Ordering::SeqCst)
    }

    /// The number of operations still in flight.
    pub fn in_flight(&self) -> usize {
        self.ops.lock().unwrap().len()
    }

    fn apply_effect(&self, op: &Arc<LocalOperation>) {
        let mut active = self.active.lock().unwrap();
        match op.kind {
            OpKind::Unload => {
                active.retain(|scene| scene.name != op.scene.name);
                log::debug!("Scene '{}' unloaded", op.scene.name);
            }
            OpKind::Load => {
                if !active.iter().any(|scene| scene.name == op.scene.name) {
                    active.push(op.scene.clone());
                }
                log::debug!("Scene '{}' loaded and activated", op.scene.name);
            }
        }
    }

    fn begin(&self, kind: OpKind, scene: &SceneDescriptor) -> Arc<LocalOperation> {
        let scripted_failure = match kind {
            OpKind::Load => self.load_failures.lock().unwrap().take(scene.name.as_str()),
            OpKind::Unload => self
                .unload_failures
                .lock()
                .unwrap()
                .take(scene.name.as_str()),
        }
        .map(|name| format!("scripted failure for scene '{name}'"));

        let op = Arc::new(LocalOperation {
            kind,
            scene: scene.clone(),
            scripted_failure,
            state: Mutex::new(OpState {
                raw: 0.0,
                released: false,
                failed: None,
                applied: false,
            }),
        });
        self.ops.lock().unwrap().push(Arc::clone(&op));
        op
    }
}

impl SceneHost for LocalSceneHost {
    fn begin_load(
        &self,
        scene: &SceneDescriptor,
    ) -> Result<Arc<dyn LoadOperation>, HostError> {
        self.loads_issued.fetch_add(1, Ordering::SeqCst);
        Ok(self.begin(OpKind::Load, scene))
    }

    fn begin_unload(
        &self,
        scene: &SceneDescriptor,
    ) -> Result<Arc<dyn LoadOperation>, HostError> {
        self.unloads_issued.fetch_add(1, Ordering::SeqCst);
        Ok(self.begin(OpKind::Unload, scene))
    }

    fn set_primary(&self, name: &str) {
        log::debug!("Scene '{name}' is now primary");
        *self.primary.lock().unwrap() = Some(name.to_string());
    }

    fn currently_active(&self) -> Vec<SceneDescriptor> {
        self.active.lock().unwrap().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scene(name: &str) -> SceneDescriptor {
        SceneDescriptor::new(name, format!("scenes/{name}.ron"))
    }

    #[test]
    fn load_advances_per_pump_and_holds_at_ninety_percent() {
        let host = LocalSceneHost::new(0.5);
        let op = host.begin_load(&scene("hub")).expect("begin");

        assert_relative_eq!(op.fraction_complete(), 0.0);
        host.pump();
        assert_relative_eq!(op.fraction_complete(), 0.5);
        host.pump();
        // Fetch is done, but the held operation reports the 0.9 cap and
        // is not complete.
        assert_relative_eq!(op.fraction_complete(), 0.9);
        assert!(!op.is_complete());
    }

    #[test]
    fn released_load_completes_and_activates() {
        let host = LocalSceneHost::new(1.0);
        let op = host.begin_load(&scene("hub")).expect("begin");
        host.pump();

        op.allow_activation();
        assert!(op.is_complete());
        assert_relative_eq!(op.fraction_complete(), 1.0);

        // The next pump applies the activation to the host's scene list.
        host.pump();
        assert_eq!(host.active_scene_names(), vec!["hub".to_string()]);
        assert_eq!(host.in_flight(), 0);
    }

    #[test]
    fn unload_needs_no_activation() {
        let host = LocalSceneHost::with_active(1.0, vec![scene("hub")]);
        let op = host.begin_unload(&scene("hub")).expect("begin");

        host.pump();
        assert!(op.is_complete());
        assert!(host.active_scene_names().is_empty());
    }

    #[test]
    fn scripted_failure_is_terminal() {
        let host = LocalSceneHost::new(1.0);
        host.fail_next_load("hub");
        let op = host.begin_load(&scene("hub")).expect("begin");

        host.pump();
        assert!(op.failure().is_some());
        assert!(!op.is_complete());

        // Only the next load was scripted to fail.
        let retry = host.begin_load(&scene("hub")).expect("begin");
        host.pump();
        assert!(retry.failure().is_none());
    }

    #[test]
    fn set_primary_tracks_latest_designation() {
        let host = LocalSceneHost::new(1.0);
        host.set_primary("hub");
        host.set_primary("arena");
        assert_eq!(host.primary_scene(), Some("arena".to_string()));
    }
}
