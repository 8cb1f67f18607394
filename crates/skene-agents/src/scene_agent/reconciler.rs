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

//! The engine that transitions the active scene pool between sets.

use skene_core::error::{Phase, SceneError};
use skene_core::host::{LoadOperation, SceneHost};
use skene_core::stage::{LoadOptions, SceneDescriptor};
use skene_lanes::stage_lane::{PlanError, ReconcilePlan};
use std::sync::Arc;

/// Callback invoked exactly once when a reconciliation request finishes,
/// successfully or not.
pub type CompletionFn = Box<dyn FnOnce(Result<(), SceneError>) + Send>;

/// Construction-time options for a [`SceneReconciler`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconcilerConfig {
    /// Prevents the reconciler from seeding its pool with the scenes the
    /// host already has active. Enable this to simulate production loads
    /// from a cold start.
    pub ignore_initial_scenes: bool,
}

enum RequestPhase {
    Unloading,
    Loading,
}

struct LoadTracker {
    scene: SceneDescriptor,
    op: Arc<dyn LoadOperation>,
    primary_applied: bool,
}

/// Bookkeeping for the single request currently in flight. Created when a
/// request is accepted, dropped when its completion callback has fired.
struct PendingRequest {
    target: Vec<SceneDescriptor>,
    phase: RequestPhase,
    unload_ops: Vec<(String, Arc<dyn LoadOperation>)>,
    queued_loads: Vec<SceneDescriptor>,
    load_ops: Vec<LoadTracker>,
    on_complete: Option<CompletionFn>,
}

impl PendingRequest {
    fn first_failure(&self) -> Option<SceneError> {
        match self.phase {
            RequestPhase::Unloading => self.unload_ops.iter().find_map(|(name, op)| {
                op.failure().map(|reason| SceneError::OperationFailed {
                    scene: name.clone(),
                    phase: Phase::Unload,
                    reason,
                })
            }),
            RequestPhase::Loading => self.load_ops.iter().find_map(|tracker| {
                tracker.op.failure().map(|reason| SceneError::OperationFailed {
                    scene: tracker.scene.name.clone(),
                    phase: Phase::Load,
                    reason,
                })
            }),
        }
    }

    fn unloads_complete(&self) -> bool {
        self.unload_ops.iter().all(|(_, op)| op.is_complete())
    }

    fn loads_complete(&self) -> bool {
        self.load_ops.iter().all(|tracker| tracker.op.is_complete())
    }
}

/// Owns the active scene pool and reconciles it against requested sets.
///
/// The pool lists the scenes currently considered active, with unique
/// names. It is only mutated here, and only as a wholesale swap once a
/// request's unload and load phases have both completed; no partially
/// transitioned pool is ever observable.
///
/// One request at a time: a request arriving while another is pending is
/// rejected with [`SceneError::RequestInFlight`].
pub struct SceneReconciler {
    host: Arc<dyn SceneHost>,
    pool: Vec<SceneDescriptor>,
    pending: Option<PendingRequest>,
}

impl SceneReconciler {
    /// Creates a reconciler bound to `host`, seeding the pool with the
    /// scenes the host already has active.
    pub fn new(host: Arc<dyn SceneHost>) -> Self {
        Self::with_config(host, ReconcilerConfig::default())
    }

    /// Creates a reconciler with explicit construction options.
    pub fn with_config(host: Arc<dyn SceneHost>, config: ReconcilerConfig) -> Self {
        let pool = if config.ignore_initial_scenes {
            Vec::new()
        } else {
            host.currently_active()
        };
        if !pool.is_empty() {
            log::info!("Seeded scene pool with {} already-active scene(s)", pool.len());
        }

        Self {
            host,
            pool,
            pending: None,
        }
    }

    /// Starts transitioning the pool to `target` under `options`.
    ///
    /// Rejects empty targets and concurrent requests synchronously, before
    /// any operation is issued. Otherwise all planned unloads are begun
    /// immediately; loads follow once every unload has completed.
    /// `on_complete` fires exactly once after the pool has been rebuilt (or
    /// with the error that failed the request). A request whose plan
    /// contains no operations completes within this call.
    pub fn reconcile(
        &mut self,
        target: &[SceneDescriptor],
        options: LoadOptions,
        on_complete: CompletionFn,
    ) -> Result<(), SceneError> {
        if self.pending.is_some() {
            return Err(SceneError::RequestInFlight);
        }

        let plan = ReconcilePlan::build(&self.pool, target, options).map_err(|e| match e {
            PlanError::EmptyRequest => SceneError::EmptyRequest,
        })?;

        log::info!(
            "Reconciling to {} scene(s): {} to unload, {} to load, {} kept",
            target.len(),
            plan.unloads.len(),
            plan.loads.len(),
            plan.kept.len()
        );

        let mut unload_ops = Vec::with_capacity(plan.unloads.len());
        for scene in &plan.unloads {
            let op = self
                .host
                .begin_unload(scene)
                .map_err(|e| SceneError::OperationFailed {
                    scene: scene.name.clone(),
                    phase: Phase::Unload,
                    reason: e.to_string(),
                })?;
            unload_ops.push((scene.name.clone(), op));
        }

        self.pending = Some(PendingRequest {
            target: target.to_vec(),
            phase: RequestPhase::Unloading,
            unload_ops,
            queued_loads: plan.loads,
            load_ops: Vec::new(),
            on_complete: Some(on_complete),
        });

        // A no-op plan has nothing to wait for; settle it right away.
        self.advance();
        Ok(())
    }

    /// Advances the in-flight request by one cooperative tick.
    pub fn update(&mut self) {
        self.advance();
    }

    /// Whether a request is currently in flight.
    pub fn is_reconciling(&self) -> bool {
        self.pending.is_some()
    }

    /// The scenes currently considered active, in activation order.
    pub fn active_pool(&self) -> &[SceneDescriptor] {
        &self.pool
    }

    /// The names of the active scenes, in pool order.
    pub fn active_scene_names(&self) -> Vec<&str> {
        self.pool.iter().map(|scene| scene.name.as_str()).collect()
    }

    /// The load operations currently in flight, for progress polling.
    /// Empty while the unload phase is still running and once the request
    /// has finished.
    pub fn loading_operations(&self) -> Vec<Arc<dyn LoadOperation>> {
        match &self.pending {
            Some(pending) => pending
                .load_ops
                .iter()
                .map(|tracker| Arc::clone(&tracker.op))
                .collect(),
            None => Vec::new(),
        }
    }

    fn advance(&mut self) {
        // A failed operation in the current phase fails the whole request.
        if let Some(error) = self.pending.as_ref().and_then(PendingRequest::first_failure) {
            self.fail_request(error);
            return;
        }

        // Unload barrier: only once every unload has completed do the
        // queued loads get issued. This keeps a stale scene and its
        // namesake replacement from ever coexisting.
        let ready_to_load = matches!(
            self.pending.as_ref(),
            Some(pending)
                if matches!(pending.phase, RequestPhase::Unloading) && pending.unloads_complete()
        );
        if ready_to_load {
            if let Err(error) = self.issue_loads() {
                self.fail_request(error);
                return;
            }
        }

        let Some(pending) = self.pending.as_mut() else {
            return;
        };
        if !matches!(pending.phase, RequestPhase::Loading) {
            return;
        }

        // Primary designation happens the moment that scene's own load
        // completes, independent of the other operations.
        let mut newly_primary = Vec::new();
        for tracker in &mut pending.load_ops {
            if tracker.scene.primary && !tracker.primary_applied && tracker.op.is_complete() {
                tracker.primary_applied = true;
                newly_primary.push(tracker.scene.name.clone());
            }
        }
        for name in &newly_primary {
            log::debug!("Scene '{name}' designated primary");
            self.host.set_primary(name);
        }

        let done = match self.pending.as_ref() {
            Some(pending) => pending.loads_complete(),
            None => false,
        };
        if done {
            if let Some(mut finished) = self.pending.take() {
                // The rebuilt pool is the full requested set, kept scenes
                // included, sized by the request itself.
                self.pool = std::mem::take(&mut finished.target);
                log::info!("Scene pool rebuilt: {} active scene(s)", self.pool.len());
                if let Some(on_complete) = finished.on_complete.take() {
                    on_complete(Ok(()));
                }
            }
        }
    }

    fn issue_loads(&mut self) -> Result<(), SceneError> {
        let host = Arc::clone(&self.host);
        let Some(pending) = self.pending.as_mut() else {
            return Ok(());
        };

        let queued = std::mem::take(&mut pending.queued_loads);
        if !queued.is_empty() {
            log::debug!("Unload phase complete; issuing {} load(s)", queued.len());
        }
        for scene in queued {
            let op = host
                .begin_load(&scene)
                .map_err(|e| SceneError::OperationFailed {
                    scene: scene.name.clone(),
                    phase: Phase::Load,
                    reason: e.to_string(),
                })?;
            pending.load_ops.push(LoadTracker {
                scene,
                op,
                primary_applied: false,
            });
        }
        pending.phase = RequestPhase::Loading;
        Ok(())
    }

    fn fail_request(&mut self, error: SceneError) {
        if let Some(mut pending) = self.pending.take() {
            log::warn!("Reconciliation failed, pool left unchanged: {error}");
            if let Some(on_complete) = pending.on_complete.take() {
                on_complete(Err(error));
            }
        }
    }
}
