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

//! Progress tracking and deferred activation on top of the reconciler.

use super::reconciler::{CompletionFn, SceneReconciler};
use skene_core::error::SceneError;
use skene_core::stage::{LoadOptions, SceneSet};

/// Wraps a [`SceneReconciler`] with user-visible loading progress and the
/// deferred activation step.
///
/// Loads begin in the held state: the host fetches content but keeps it
/// invisible. Each tick the bootstrapper sums the fractional completion of
/// the in-flight loads and normalizes by `load_count * 0.9`, deliberately
/// reserving the last tenth of the bar for activation so it never shows
/// full before the scenes are actually switched in. The tick the value
/// reaches 1, every held load is released and the request finishes out.
pub struct SceneBootstrapper {
    reconciler: SceneReconciler,
    progress: f32,
    released: bool,
    in_flight: bool,
    completion_rx: Option<crossbeam_channel::Receiver<Result<(), SceneError>>>,
    on_complete: Option<CompletionFn>,
}

impl SceneBootstrapper {
    /// Creates a bootstrapper owning the given reconciler.
    pub fn new(reconciler: SceneReconciler) -> Self {
        Self {
            reconciler,
            progress: 0.0,
            released: false,
            in_flight: false,
            completion_rx: None,
            on_complete: None,
        }
    }

    /// Requests a transition to `set` and starts tracking its progress.
    ///
    /// Precondition failures from the reconciler (empty set, request
    /// already in flight) are returned synchronously and leave any current
    /// progress state untouched. `on_complete` fires exactly once, after
    /// activation has been released and the pool rebuilt, or with the
    /// request's failure.
    pub fn load_scene_set(
        &mut self,
        set: &SceneSet,
        options: LoadOptions,
        on_complete: CompletionFn,
    ) -> Result<(), SceneError> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        self.reconciler.reconcile(
            &set.scenes,
            options,
            Box::new(move |result| {
                let _ = tx.send(result);
            }),
        )?;

        self.progress = 0.0;
        self.released = false;
        self.in_flight = true;
        self.completion_rx = Some(rx);
        self.on_complete = Some(on_complete);

        // A request with nothing to do has already completed inside
        // reconcile(); forward that without waiting for a tick.
        self.settle();
        Ok(())
    }

    /// Advances the reconciler and the progress value by one tick.
    pub fn update(&mut self) {
        if !self.in_flight {
            return;
        }

        self.reconciler.update();
        self.settle();
        if !self.in_flight {
            return;
        }

        let ops = self.reconciler.loading_operations();
        let total: f32 = ops.iter().map(|op| op.fraction_complete()).sum();
        let mut value = total / (ops.len().max(1) as f32 * 0.9);
        // Snap near-full values so float dust from the division cannot
        // leave the bar stuck just under 1.
        if value + 0.01 > 1.0 {
            value = 1.0;
        }
        if value > self.progress {
            self.progress = value;
        }

        if self.progress >= 1.0 && !self.released && !ops.is_empty() {
            log::debug!("All loads fetched; releasing {} held scene(s)", ops.len());
            for op in &ops {
                op.allow_activation();
            }
            self.released = true;

            // Released operations finish out within this same tick.
            self.reconciler.update();
            self.settle();
        }
    }

    /// Normalized loading progress in `[0, 1]`.
    ///
    /// 0 at idle and at the start of each request; non-decreasing within a
    /// request; exactly 1 only once every load has completed and been
    /// activated.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    /// Whether a request is currently being tracked.
    pub fn is_loading(&self) -> bool {
        self.in_flight
    }

    /// Read access to the owned reconciler.
    pub fn reconciler(&self) -> &SceneReconciler {
        &self.reconciler
    }

    /// Mutable access to the owned reconciler.
    pub fn reconciler_mut(&mut self) -> &mut SceneReconciler {
        &mut self.reconciler
    }

    fn settle(&mut self) {
        let Some(rx) = &self.completion_rx else {
            return;
        };
        let Ok(result) = rx.try_recv() else {
            return;
        };

        self.in_flight = false;
        self.completion_rx = None;
        if result.is_ok() {
            self.progress = 1.0;
        }
        if let Some(on_complete) = self.on_complete.take() {
            on_complete(result);
        }
    }
}
