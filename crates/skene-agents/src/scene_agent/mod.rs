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

//! The agent for the scene management subsystem.
//!
//! Three layers stack here, each owning the one below it:
//! - [`SceneReconciler`] owns the active pool and transitions it to a
//!   requested set by diffing, unloading, then loading through the host.
//! - [`SceneBootstrapper`] owns a reconciler, derives the user-visible
//!   loading progress each tick, and performs the deferred activation step
//!   that releases held scenes once everything is fetched.
//! - [`SceneDirector`] owns a bootstrapper plus the configured sequence of
//!   scene sets, and handles title/next/reload flow and event publication.
//!
//! Everything advances from `update()` calls on the control thread; the
//! only asynchrony is inside the host's own load/unload operations.

pub mod bootstrapper;
pub mod director;
pub mod reconciler;

pub use bootstrapper::SceneBootstrapper;
pub use director::{SceneDirector, SceneSetEntry};
pub use reconciler::{CompletionFn, ReconcilerConfig, SceneReconciler};
