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

//! The capability contract between the reconciliation engine and the host
//! environment that actually loads and unloads scenes.
//!
//! The engine drives these traits from a single cooperative control thread:
//! it begins operations, then polls their handles once per scheduling tick.
//! The host side is free to back an operation with worker threads or any
//! other async machinery, which is why the handles are `Send + Sync` and
//! shared as `Arc<dyn LoadOperation>`.

use crate::error::HostError;
use crate::stage::SceneDescriptor;
use std::sync::Arc;

/// A pollable handle to one asynchronous load or unload operation.
///
/// A freshly begun load is **held**: the host fetches the content but does
/// not switch it visible until [`allow_activation`](Self::allow_activation)
/// is called. While held, [`fraction_complete`](Self::fraction_complete)
/// tops out at 0.9 and the operation cannot report completion; the reserved
/// last tenth is the activation step itself.
pub trait LoadOperation: Send + Sync {
    /// Fractional completion of the operation in `[0, 1]`.
    fn fraction_complete(&self) -> f32;

    /// Whether the operation has fully completed. A held load only completes
    /// after activation has been allowed.
    fn is_complete(&self) -> bool;

    /// The terminal failure of this operation, if it has failed. A failed
    /// operation never reports completion.
    fn failure(&self) -> Option<String>;

    /// Releases a held load so its content becomes visible and the
    /// operation can finish. No effect on unload operations.
    fn allow_activation(&self);
}

/// The environment loader capability consumed by the reconciliation engine.
///
/// Implementations bind Skene to a concrete runtime. The engine holds its
/// host as an injected `Arc<dyn SceneHost>`; there is no ambient registry to
/// look one up from.
pub trait SceneHost: Send + Sync {
    /// Starts asynchronously fetching a scene. The returned handle is in the
    /// held state (see [`LoadOperation`]).
    fn begin_load(&self, scene: &SceneDescriptor) -> Result<Arc<dyn LoadOperation>, HostError>;

    /// Starts asynchronously removing a scene.
    fn begin_unload(&self, scene: &SceneDescriptor) -> Result<Arc<dyn LoadOperation>, HostError>;

    /// Designates one active scene as the primary (foreground) scene.
    fn set_primary(&self, name: &str);

    /// The scenes the environment already has active. Used once at engine
    /// start to seed the pool, never afterwards.
    fn currently_active(&self) -> Vec<SceneDescriptor>;
}
