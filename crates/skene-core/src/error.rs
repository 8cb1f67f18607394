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

//! Defines the hierarchy of error types for the scene management subsystem.

use std::fmt;

/// The phase of a reconciliation request an operation belongs to.
///
/// Unloads always run to completion before the first load is issued, so a
/// failure report carries the phase to make clear how far a request got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Removal of a scene from the host environment.
    Unload,
    /// Fetching of a scene into the host environment.
    Load,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Unload => write!(f, "unload"),
            Phase::Load => write!(f, "load"),
        }
    }
}

/// An error reported by the host environment when starting an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host has no scene registered under the requested name.
    UnknownScene {
        /// The name that could not be resolved.
        name: String,
    },
    /// The host backend rejected the operation.
    Backend {
        /// Detailed error message from the backend.
        details: String,
    },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::UnknownScene { name } => {
                write!(f, "Host has no scene named '{name}'")
            }
            HostError::Backend { details } => {
                write!(f, "Host backend error: {details}")
            }
        }
    }
}

impl std::error::Error for HostError {}

/// An error related to a scene-set reconciliation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The requested target set contained zero scenes. A reconciliation must
    /// always move to some non-empty state.
    EmptyRequest,
    /// A request arrived while another one was still pending. The engine
    /// handles exactly one request at a time and rejects the newcomer.
    RequestInFlight,
    /// The requested set is not registered with the director driving the
    /// request.
    UnknownSet {
        /// The name of the set that was requested.
        name: String,
    },
    /// An underlying load or unload operation failed mid-flight. The whole
    /// request is failed and the active pool is left unchanged.
    OperationFailed {
        /// The scene whose operation failed.
        scene: String,
        /// The phase the failed operation belonged to.
        phase: Phase,
        /// Failure detail reported by the host.
        reason: String,
    },
}

impl fmt::Display for SceneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneError::EmptyRequest => {
                write!(f, "Cannot reconcile to an empty scene set")
            }
            SceneError::RequestInFlight => {
                write!(f, "A reconciliation request is already in flight")
            }
            SceneError::UnknownSet { name } => {
                write!(f, "Scene set '{name}' is not registered with the director")
            }
            SceneError::OperationFailed {
                scene,
                phase,
                reason,
            } => {
                write!(f, "Failed to {phase} scene '{scene}': {reason}")
            }
        }
    }
}

impl std::error::Error for SceneError {}
