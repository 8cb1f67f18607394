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

//! # Skene Agents
//!
//! The stateful side of scene management. Agents own the mutable state
//! (active pool, in-flight requests, sequencing position), drive the pure
//! lanes from `skene-lanes`, and talk to the host environment through the
//! `skene-core` capability traits. All agent logic runs on a single
//! cooperative control thread, advanced once per scheduling tick.

pub mod scene_agent;
