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

//! # Skene Infra
//!
//! Concrete implementations of the external capabilities the agents
//! consume. Ships the in-process [`host::LocalSceneHost`] used by tests,
//! tools, and headless runs; bindings to real runtimes implement the same
//! `skene-core` traits outside this repository.

pub mod host;
pub mod logging;
