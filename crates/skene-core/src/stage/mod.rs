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

//! Provides the foundational types for Skene's scene identity model.
//!
//! This module defines the "common language" for all scene management
//! operations. A scene here is a named loadable unit: the engine never looks
//! inside one, it only diffs, loads, unloads and activates them by name.
//!
//! The key components are:
//! - [`SceneDescriptor`]: an immutable name + locator pair identifying one scene.
//! - [`SceneSet`]: a named, ordered group of descriptors, authored as configuration.
//! - [`LoadOptions`]: the retention-policy flags applied when transitioning sets.
//! - [`SceneSetManifest`]: the on-disk pairing of a set with its load options.

mod descriptor;
mod manifest;
mod options;
mod set;

pub use descriptor::*;
pub use manifest::*;
pub use options::*;
pub use set::*;
