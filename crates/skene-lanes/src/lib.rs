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

//! # Skene Lanes
//!
//! Hot-path, stateless logic lanes. Everything here is pure computation over
//! scene descriptors: no I/O, no host calls, no mutable pools. The agents
//! crate drives these lanes and owns the state they operate on.

#![warn(missing_docs)]

pub mod stage_lane;
