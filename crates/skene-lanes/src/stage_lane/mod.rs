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

//! The lane turning "where we are" and "where we want to be" into work.
//!
//! [`compare_sets`] computes the two name-match vectors between the active
//! pool and a requested set; [`ReconcilePlan`] applies the retention policy
//! on top of them to produce the unload, load, and keep lists the engine
//! executes. Both are pure and synchronous, which is what makes the policy
//! logic testable without any async timing.

mod compare;
mod plan;

pub use compare::*;
pub use plan::*;
