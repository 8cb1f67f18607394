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

//! Provides foundational primitives for event-driven communication.
//!
//! Two layers live here:
//! - [`EventBus`], a generic thread-safe channel any producer can publish
//!   into while the owner drains it from the control thread;
//! - [`EventDispatcher`], which fans drained events out to registered
//!   [`EventListener`]s. Listeners declare the event kinds they handle
//!   through an explicit table built by [`EventDispatcher::register`] calls
//!   at startup; there is no runtime type scanning.

mod bus;
mod dispatcher;

pub use self::bus::EventBus;
pub use self::dispatcher::{EventDispatcher, EventKind, EventListener, StageEvent};
