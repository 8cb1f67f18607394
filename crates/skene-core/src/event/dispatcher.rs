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

use super::EventBus;

/// The kinds of scene-management events, used by listeners to declare what
/// they handle without inspecting event payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A scene set transition has been requested.
    SetRequested,
    /// A scene set has finished loading and is active.
    SetLoaded,
}

/// Notifications published by the scene-management layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageEvent {
    /// A transition to the named set has started.
    SetRequested {
        /// Name of the requested set.
        set_name: String,
    },
    /// The named set is fully loaded and activated.
    SetLoaded {
        /// Name of the loaded set.
        set_name: String,
    },
}

impl StageEvent {
    /// The kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            StageEvent::SetRequested { .. } => EventKind::SetRequested,
            StageEvent::SetLoaded { .. } => EventKind::SetLoaded,
        }
    }
}

/// A receiver of [`StageEvent`]s.
///
/// A listener states the kinds it is interested in via
/// [`handles`](Self::handles); the dispatcher consults that before every
/// [`invoke`](Self::invoke). Registration is explicit, at startup, through
/// [`EventDispatcher::register`].
pub trait EventListener: Send {
    /// Whether this listener wants events of the given kind.
    fn handles(&self, kind: EventKind) -> bool;

    /// Delivers one event. Only called with kinds the listener handles.
    fn invoke(&mut self, event: &StageEvent);
}

/// Routes events to registered listeners through an explicit table.
#[derive(Default)]
pub struct EventDispatcher {
    listeners: Vec<Box<dyn EventListener>>,
}

impl EventDispatcher {
    /// Creates a dispatcher with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Adds a listener to the registration table.
    pub fn register(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    /// The number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Delivers one event to every listener that handles its kind.
    pub fn dispatch(&mut self, event: &StageEvent) {
        let kind = event.kind();
        for listener in &mut self.listeners {
            if listener.handles(kind) {
                listener.invoke(event);
            }
        }
    }

    /// Drains every pending event from `bus` and dispatches each in order.
    /// Returns the number of events delivered.
    pub fn pump(&mut self, bus: &EventBus<StageEvent>) -> usize {
        let mut delivered = 0;
        while let Some(event) = bus.try_next() {
            self.dispatch(&event);
            delivered += 1;
        }
        delivered
    }
}
