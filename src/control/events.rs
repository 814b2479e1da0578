//! Lifecycle events and a small first-class observer bus.
//!
//! Delivery is synchronous and in emission order; listeners are plain
//! closures registered with the owning controller.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::foundation::core::Direction;

/// What happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Assets resolved and the compositor was built.
    Created,
    /// Progress was rewound to the direction's start value.
    Started,
    /// Playback resumed.
    Played,
    /// Playback froze.
    Paused,
    /// Progress was forced to the direction's rest value.
    Stopped,
    /// Progress reached the boundary the direction was heading toward.
    Completed,
    /// Derived parameters were recomputed.
    Changed,
    /// Texture or mask failed to load; the instance is permanently inert.
    LoadFailed,
}

/// Immutable snapshot passed to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AnimationEvent {
    /// Event kind.
    pub kind: EventKind,
    /// Wall-clock milliseconds since the Unix epoch at emission time.
    pub timestamp_ms: u64,
    /// Direction at emission time.
    pub direction: Direction,
    /// Progress at emission time.
    pub progress: f64,
    /// Whether the timeline was complete at emission time.
    pub is_complete: bool,
}

impl AnimationEvent {
    pub(crate) fn now(kind: EventKind, direction: Direction, progress: f64, is_complete: bool) -> Self {
        let timestamp_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        Self {
            kind,
            timestamp_ms,
            direction,
            progress,
            is_complete,
        }
    }
}

/// Handle for removing a registered listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&AnimationEvent)>;

/// Listener registry embedded by composition in the controller.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl EventBus {
    /// Register a listener; it receives every subsequent event in emission
    /// order.
    pub fn subscribe(&mut self, listener: impl FnMut(&AnimationEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if the id was already gone.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub(crate) fn dispatch(&mut self, event: &AnimationEvent) {
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/events.rs"]
mod tests;
