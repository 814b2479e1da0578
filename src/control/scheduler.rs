//! Frame scheduler: one object owning every live instance, ticking them in
//! registration order with a measured wall-clock delta.
//!
//! This replaces the process-wide registry of the original design with
//! explicit ownership: instances are registered and unregistered, so nothing
//! leaks past its useful life.

use std::time::Instant;

use crate::control::controller::Aquarelle;
use crate::foundation::error::AquarelleResult;

/// Handle identifying a registered instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct InstanceId(u64);

struct Entry {
    id: InstanceId,
    instance: Aquarelle,
}

/// Owns and drives the live instances.
///
/// Single-threaded cooperative model: all mutation happens inside
/// [`Scheduler::tick`] or through [`Scheduler::get_mut`] between ticks.
#[derive(Default)]
pub struct Scheduler {
    entries: Vec<Entry>,
    next_id: u64,
    last_tick: Option<Instant>,
}

impl Scheduler {
    /// An empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `instance`; it will be advanced on every tick until
    /// unregistered.
    pub fn register(&mut self, instance: Aquarelle) -> InstanceId {
        let id = InstanceId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry { id, instance });
        id
    }

    /// Remove an instance, returning it to the caller.
    pub fn unregister(&mut self, id: InstanceId) -> Option<Aquarelle> {
        let idx = self.entries.iter().position(|e| e.id == id)?;
        Some(self.entries.remove(idx).instance)
    }

    /// Borrow a registered instance.
    pub fn get(&self, id: InstanceId) -> Option<&Aquarelle> {
        self.entries
            .iter()
            .find(|e| e.id == id)
            .map(|e| &e.instance)
    }

    /// Mutably borrow a registered instance, e.g. to issue play/pause calls
    /// between ticks.
    pub fn get_mut(&mut self, id: InstanceId) -> Option<&mut Aquarelle> {
        self.entries
            .iter_mut()
            .find(|e| e.id == id)
            .map(|e| &mut e.instance)
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no instance is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Advance every instance by the wall-clock time elapsed since the last
    /// tick. The first tick observes a zero delta.
    pub fn tick(&mut self) {
        let now = Instant::now();
        let delta_seconds = self
            .last_tick
            .map(|last| now.duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        self.last_tick = Some(now);
        self.tick_with_delta(delta_seconds);
    }

    /// Advance every instance by an explicit delta, in registration order.
    ///
    /// One instance failing never aborts the loop for the others; the failure
    /// is logged and that instance is left in its failed state.
    #[tracing::instrument(skip(self), fields(instances = self.entries.len()))]
    pub fn tick_with_delta(&mut self, delta_seconds: f64) {
        for entry in &mut self.entries {
            if let Err(err) = entry.instance.render(delta_seconds) {
                tracing::warn!(id = ?entry.id, error = %err, "instance render failed");
            }
        }
    }

    /// Tick every instance once and surface the first error, for callers that
    /// want failures reported instead of logged.
    pub fn try_tick_with_delta(&mut self, delta_seconds: f64) -> AquarelleResult<()> {
        let mut first_err = None;
        for entry in &mut self.entries {
            if let Err(err) = entry.instance.render(delta_seconds)
                && first_err.is_none()
            {
                first_err = Some(err);
            }
        }
        match first_err {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/control/scheduler.rs"]
mod tests;
