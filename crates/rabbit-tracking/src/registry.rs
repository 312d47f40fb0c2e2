//! The static tracker registry.
//!
//! Trackers are registered explicitly at startup instead of being
//! discovered dynamically; the set of event kinds is known at compile
//! time. The registry erases the per-kind tracker types so a host can
//! toggle the whole set at session boundaries.

use std::sync::Arc;

use rabbit_core::TrackedEvent;

use crate::tracker::{EventSource, Tracker};

/// A type-erased handle to one tracker.
pub trait TrackerHandle: Send + Sync {
    /// The tracker's display name.
    fn name(&self) -> &'static str;

    /// Whether the tracker is currently enabled.
    fn is_enabled(&self) -> bool;

    /// Transitions the tracker between enabled and disabled.
    fn set_enabled(&self, enabled: bool);
}

impl<E, S> TrackerHandle for Tracker<E, S>
where
    E: TrackedEvent,
    S: EventSource,
{
    fn name(&self) -> &'static str {
        self.name()
    }

    fn is_enabled(&self) -> bool {
        self.is_enabled()
    }

    fn set_enabled(&self, enabled: bool) {
        self.set_enabled(enabled);
    }
}

/// The explicit set of trackers active in this process.
#[derive(Default)]
pub struct TrackerRegistry {
    trackers: Vec<Arc<dyn TrackerHandle>>,
}

impl TrackerRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            trackers: Vec::new(),
        }
    }

    /// Adds a tracker to the set.
    pub fn register(&mut self, tracker: Arc<dyn TrackerHandle>) {
        tracing::debug!(tracker = tracker.name(), "registered tracker");
        self.trackers.push(tracker);
    }

    /// The registered trackers.
    #[must_use]
    pub fn trackers(&self) -> &[Arc<dyn TrackerHandle>] {
        &self.trackers
    }

    /// Enables every registered tracker.
    pub fn enable_all(&self) {
        for tracker in &self.trackers {
            tracker.set_enabled(true);
        }
    }

    /// Disables every registered tracker, persisting their buffers.
    pub fn disable_all(&self) {
        for tracker in &self.trackers {
            tracker.set_enabled(false);
        }
    }
}
