//! Event buffering trackers for the rabbit activity statistics engine.
//!
//! A [`Tracker`] observes one live event source, buffers events in memory
//! while enabled, and persists the buffer through a [`rabbit_store::Storer`]
//! when disabled. The [`TrackerRegistry`] holds the explicit set of trackers
//! a host toggles at session boundaries.

mod registry;
mod tracker;

pub use registry::{TrackerHandle, TrackerRegistry};
pub use tracker::{EventSource, NullSource, Tracker};
