//! The live buffering component for one event kind.

use std::sync::{Mutex, PoisonError};

use rabbit_core::TrackedEvent;
use rabbit_store::Storer;

/// A live source of events that can be switched on and off.
///
/// In the hosted setting this is the seam to whatever delivers activity
/// signals (editor hooks, shell hooks). `subscribe` starts delivery to the
/// tracker's [`record`](Tracker::record) entry point and `unsubscribe`
/// stops it; both are called with the tracker's state lock held, so a
/// source must not call back into the tracker from them.
pub trait EventSource: Send {
    /// Begin delivering events.
    fn subscribe(&mut self);

    /// Stop delivering events.
    fn unsubscribe(&mut self);
}

/// A source for trackers whose events are pushed in externally.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSource;

impl EventSource for NullSource {
    fn subscribe(&mut self) {}
    fn unsubscribe(&mut self) {}
}

#[derive(Debug)]
struct Inner<E: TrackedEvent, S> {
    enabled: bool,
    buffer: Vec<E>,
    storer: Storer<E::Record>,
    source: S,
}

/// Buffers events of one kind while enabled and persists them on disable.
///
/// A tracker starts disabled. Enabling subscribes to the event source and
/// clears any stale buffer; disabling unsubscribes and persists the buffer
/// through the storer. Calling [`set_enabled`](Self::set_enabled) with the
/// current state is a no-op.
///
/// All state lives behind one mutex, so concurrent enable/disable calls
/// settle into a consistent terminal state with subscribe/unsubscribe fired
/// exactly once per transition.
///
/// # Buffer lifetime
///
/// Saving clears the buffer immediately. Events recorded between flushes
/// live only in memory, so an ungraceful termination loses them; this is
/// accepted dropped-update behavior, not a failure state. Persistence
/// failures are logged and otherwise swallowed — the tracker still ends up
/// disabled.
#[derive(Debug)]
pub struct Tracker<E: TrackedEvent, S: EventSource> {
    name: &'static str,
    inner: Mutex<Inner<E, S>>,
}

impl<E: TrackedEvent, S: EventSource> Tracker<E, S> {
    /// Creates a disabled tracker persisting through the given storer.
    pub const fn new(name: &'static str, source: S, storer: Storer<E::Record>) -> Self {
        Self {
            name,
            inner: Mutex::new(Inner {
                enabled: false,
                buffer: Vec::new(),
                storer,
                source,
            }),
        }
    }

    /// The tracker's display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether the tracker is currently observing its source.
    pub fn is_enabled(&self) -> bool {
        self.lock_inner().enabled
    }

    /// Transitions the tracker between enabled and disabled.
    ///
    /// Enabling clears any stale buffer and subscribes; disabling
    /// unsubscribes and persists the buffer. Same-state calls do nothing.
    pub fn set_enabled(&self, enabled: bool) {
        let mut inner = self.lock_inner();
        if inner.enabled == enabled {
            return;
        }
        if enabled {
            inner.buffer.clear();
            inner.source.subscribe();
            tracing::debug!(tracker = self.name, "tracker enabled");
        } else {
            inner.source.unsubscribe();
            self.save_locked(&mut inner);
            tracing::debug!(tracker = self.name, "tracker disabled");
        }
        inner.enabled = enabled;
    }

    /// Buffers one observed event. Events arriving while the tracker is
    /// disabled are dropped, mirroring an unsubscribed source.
    pub fn record(&self, event: E) {
        let mut inner = self.lock_inner();
        if inner.enabled {
            inner.buffer.push(event);
        }
    }

    /// A snapshot of the currently buffered events.
    pub fn data(&self) -> Vec<E> {
        self.lock_inner().buffer.clone()
    }

    /// Discards the buffered events without persisting them.
    pub fn flush_data(&self) {
        self.lock_inner().buffer.clear();
    }

    /// Persists the buffered events now, clearing the buffer.
    pub fn save_data(&self) {
        let mut inner = self.lock_inner();
        self.save_locked(&mut inner);
    }

    fn save_locked(&self, inner: &mut Inner<E, S>) {
        if inner.buffer.is_empty() {
            return;
        }
        let events = std::mem::take(&mut inner.buffer);
        inner.storer.insert(events);
        match inner.storer.commit() {
            Ok(days) => {
                tracing::debug!(tracker = self.name, days, "persisted buffered events");
            }
            Err(err) => {
                tracing::warn!(tracker = self.name, error = %err, "failed to persist buffered events");
            }
        }
    }

    fn lock_inner(&self) -> std::sync::MutexGuard<'_, Inner<E, S>> {
        // A poisoned lock only means another thread panicked mid-update;
        // the buffered telemetry is still worth keeping.
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    use chrono::{DateTime, TimeZone, Utc};
    use rabbit_core::{FileEvent, FileId, FileRecord};
    use rabbit_store::DataStore;
    use tempfile::TempDir;

    use super::*;

    #[derive(Debug, Default)]
    struct CountingSource {
        subscribes: Arc<AtomicUsize>,
        unsubscribes: Arc<AtomicUsize>,
    }

    impl EventSource for CountingSource {
        fn subscribe(&mut self) {
            self.subscribes.fetch_add(1, Ordering::SeqCst);
        }

        fn unsubscribe(&mut self) {
            self.unsubscribes.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    fn file_event(id: &str, ms: u64) -> FileEvent {
        FileEvent {
            timestamp: noon(),
            duration_ms: ms,
            file_id: FileId::new(id).unwrap(),
        }
    }

    fn tracker_in(
        dir: &TempDir,
    ) -> (
        Tracker<FileEvent, CountingSource>,
        Arc<AtomicUsize>,
        Arc<AtomicUsize>,
    ) {
        let source = CountingSource::default();
        let subscribes = Arc::clone(&source.subscribes);
        let unsubscribes = Arc::clone(&source.unsubscribes);
        let storer = Storer::new(DataStore::<FileRecord>::new(dir.path()));
        (Tracker::new("files", source, storer), subscribes, unsubscribes)
    }

    fn stored_day(dir: &TempDir) -> Vec<FileRecord> {
        DataStore::<FileRecord>::new(dir.path())
            .read_day(noon().date_naive())
            .records()
            .to_vec()
    }

    #[test]
    fn starts_disabled_with_empty_buffer() {
        let dir = TempDir::new().unwrap();
        let (tracker, _, _) = tracker_in(&dir);
        assert!(!tracker.is_enabled());
        assert!(tracker.data().is_empty());
    }

    #[test]
    fn enabling_twice_subscribes_once_and_keeps_buffer() {
        let dir = TempDir::new().unwrap();
        let (tracker, subscribes, _) = tracker_in(&dir);

        tracker.set_enabled(true);
        tracker.record(file_event("abc", 10));
        tracker.set_enabled(true);

        assert_eq!(subscribes.load(Ordering::SeqCst), 1);
        assert_eq!(tracker.data().len(), 1);
    }

    #[test]
    fn disabling_when_disabled_is_a_no_op() {
        let dir = TempDir::new().unwrap();
        let (tracker, _, unsubscribes) = tracker_in(&dir);

        tracker.set_enabled(false);
        assert_eq!(unsubscribes.load(Ordering::SeqCst), 0);
        assert!(stored_day(&dir).is_empty());
    }

    #[test]
    fn events_recorded_while_disabled_are_dropped() {
        let dir = TempDir::new().unwrap();
        let (tracker, _, _) = tracker_in(&dir);

        tracker.record(file_event("abc", 10));
        assert!(tracker.data().is_empty());
    }

    #[test]
    fn disabling_persists_and_clears_the_buffer() {
        let dir = TempDir::new().unwrap();
        let (tracker, _, unsubscribes) = tracker_in(&dir);

        tracker.set_enabled(true);
        tracker.record(file_event("abc", 10));
        tracker.record(file_event("abc", 20));
        tracker.set_enabled(false);

        assert_eq!(unsubscribes.load(Ordering::SeqCst), 1);
        assert!(tracker.data().is_empty());

        let records = stored_day(&dir);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].duration_ms, 30);
    }

    #[test]
    fn save_data_persists_without_disabling() {
        let dir = TempDir::new().unwrap();
        let (tracker, _, _) = tracker_in(&dir);

        tracker.set_enabled(true);
        tracker.record(file_event("abc", 10));
        tracker.save_data();

        assert!(tracker.is_enabled());
        assert!(tracker.data().is_empty());
        assert_eq!(stored_day(&dir).len(), 1);
    }

    #[test]
    fn flush_data_discards_without_persisting() {
        let dir = TempDir::new().unwrap();
        let (tracker, _, _) = tracker_in(&dir);

        tracker.set_enabled(true);
        tracker.record(file_event("abc", 10));
        tracker.flush_data();
        tracker.set_enabled(false);

        assert!(stored_day(&dir).is_empty());
    }

    #[test]
    fn persistence_failure_still_disables_the_tracker() {
        let dir = TempDir::new().unwrap();
        let (tracker, _, _) = tracker_in(&dir);

        tracker.set_enabled(true);
        tracker.record(file_event("abc", 10));

        // Make the kind directory unwritable by occupying its path.
        std::fs::write(dir.path().join("files"), "not a directory").unwrap();

        tracker.set_enabled(false);
        assert!(!tracker.is_enabled());
        assert!(tracker.data().is_empty());
    }

    #[test]
    fn tracker_state_is_debug_printable() {
        let dir = TempDir::new().unwrap();
        let (tracker, _, _) = tracker_in(&dir);

        let rendered = format!("{tracker:?}");
        assert!(rendered.contains("enabled: false"), "got: {rendered}");
    }

    #[test]
    fn handles_starting_concurrently() {
        let dir = TempDir::new().unwrap();
        let (tracker, subscribes, _) = tracker_in(&dir);
        let tracker = Arc::new(tracker);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || tracker.set_enabled(true))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(tracker.is_enabled());
        assert_eq!(subscribes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn handles_stopping_concurrently() {
        let dir = TempDir::new().unwrap();
        let (tracker, _, unsubscribes) = tracker_in(&dir);
        let tracker = Arc::new(tracker);

        tracker.set_enabled(true);
        tracker.record(file_event("abc", 10));
        tracker.record(file_event("abc", 20));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let tracker = Arc::clone(&tracker);
                thread::spawn(move || tracker.set_enabled(false))
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert!(!tracker.is_enabled());
        assert_eq!(unsubscribes.load(Ordering::SeqCst), 1);

        // Persisted exactly once: no double-counted durations.
        let records = stored_day(&dir);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].duration_ms, 30);
    }
}
