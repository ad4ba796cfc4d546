//! Dirty tracking for a live editing session.
//!
//! The tracker listens to state-change notifications, waits for a quiet
//! period, then rebuilds the change report and publishes whether the
//! dashboard is dirty. Reads of [`ChangeTracker::is_dirty`] reflect the last
//! completed computation only; call [`ChangeTracker::flush`] for a fresh
//! answer.

use std::panic;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::TrackerConfig;
use crate::error::TrackerError;
use crate::report::{build_change_report_from_live_session, ChangeReport};
use crate::source::{SaveModelSource, StateChange};

/// Debounced change tracker. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ChangeTracker {
    shared: Arc<Shared>,
}

struct Shared {
    source: Arc<dyn SaveModelSource>,
    config: TrackerConfig,
    state: Mutex<TrackerState>,
    dirty: watch::Sender<bool>,
}

#[derive(Default)]
struct TrackerState {
    tracking: bool,
    pending: Option<JoinHandle<()>>,
    last_report: Option<ChangeReport>,
    /// Bumped whenever scheduled work is superseded; a recomputation only
    /// stores its result if the generation it started under is still current.
    generation: u64,
}

impl TrackerState {
    fn cancel_pending(&mut self) -> u64 {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
        self.generation += 1;
        self.generation
    }
}

impl ChangeTracker {
    /// Create a tracker. It ignores notifications until
    /// [`start_tracking`](Self::start_tracking) is called.
    pub fn new(source: Arc<dyn SaveModelSource>, config: TrackerConfig) -> Self {
        let (dirty, _) = watch::channel(false);
        Self {
            shared: Arc::new(Shared {
                source,
                config,
                state: Mutex::new(TrackerState::default()),
                dirty,
            }),
        }
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.shared.config
    }

    pub fn start_tracking(&self) {
        self.shared.lock().tracking = true;
        tracing::debug!("change tracking started");
    }

    /// Stop reacting to notifications and drop any scheduled recomputation.
    /// The last report and dirty flag are kept.
    pub fn stop_tracking(&self) {
        let mut state = self.shared.lock();
        state.tracking = false;
        state.cancel_pending();
        tracing::debug!("change tracking stopped");
    }

    pub fn is_tracking(&self) -> bool {
        self.shared.lock().tracking
    }

    /// Feed a state-change notification from the live object graph.
    ///
    /// Qualifying changes (re)start the debounce window. The debounce needs a
    /// tokio runtime with its time driver enabled; outside a runtime, or on
    /// one built without `enable_time`, the report is rebuilt immediately
    /// instead.
    pub fn on_state_change(&self, change: &StateChange) {
        if !self.shared.config.qualifies(change) {
            tracing::trace!(object = %change.object, keys = ?change.keys, "ignoring state change");
            return;
        }
        let mut state = self.shared.lock();
        if !state.tracking {
            return;
        }
        let generation = state.cancel_pending();

        let Ok(handle) = Handle::try_current() else {
            drop(state);
            tracing::debug!(object = %change.object, "no runtime for debounce, recomputing now");
            self.shared.recompute_logged(generation);
            return;
        };

        // Creating the timer panics when the runtime has no time driver.
        let delay = self.shared.config.debounce();
        let Ok(timer) = panic::catch_unwind(|| tokio::time::sleep(delay)) else {
            drop(state);
            tracing::warn!(object = %change.object, "runtime has timers disabled, recomputing now");
            self.shared.recompute_logged(generation);
            return;
        };

        let shared = Arc::clone(&self.shared);
        tracing::debug!(object = %change.object, delay_ms = self.shared.config.debounce_ms, "scheduling change report");
        state.pending = Some(handle.spawn(async move {
            timer.await;
            shared.recompute_logged(generation);
        }));
    }

    /// Cancel any pending recomputation and rebuild the report now.
    pub fn flush(&self) -> Result<ChangeReport, TrackerError> {
        let generation = self.shared.lock().cancel_pending();
        tracing::debug!("flushing change report");
        self.shared.recompute(generation)
    }

    /// Dirty flag of the last completed computation.
    pub fn is_dirty(&self) -> bool {
        *self.shared.dirty.borrow()
    }

    /// Receive the dirty flag whenever it flips.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shared.dirty.subscribe()
    }

    pub fn last_report(&self) -> Option<ChangeReport> {
        self.shared.lock().last_report.clone()
    }

    /// The session's changes were persisted: forget the report and publish a
    /// clean state. The source must now return the saved document as its
    /// initial save model.
    pub fn mark_saved(&self) {
        let mut state = self.shared.lock();
        state.cancel_pending();
        state.last_report = None;
        self.shared.publish(false);
        drop(state);
        tracing::debug!("change tracker reset after save");
    }
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, TrackerState> {
        // TrackerState holds no invariants a panicking holder could break.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn recompute(&self, generation: u64) -> Result<ChangeReport, TrackerError> {
        let report = build_change_report_from_live_session(self.source.as_ref(), &self.config.report)?;
        let dirty = report.has_changes;

        let mut state = self.lock();
        if state.generation != generation {
            tracing::trace!(generation, current = state.generation, "discarding superseded change report");
            return Ok(report);
        }
        state.pending = None;
        state.last_report = Some(report.clone());
        // Published under the lock so the flag always matches the stored report.
        self.publish(dirty);
        drop(state);
        Ok(report)
    }

    fn recompute_logged(&self, generation: u64) {
        if let Err(error) = self.recompute(generation) {
            tracing::warn!(%error, "change report recomputation failed, keeping previous report");
        }
    }

    fn publish(&self, dirty: bool) {
        self.dirty.send_if_modified(|current| {
            let changed = *current != dirty;
            *current = dirty;
            changed
        });
    }
}
