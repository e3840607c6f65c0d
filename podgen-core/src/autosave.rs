//! Autosave coordination
//!
//! Decides when the active project's draft is committed without being
//! invoked on every keystroke:
//! - a trailing-edge debounce fires 3 seconds after the last mutation;
//! - an independent periodic timer fires every 5 minutes, skipping
//!   untouched projects;
//! - a manual save commits immediately and satisfies any pending debounce.
//!
//! `AutosaveCoordinator` is a plain deadline-based state machine driven by
//! injected instants, so its transitions are testable without sleeping.
//! `AutosaveDriver` runs it on a tokio task against a shared project store.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::storage::StateStore;
use crate::store::ProjectStore;

/// Quiet period after the last mutation before the debounce commit
pub const DEBOUNCE_WINDOW: Duration = Duration::from_secs(3);

/// Wall-clock period of the unconditional autosave timer
pub const AUTOSAVE_INTERVAL: Duration = Duration::from_secs(5 * 60);

/// Why a commit was requested
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitReason {
    /// A burst of edits went quiet
    Debounce,
    /// The periodic timer came due
    Periodic,
    /// The user asked for a save
    Manual,
}

/// Debounce half of the coordinator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DebounceState {
    Idle,
    Pending { deadline: Instant },
}

// ============================================================================
// COORDINATOR
// ============================================================================

/// Deterministic autosave state machine.
///
/// Callers feed it mutations and poll it with the current instant; it never
/// reads the clock itself.
#[derive(Debug)]
pub struct AutosaveCoordinator {
    debounce: DebounceState,
    next_periodic: Instant,
    debounce_window: Duration,
    periodic_interval: Duration,
}

impl AutosaveCoordinator {
    /// Create a coordinator with the production timings
    pub fn new(now: Instant) -> Self {
        Self::with_timing(now, DEBOUNCE_WINDOW, AUTOSAVE_INTERVAL)
    }

    /// Create a coordinator with explicit timings (used by tests)
    pub fn with_timing(now: Instant, debounce_window: Duration, periodic_interval: Duration) -> Self {
        Self {
            debounce: DebounceState::Idle,
            next_periodic: now + periodic_interval,
            debounce_window,
            periodic_interval,
        }
    }

    /// Record a qualifying mutation to the draft.
    ///
    /// Restarts the debounce deadline; only the last mutation in a burst
    /// leads to a commit.
    pub fn on_mutation(&mut self, now: Instant) {
        self.debounce = DebounceState::Pending {
            deadline: now + self.debounce_window,
        };
    }

    /// Record a manual save that already committed the draft.
    ///
    /// Cancels any pending debounce; the periodic timer keeps its schedule.
    pub fn on_manual_save(&mut self, _now: Instant) {
        self.debounce = DebounceState::Idle;
    }

    /// Re-bind the timers to a new context (project switch, session start).
    ///
    /// No timer outlives the session that created it.
    pub fn reset(&mut self, now: Instant) {
        self.debounce = DebounceState::Idle;
        self.next_periodic = now + self.periodic_interval;
    }

    /// The next instant at which `poll` may have work to do
    pub fn next_deadline(&self) -> Instant {
        match self.debounce {
            DebounceState::Pending { deadline } => deadline.min(self.next_periodic),
            DebounceState::Idle => self.next_periodic,
        }
    }

    /// Check the timers against `now`.
    ///
    /// Returns at most one due commit per call; call repeatedly until `None`.
    /// A due periodic tick with an untouched draft advances silently.
    pub fn poll(&mut self, now: Instant, draft_has_content: bool) -> Option<CommitReason> {
        if let DebounceState::Pending { deadline } = self.debounce {
            if now >= deadline {
                self.debounce = DebounceState::Idle;
                return Some(CommitReason::Debounce);
            }
        }

        while now >= self.next_periodic {
            self.next_periodic += self.periodic_interval;
            if draft_has_content {
                return Some(CommitReason::Periodic);
            }
        }

        None
    }
}

// ============================================================================
// DRIVER
// ============================================================================

/// Events fed to the autosave driver by the UI layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveEvent {
    /// Draft content or script changed
    Mutation,
    /// Explicit user save
    ManualSave,
    /// The active project changed; timers rebind to the new context
    ProjectSwitched,
    /// Session teardown
    Shutdown,
}

/// Handle for feeding events to a running driver
#[derive(Debug, Clone)]
pub struct AutosaveHandle {
    tx: mpsc::UnboundedSender<AutosaveEvent>,
}

impl AutosaveHandle {
    /// Report a draft mutation
    pub fn note_mutation(&self) {
        let _ = self.tx.send(AutosaveEvent::Mutation);
    }

    /// Request an immediate commit
    pub fn manual_save(&self) {
        let _ = self.tx.send(AutosaveEvent::ManualSave);
    }

    /// Report that the active project changed
    pub fn project_switched(&self) {
        let _ = self.tx.send(AutosaveEvent::ProjectSwitched);
    }

    /// Stop the driver
    pub fn shutdown(&self) {
        let _ = self.tx.send(AutosaveEvent::Shutdown);
    }
}

/// Tokio task running the coordinator against a shared project store.
///
/// Commits happen synchronously within the turn a deadline fires, so a
/// commit never captures a project selection made after the decision.
pub struct AutosaveDriver<S: StateStore> {
    store: Arc<Mutex<ProjectStore<S>>>,
    coordinator: AutosaveCoordinator,
    events: mpsc::UnboundedReceiver<AutosaveEvent>,
}

impl<S: StateStore + 'static> AutosaveDriver<S> {
    /// Spawn a driver task for the given store.
    ///
    /// Returns the event handle and the task's join handle.
    pub fn spawn(
        store: Arc<Mutex<ProjectStore<S>>>,
    ) -> (AutosaveHandle, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let driver = Self {
            store,
            coordinator: AutosaveCoordinator::new(Instant::now()),
            events: rx,
        };
        let task = tokio::spawn(driver.run());
        (AutosaveHandle { tx }, task)
    }

    async fn run(mut self) {
        log::debug!("Autosave driver started");

        loop {
            let deadline = self.coordinator.next_deadline();

            tokio::select! {
                _ = tokio::time::sleep_until(deadline) => {
                    self.flush_due(Instant::now());
                }
                event = self.events.recv() => match event {
                    Some(AutosaveEvent::Mutation) => {
                        self.coordinator.on_mutation(Instant::now());
                    }
                    Some(AutosaveEvent::ManualSave) => {
                        let now = Instant::now();
                        self.store.lock().commit_draft();
                        self.coordinator.on_manual_save(now);
                        log::info!("Saved ({:?})", CommitReason::Manual);
                    }
                    Some(AutosaveEvent::ProjectSwitched) => {
                        self.coordinator.reset(Instant::now());
                    }
                    Some(AutosaveEvent::Shutdown) | None => break,
                },
            }
        }

        log::debug!("Autosave driver stopped");
    }

    fn flush_due(&mut self, now: Instant) {
        let mut store = self.store.lock();
        while let Some(reason) = self.coordinator.poll(now, store.draft_has_content()) {
            store.commit_draft();
            log::info!("Autosaved ({:?})", reason);
        }
    }
}
