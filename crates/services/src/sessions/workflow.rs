use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use flipp_core::model::{Operation, StreakRecord};
use flipp_core::{Clock, Hint};
use storage::{KeyValueStore, SessionSnapshot, load_snapshot, save_snapshot};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::PracticeConfig;
use crate::error::PracticeError;

use super::feedback::FeedbackTicket;
use super::settings::{RangeDecision, RangeSettingsDraft};
use super::source::{ProblemSource, RandomProblems};
use super::state::{SessionState, SubmitOutcome};
use super::view::SessionView;

/// Runs a practice session: owns the state, the feedback timer and the
/// snapshot writer.
///
/// Commands are synchronous and never wait on storage. Each change to the
/// persisted counters queues a snapshot for a background writer that saves
/// them in order. [`PracticeService::close`] drains that queue.
pub struct PracticeService {
    state: Arc<Mutex<SessionState>>,
    runtime: Handle,
    feedback_delay: Duration,
    timer: Mutex<Option<JoinHandle<()>>>,
    persist: Mutex<Option<mpsc::UnboundedSender<SessionSnapshot>>>,
    writer: Mutex<Option<JoinHandle<()>>>,
}

impl PracticeService {
    /// Load persisted state from `store` and start a session with random
    /// problems.
    ///
    /// Must be called from within a Tokio runtime.
    pub async fn open(
        clock: Clock,
        store: Arc<dyn KeyValueStore>,
        config: &PracticeConfig,
    ) -> Self {
        let source = RandomProblems::from_seed_option(config.rng_seed());
        Self::open_with_source(clock, store, config, Box::new(source)).await
    }

    /// Same as [`PracticeService::open`] with a caller-provided problem source.
    pub async fn open_with_source(
        clock: Clock,
        store: Arc<dyn KeyValueStore>,
        config: &PracticeConfig,
        source: Box<dyn ProblemSource>,
    ) -> Self {
        let snapshot = load_snapshot(store.as_ref()).await;
        let mut state = SessionState::new(source)
            .with_clock(clock)
            .with_operation(config.initial_operation())
            .with_range(config.initial_range())
            .with_snapshot(snapshot);
        state.next_problem();

        let runtime = Handle::current();
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = runtime.spawn(write_snapshots(store, rx));

        Self {
            state: Arc::new(Mutex::new(state)),
            runtime,
            feedback_delay: config.feedback_delay(),
            timer: Mutex::new(None),
            persist: Mutex::new(Some(tx)),
            writer: Mutex::new(Some(writer)),
        }
    }

    /// Current state, copied out for rendering.
    #[must_use]
    pub fn view(&self) -> SessionView {
        SessionView::from_state(&lock(&self.state))
    }

    /// Score an answer. Accepted answers persist and start the feedback
    /// timer; everything else is a no-op.
    pub fn submit_answer(&self, raw: &str) -> SubmitOutcome {
        let mut state = lock(&self.state);
        let outcome = state.submit_answer(raw);
        if let Some(ticket) = outcome.ticket() {
            self.persist(state.snapshot());
            self.schedule_feedback(ticket);
        }
        outcome
    }

    pub fn set_answer_text(&self, text: impl Into<String>) -> bool {
        lock(&self.state).set_answer_text(text)
    }

    /// Switch operation. Preempts any feedback on screen.
    pub fn set_operation(&self, operation: Operation) {
        let mut state = lock(&self.state);
        self.cancel_feedback();
        state.set_operation(operation);
    }

    pub fn next_problem(&self) {
        let mut state = lock(&self.state);
        self.cancel_feedback();
        state.next_problem();
    }

    /// Store new bounds without touching score or the current problem.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Range` if `min > max`.
    pub fn set_range(&self, min: i32, max: i32) -> Result<(), PracticeError> {
        lock(&self.state).set_range(min, max)?;
        Ok(())
    }

    /// Archive active streaks and start over with a fresh problem.
    pub fn reset_session(&self) -> Vec<StreakRecord> {
        let mut state = lock(&self.state);
        self.cancel_feedback();
        let flushed = state.reset_session();
        self.persist(state.snapshot());
        flushed
    }

    /// Capture the current range for a settings panel.
    #[must_use]
    pub fn open_range_settings(&self) -> RangeSettingsDraft {
        RangeSettingsDraft::open(lock(&self.state).range())
    }

    /// Apply a settings panel's edits: reset on a range change, otherwise
    /// just draw a new problem.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Range` for inverted bounds; nothing changes.
    pub fn apply_range_settings(
        &self,
        draft: &RangeSettingsDraft,
    ) -> Result<RangeDecision, PracticeError> {
        let mut state = lock(&self.state);
        let decision = draft.decide()?;
        self.cancel_feedback();
        state.apply_range_settings(draft)?;
        if matches!(decision, RangeDecision::Reset(_)) {
            self.persist(state.snapshot());
        }
        Ok(decision)
    }

    pub fn hint(&self) -> Hint {
        lock(&self.state).hint()
    }

    /// Stop timers and flush every queued snapshot plus the final state.
    ///
    /// Commands issued after closing still update the in-memory session but
    /// are no longer persisted.
    ///
    /// # Errors
    ///
    /// Returns `PracticeError::Writer` if the writer task panicked or was
    /// cancelled.
    pub async fn close(&self) -> Result<(), PracticeError> {
        self.cancel_feedback();
        let snapshot = lock(&self.state).snapshot();
        self.persist(snapshot);

        let sender = lock(&self.persist).take();
        drop(sender);

        let writer = lock(&self.writer).take();
        if let Some(writer) = writer {
            writer
                .await
                .map_err(|err| PracticeError::Writer(err.to_string()))?;
        }
        Ok(())
    }

    fn persist(&self, snapshot: SessionSnapshot) {
        let guard = lock(&self.persist);
        let Some(sender) = guard.as_ref() else {
            return;
        };
        if sender.send(snapshot).is_err() {
            tracing::warn!("snapshot writer is gone, dropping session snapshot");
        }
    }

    fn schedule_feedback(&self, ticket: FeedbackTicket) {
        let state = Arc::clone(&self.state);
        let delay = self.feedback_delay;
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            lock(&state).finish_feedback(ticket);
        });

        if let Some(previous) = lock(&self.timer).replace(handle) {
            previous.abort();
        }
    }

    fn cancel_feedback(&self) {
        if let Some(pending) = lock(&self.timer).take() {
            pending.abort();
        }
    }
}

impl Drop for PracticeService {
    fn drop(&mut self) {
        self.cancel_feedback();
    }
}

async fn write_snapshots(
    store: Arc<dyn KeyValueStore>,
    mut rx: mpsc::UnboundedReceiver<SessionSnapshot>,
) {
    while let Some(snapshot) = rx.recv().await {
        if let Err(err) = save_snapshot(store.as_ref(), &snapshot).await {
            tracing::warn!(error = %err, "failed to persist session snapshot");
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
