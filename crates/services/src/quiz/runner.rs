use std::fmt;
use std::time::Duration;

use quiz_core::model::ScoreReport;
use quiz_core::{AdvanceOutcome, Clock, QuizSession, SessionTick};
use tokio::sync::watch;

use super::ticker::{QuestionTicker, Tick};
use super::view::QuizSnapshot;
use crate::error::QuizServiceError;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Drives a `QuizSession` against a live countdown.
///
/// The runner owns the session and its ticker. Every command and applied tick
/// publishes a fresh `QuizSnapshot` to subscribers; every question transition
/// restarts the ticker for the new countdown, and finishing stops it.
pub struct QuizRunner {
    clock: Clock,
    session: QuizSession,
    ticker: QuestionTicker,
    snapshots: watch::Sender<QuizSnapshot>,
}

impl QuizRunner {
    /// Wrap a started session and begin ticking.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(session: QuizSession, clock: Clock) -> Self {
        Self::with_tick_period(session, clock, TICK_PERIOD)
    }

    #[must_use]
    pub fn with_tick_period(session: QuizSession, clock: Clock, period: Duration) -> Self {
        let (snapshots, _) = watch::channel(QuizSnapshot::from_session(&session));
        let mut ticker = QuestionTicker::new(period);
        if !session.is_finished() {
            ticker.restart(session.timer_generation());
        }
        Self {
            clock,
            session,
            ticker,
            snapshots,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn snapshot(&self) -> QuizSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receive a snapshot after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.snapshots.subscribe()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.session.is_finished()
    }

    #[must_use]
    pub fn report(&self) -> Option<ScoreReport> {
        self.session.report()
    }

    pub fn select_word(&mut self, option_index: usize) -> bool {
        let changed = self.session.select_word(option_index);
        tracing::debug!(option_index, changed, "select word");
        if changed {
            self.publish();
        }
        changed
    }

    pub fn clear_slot(&mut self, slot_index: usize) -> bool {
        let changed = self.session.clear_slot(slot_index);
        tracing::debug!(slot_index, changed, "clear slot");
        if changed {
            self.publish();
        }
        changed
    }

    /// Submit the current answer.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` when the session refuses to advance.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, QuizServiceError> {
        let outcome = self.session.advance(self.clock.now()).inspect_err(|err| {
            tracing::warn!(%err, "advance rejected");
        })?;
        self.on_transition(outcome);
        Ok(outcome)
    }

    /// Wait for the next countdown tick, or `None` once the session is finished.
    pub async fn next_tick(&mut self) -> Option<Tick> {
        if self.session.is_finished() {
            return None;
        }
        Some(self.ticker.next().await)
    }

    /// Apply a tick received from `next_tick`.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` if time ran out onto a malformed question.
    pub fn apply_tick(&mut self, tick: Tick) -> Result<SessionTick, QuizServiceError> {
        let result = self.session.tick(tick.generation, self.clock.now());
        match result {
            Ok(SessionTick::Ignored) => {
                tracing::trace!(generation = tick.generation.value(), "stale tick ignored");
            }
            Ok(SessionTick::Counting { remaining }) => {
                tracing::trace!(remaining, "tick");
                self.publish();
            }
            Ok(SessionTick::Advanced(outcome)) => {
                tracing::info!(
                    question = self.session.history().len(),
                    "time up, moving on"
                );
                self.on_transition(outcome);
            }
            Err(ref err) => {
                tracing::warn!(%err, "time ran out onto an unusable question");
                self.ticker.stop();
                self.publish();
            }
        }
        Ok(result?)
    }

    /// Let the countdown run until every question has timed out or been answered.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Session` if the session gets stuck on a malformed
    /// question.
    pub async fn run_to_completion(&mut self) -> Result<ScoreReport, QuizServiceError> {
        loop {
            if let Some(report) = self.session.report() {
                return Ok(report);
            }
            let tick = self.ticker.next().await;
            self.apply_tick(tick)?;
        }
    }

    fn on_transition(&mut self, outcome: AdvanceOutcome) {
        match outcome {
            AdvanceOutcome::Next { index } => {
                tracing::debug!(index, "next question");
                self.ticker.restart(self.session.timer_generation());
            }
            AdvanceOutcome::Finished => {
                self.ticker.stop();
                if let Some(report) = self.session.report() {
                    tracing::info!(
                        score = report.score(),
                        total = report.total(),
                        percentage = report.percentage(),
                        "quiz finished"
                    );
                }
            }
        }
        self.publish();
    }

    fn publish(&self) {
        self.snapshots
            .send_replace(QuizSnapshot::from_session(&self.session));
    }
}

impl fmt::Debug for QuizRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizRunner")
            .field("session", &self.session)
            .field("ticker_running", &self.ticker.is_running())
            .finish_non_exhaustive()
    }
}
