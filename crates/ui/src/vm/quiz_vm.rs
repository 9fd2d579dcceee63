use quiz_core::{SessionError, SessionTick};
use services::{QuizLoopService, QuizRunner, QuizServiceError, QuizSnapshot, Tick};
use tokio::sync::watch;

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    SelectWord(usize),
    ClearSlot(usize),
    Next,
}

/// Quiz screen adapter over a live `QuizRunner`.
///
/// The runner owns the countdown; this type maps screen intents onto runner
/// commands and runner failures onto `ViewError`.
pub struct QuizVm {
    runner: QuizRunner,
}

impl QuizVm {
    #[must_use]
    pub fn new(runner: QuizRunner) -> Self {
        Self { runner }
    }

    /// Snapshots published after every command and applied tick.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<QuizSnapshot> {
        self.runner.subscribe()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.runner.is_finished()
    }

    /// Apply a user intent. Returns whether the session changed.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::IncompleteAnswer` when `Next` is used before every
    /// blank is filled, and `ViewError::MalformedQuestion` when the next
    /// question cannot be shown.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<bool, ViewError> {
        match intent {
            QuizIntent::SelectWord(index) => Ok(self.runner.select_word(index)),
            QuizIntent::ClearSlot(slot) => Ok(self.runner.clear_slot(slot)),
            QuizIntent::Next => {
                self.runner.advance().map_err(map_service_error)?;
                Ok(true)
            }
        }
    }

    /// Wait for the runner's next countdown second, or `None` once finished.
    pub async fn next_tick(&mut self) -> Option<Tick> {
        self.runner.next_tick().await
    }

    /// # Errors
    ///
    /// Returns `ViewError::MalformedQuestion` if time ran out onto a question
    /// that cannot be shown. The countdown stays stopped afterwards.
    pub fn apply_tick(&mut self, tick: Tick) -> Result<SessionTick, ViewError> {
        self.runner.apply_tick(tick).map_err(map_service_error)
    }
}

#[must_use]
pub fn timer_label(snapshot: &QuizSnapshot) -> String {
    format!("Time Left: {}s", snapshot.seconds_remaining)
}

#[must_use]
pub fn progress_label(snapshot: &QuizSnapshot) -> String {
    format!(
        "Question {} of {}",
        snapshot.progress.number, snapshot.progress.total
    )
}

fn map_service_error(err: QuizServiceError) -> ViewError {
    match err {
        QuizServiceError::Session(err) => map_session_error(err),
        err => {
            tracing::error!(%err, "quiz questions could not be loaded");
            ViewError::Unknown
        }
    }
}

fn map_session_error(err: SessionError) -> ViewError {
    match err {
        SessionError::IncompleteAnswer => ViewError::IncompleteAnswer,
        SessionError::MalformedQuestion(_) => ViewError::MalformedQuestion,
        SessionError::EmptyQuestionSet => ViewError::EmptyQuiz,
        _ => ViewError::Unknown,
    }
}

/// Load questions and start a runner-driven quiz.
///
/// Must be called from within a tokio runtime.
///
/// # Errors
///
/// Returns `ViewError::EmptyQuiz` when no questions are available.
/// Returns `ViewError::MalformedQuestion` when the first question is unusable.
/// Returns `ViewError::Unknown` for other failures.
pub async fn start_quiz(quiz_loop: &QuizLoopService) -> Result<QuizVm, ViewError> {
    let runner = quiz_loop.start_quiz().await.map_err(map_service_error)?;
    Ok(QuizVm::new(runner))
}
