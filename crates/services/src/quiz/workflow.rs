use std::sync::Arc;

use quiz_core::model::QuizSettings;
use quiz_core::{Clock, QuizSession};
use rand::rng;
use rand::seq::SliceRandom;
use storage::QuestionSource;

use super::runner::QuizRunner;
use crate::error::QuizServiceError;

/// Orchestrates quiz start: loads questions and builds sessions.
#[derive(Clone)]
pub struct QuizLoopService {
    clock: Clock,
    source: Arc<dyn QuestionSource>,
    settings: QuizSettings,
    shuffle: bool,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, source: Arc<dyn QuestionSource>) -> Self {
        Self {
            clock,
            source,
            settings: QuizSettings::default(),
            shuffle: false,
        }
    }

    #[must_use]
    pub fn with_settings(mut self, settings: QuizSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Randomize question order for every new session.
    #[must_use]
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    #[must_use]
    pub fn clock(&self) -> Clock {
        self.clock
    }

    #[must_use]
    pub fn settings(&self) -> QuizSettings {
        self.settings
    }

    /// Load questions and start a session without a live countdown.
    ///
    /// # Errors
    ///
    /// Returns `QuizServiceError::Source` if questions cannot be loaded, or
    /// `QuizServiceError::Session` if there are none or the first is malformed.
    pub async fn start_session(&self) -> Result<QuizSession, QuizServiceError> {
        let mut questions = self.source.load_questions().await?;
        if self.shuffle {
            questions.shuffle(&mut rng());
        }
        let count = questions.len();

        let session = QuizSession::start(questions, self.settings, self.clock.now())
            .inspect_err(|err| tracing::error!(%err, "quiz could not start"))?;
        tracing::info!(
            questions = count,
            seconds_per_question = self.settings.seconds_per_question(),
            "quiz started"
        );
        Ok(session)
    }

    /// Start a session driven by a one-second ticker.
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// See [`QuizLoopService::start_session`].
    pub async fn start_quiz(&self) -> Result<QuizRunner, QuizServiceError> {
        let session = self.start_session().await?;
        Ok(QuizRunner::new(session, self.clock))
    }
}
