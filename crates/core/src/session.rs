use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;

use crate::model::{AdvanceTrigger, Feedback, Question, QuestionError, QuizSettings, ScoreReport};
use crate::slots::BlankSlotFiller;
use crate::timer::{QuestionTimer, TickOutcome, TimerGeneration};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for session")]
    EmptyQuestionSet,

    #[error("session already finished")]
    Finished,

    #[error("every blank must be filled before advancing")]
    IncompleteAnswer,

    #[error(transparent)]
    MalformedQuestion(#[from] QuestionError),
}

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// Where the session landed after leaving a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    Next { index: usize },
    Finished,
}

/// Result of delivering a timer tick to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionTick {
    Ignored,
    Counting { remaining: u32 },
    /// Time ran out and the session moved on.
    Advanced(AdvanceOutcome),
}

/// Aggregated view of quiz progress, useful for UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizProgress {
    /// 1-based number of the current question.
    pub number: usize,
    pub total: usize,
    pub is_finished: bool,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a fixed list of fill-in-the-blank questions.
///
/// Commands: `select_word`, `clear_slot`, `advance`, plus `tick` from the
/// countdown scheduler. Every question produces exactly one `Feedback`, in
/// question order, whether it was left manually or by the timer.
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    slots: BlankSlotFiller,
    timer: QuestionTimer,
    history: Vec<Feedback>,
    started_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    /// Start a session on the first question with a full countdown.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyQuestionSet` if `questions` is empty.
    /// Returns `SessionError::MalformedQuestion` if the first question's blanks
    /// and answers disagree.
    pub fn start(
        questions: Vec<Question>,
        settings: QuizSettings,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        let Some(first) = questions.first() else {
            return Err(SessionError::EmptyQuestionSet);
        };
        first.validate()?;

        let slots = slots_for(first);
        let history = Vec::with_capacity(questions.len());
        Ok(Self {
            questions,
            current: 0,
            slots,
            timer: QuestionTimer::start(settings.seconds_per_question()),
            history,
            started_at,
            finished_at: None,
        })
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// The question being answered, or `None` once the session is finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished() {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    #[must_use]
    pub fn slots(&self) -> &BlankSlotFiller {
        &self.slots
    }

    /// Words currently placed in the blanks, `None` for empty ones.
    #[must_use]
    pub fn current_answer(&self) -> &[Option<String>] {
        self.slots.filled()
    }

    #[must_use]
    pub fn seconds_remaining(&self) -> u32 {
        self.timer.seconds_remaining()
    }

    /// Generation a freshly scheduled tick must carry to be honored.
    #[must_use]
    pub fn timer_generation(&self) -> TimerGeneration {
        self.timer.generation()
    }

    /// Whether an explicit `advance` would be accepted right now.
    #[must_use]
    pub fn can_advance(&self) -> bool {
        !self.is_finished() && self.slots.is_complete()
    }

    #[must_use]
    pub fn history(&self) -> &[Feedback] {
        &self.history
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            number: (self.current + 1).min(self.questions.len()),
            total: self.questions.len(),
            is_finished: self.is_finished(),
        }
    }

    /// Final score, available once the session is finished.
    #[must_use]
    pub fn report(&self) -> Option<ScoreReport> {
        self.finished_at
            .map(|finished_at| ScoreReport::from_history(&self.history, self.started_at, finished_at))
    }

    /// Place an option into the leftmost empty blank.
    ///
    /// Returns whether the answer changed; rejected picks are no-ops.
    pub fn select_word(&mut self, option_index: usize) -> bool {
        if self.is_finished() {
            return false;
        }
        self.slots.select_word(option_index)
    }

    /// Empty a blank and give its word back to the pool.
    ///
    /// Returns whether the answer changed; rejected clears are no-ops.
    pub fn clear_slot(&mut self, slot_index: usize) -> bool {
        if self.is_finished() {
            return false;
        }
        self.slots.clear_slot(slot_index)
    }

    /// Submit the current answer and move on.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` once the last question was answered.
    /// Returns `SessionError::IncompleteAnswer` while a blank is still empty.
    /// Returns `SessionError::MalformedQuestion` if the next question is invalid.
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<AdvanceOutcome, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if !self.slots.is_complete() {
            return Err(SessionError::IncompleteAnswer);
        }
        self.leave_current(AdvanceTrigger::Manual, now)
    }

    /// Deliver one elapsed second scheduled for `generation`.
    ///
    /// Stale ticks and ticks after the session finished are ignored. When the
    /// countdown runs out the session advances even with empty blanks.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::MalformedQuestion` if time ran out and the next
    /// question is invalid.
    pub fn tick(
        &mut self,
        generation: TimerGeneration,
        now: DateTime<Utc>,
    ) -> Result<SessionTick, SessionError> {
        if self.is_finished() {
            return Ok(SessionTick::Ignored);
        }
        match self.timer.tick(generation) {
            TickOutcome::Ignored => Ok(SessionTick::Ignored),
            TickOutcome::Running { remaining } => Ok(SessionTick::Counting { remaining }),
            TickOutcome::TimeUp => self
                .leave_current(AdvanceTrigger::TimeUp, now)
                .map(SessionTick::Advanced),
        }
    }

    fn leave_current(
        &mut self,
        trigger: AdvanceTrigger,
        now: DateTime<Utc>,
    ) -> Result<AdvanceOutcome, SessionError> {
        let next = self.current + 1;
        // Nothing is recorded when the next question is unusable.
        if let Some(upcoming) = self.questions.get(next) {
            upcoming.validate()?;
        }

        let question = &self.questions[self.current];
        self.history.push(Feedback::grade(
            question.id().clone(),
            question.text(),
            self.slots.filled().to_vec(),
            question.correct_answer().to_vec(),
            trigger,
        ));

        match self.questions.get(next) {
            Some(upcoming) => {
                self.slots = slots_for(upcoming);
                self.current = next;
                self.timer.reset();
                Ok(AdvanceOutcome::Next { index: next })
            }
            None => {
                self.timer.stop();
                self.finished_at = Some(now);
                Ok(AdvanceOutcome::Finished)
            }
        }
    }
}

fn slots_for(question: &Question) -> BlankSlotFiller {
    BlankSlotFiller::new(question.options().to_vec(), question.correct_answer().len())
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions_len", &self.questions.len())
            .field("current", &self.current)
            .field("history_len", &self.history.len())
            .field("timer", &self.timer.state())
            .field("started_at", &self.started_at)
            .field("finished_at", &self.finished_at)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
