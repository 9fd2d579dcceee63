use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Countdown every question starts with.
pub const DEFAULT_SECONDS_PER_QUESTION: u32 = 30;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("seconds per question must be > 0")]
    InvalidSecondsPerQuestion,
}

/// Per-session quiz configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSettings {
    seconds_per_question: u32,
}

impl QuizSettings {
    /// Creates custom settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::InvalidSecondsPerQuestion` for a zero countdown.
    pub fn new(seconds_per_question: u32) -> Result<Self, SettingsError> {
        if seconds_per_question == 0 {
            return Err(SettingsError::InvalidSecondsPerQuestion);
        }
        Ok(Self {
            seconds_per_question,
        })
    }

    #[must_use]
    pub fn seconds_per_question(&self) -> u32 {
        self.seconds_per_question
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            seconds_per_question: DEFAULT_SECONDS_PER_QUESTION,
        }
    }
}
