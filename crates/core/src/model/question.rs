use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::QuestionId;

/// Marker that denotes a blank inside a question's text.
///
/// A token counts as a blank when it *contains* the marker, so authored text
/// such as `_____________.` keeps its trailing punctuation.
pub const BLANK_SENTINEL: &str = "_____________";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question {id} has {blanks} blanks but {answers} correct answers")]
    BlankCountMismatch {
        id: QuestionId,
        blanks: usize,
        answers: usize,
    },
}

//
// ─── SENTENCE PARTS ────────────────────────────────────────────────────────────
//

/// One renderable piece of a question sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentencePart {
    Word(String),
    /// A blank, addressed by its slot index (left to right).
    Blank(usize),
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A fill-in-the-blank sentence with its word pool and expected answer.
///
/// Construction does not validate the blank/answer invariant; the session
/// checks it lazily when the question becomes current.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    id: QuestionId,
    text: String,
    options: Vec<String>,
    correct_answer: Vec<String>,
}

impl Question {
    #[must_use]
    pub fn new(
        id: impl Into<QuestionId>,
        text: impl Into<String>,
        options: Vec<String>,
        correct_answer: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            options,
            correct_answer,
        }
    }

    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn correct_answer(&self) -> &[String] {
        &self.correct_answer
    }

    /// Number of blank sentinels in the text.
    #[must_use]
    pub fn blank_count(&self) -> usize {
        self.text
            .split_whitespace()
            .filter(|token| token.contains(BLANK_SENTINEL))
            .count()
    }

    /// Checks that every blank has exactly one expected word.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::BlankCountMismatch` when the counts differ.
    pub fn validate(&self) -> Result<(), QuestionError> {
        let blanks = self.blank_count();
        let answers = self.correct_answer.len();
        if blanks != answers {
            return Err(QuestionError::BlankCountMismatch {
                id: self.id.clone(),
                blanks,
                answers,
            });
        }
        Ok(())
    }

    /// Splits the text into words and blanks, in reading order.
    ///
    /// Text glued to a sentinel (`"_____________,"`) is emitted as its own word
    /// next to the blank.
    #[must_use]
    pub fn sentence_parts(&self) -> Vec<SentencePart> {
        let mut parts = Vec::new();
        let mut slot = 0;
        for token in self.text.split_whitespace() {
            let Some(at) = token.find(BLANK_SENTINEL) else {
                parts.push(SentencePart::Word(token.to_string()));
                continue;
            };
            let prefix = &token[..at];
            let suffix = token[at..].trim_start_matches('_');
            if !prefix.is_empty() {
                parts.push(SentencePart::Word(prefix.to_string()));
            }
            parts.push(SentencePart::Blank(slot));
            slot += 1;
            if !suffix.is_empty() {
                parts.push(SentencePart::Word(suffix.to_string()));
            }
        }
        parts
    }
}
