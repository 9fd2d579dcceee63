use serde::{Deserialize, Serialize};

use crate::model::ids::QuestionId;

/// What caused the session to leave a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceTrigger {
    /// The user confirmed a complete answer.
    Manual,
    /// The question timer ran out.
    TimeUp,
}

/// Recorded outcome for one question.
///
/// Created once when the session leaves the question and never mutated.
/// `selected` keeps unfilled slots as `None`, so a timed-out answer shows
/// exactly which blanks were left open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    question_id: QuestionId,
    question_text: String,
    selected: Vec<Option<String>>,
    correct: Vec<String>,
    is_correct: bool,
    trigger: AdvanceTrigger,
}

impl Feedback {
    /// Scores `selected` against `correct` by ordered, element-wise equality.
    ///
    /// An empty slot never equals a word, and both sides must have the same length.
    #[must_use]
    pub fn grade(
        question_id: QuestionId,
        question_text: impl Into<String>,
        selected: Vec<Option<String>>,
        correct: Vec<String>,
        trigger: AdvanceTrigger,
    ) -> Self {
        let is_correct = selected.len() == correct.len()
            && selected
                .iter()
                .zip(&correct)
                .all(|(chosen, expected)| chosen.as_deref() == Some(expected.as_str()));

        Self {
            question_id,
            question_text: question_text.into(),
            selected,
            correct,
            is_correct,
            trigger,
        }
    }

    #[must_use]
    pub fn question_id(&self) -> &QuestionId {
        &self.question_id
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    #[must_use]
    pub fn selected(&self) -> &[Option<String>] {
        &self.selected
    }

    #[must_use]
    pub fn correct(&self) -> &[String] {
        &self.correct
    }

    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.is_correct
    }

    #[must_use]
    pub fn trigger(&self) -> AdvanceTrigger {
        self.trigger
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(selected: &[Option<&str>], correct: &[&str]) -> Feedback {
        Feedback::grade(
            QuestionId::new("q"),
            "text",
            selected.iter().map(|s| s.map(str::to_string)).collect(),
            correct.iter().map(|s| (*s).to_string()).collect(),
            AdvanceTrigger::Manual,
        )
    }

    #[test]
    fn exact_match_is_correct() {
        assert!(grade(&[Some("fox"), Some("jumps")], &["fox", "jumps"]).is_correct());
    }

    #[test]
    fn empty_slot_is_incorrect() {
        assert!(!grade(&[Some("fox"), None], &["fox", "jumps"]).is_correct());
    }

    #[test]
    fn order_matters() {
        assert!(!grade(&[Some("jumps"), Some("fox")], &["fox", "jumps"]).is_correct());
    }

    #[test]
    fn length_mismatch_is_incorrect() {
        assert!(!grade(&[Some("fox")], &["fox", "jumps"]).is_correct());
    }
}
