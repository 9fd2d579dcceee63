use quiz_core::model::{QuestionId, ScoreReport, SentencePart};
use quiz_core::{QuizProgress, QuizSession};

/// One piece of the sentence as the quiz screen shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SentenceView {
    Word(String),
    Blank { slot: usize, word: Option<String> },
}

/// A selectable word and whether it is already placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub index: usize,
    pub word: String,
    pub used: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub id: QuestionId,
    pub parts: Vec<SentenceView>,
    pub options: Vec<OptionView>,
    pub slots: Vec<Option<String>>,
}

/// Read-only projection of a quiz session for presentation.
///
/// `question` is `None` and `report` is `Some` once the session is finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizSnapshot {
    pub progress: QuizProgress,
    pub question: Option<QuestionView>,
    pub seconds_remaining: u32,
    pub can_advance: bool,
    pub report: Option<ScoreReport>,
}

impl QuizSnapshot {
    #[must_use]
    pub fn from_session(session: &QuizSession) -> Self {
        let question = session.current_question().map(|question| {
            let slots = session.slots();
            let parts = question
                .sentence_parts()
                .into_iter()
                .map(|part| match part {
                    SentencePart::Word(word) => SentenceView::Word(word),
                    SentencePart::Blank(slot) => SentenceView::Blank {
                        slot,
                        word: slots.filled().get(slot).cloned().flatten(),
                    },
                })
                .collect();
            let options = slots
                .options()
                .iter()
                .enumerate()
                .map(|(index, word)| OptionView {
                    index,
                    word: word.clone(),
                    used: slots.is_used(index),
                })
                .collect();

            QuestionView {
                id: question.id().clone(),
                parts,
                options,
                slots: slots.filled().to_vec(),
            }
        });

        Self {
            progress: session.progress(),
            question,
            seconds_remaining: session.seconds_remaining(),
            can_advance: session.can_advance(),
            report: session.report(),
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.progress.is_finished
    }
}
