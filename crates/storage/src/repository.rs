use async_trait::async_trait;
use quiz_core::model::Question;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by question sources.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SourceError {
    #[error("question file not readable: {0}")]
    Io(#[from] std::io::Error),

    #[error("question data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Supplies the ordered question list for a quiz.
///
/// Sources are read-only; records are returned as authored and validated lazily
/// by the session.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Load every question, in quiz order.
    ///
    /// # Errors
    ///
    /// Returns `SourceError` if the backing data cannot be read or decoded.
    async fn load_questions(&self) -> Result<Vec<Question>, SourceError>;
}

/// Simple in-memory source for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryQuestionSource {
    questions: Arc<Vec<Question>>,
}

impl InMemoryQuestionSource {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: Arc::new(questions),
        }
    }
}

#[async_trait]
impl QuestionSource for InMemoryQuestionSource {
    async fn load_questions(&self) -> Result<Vec<Question>, SourceError> {
        Ok(self.questions.as_ref().clone())
    }
}
