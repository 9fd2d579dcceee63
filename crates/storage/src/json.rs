use async_trait::async_trait;
use quiz_core::model::Question;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::repository::{QuestionSource, SourceError};

const BUNDLED_QUESTIONS: &str = include_str!("../data/sample.json");

/// On-disk shape of one question, as exported by the question authoring tool.
///
/// Extra fields (`questionType`, `answerType`, ...) are ignored.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub question_id: String,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: Vec<String>,
}

impl QuestionRecord {
    #[must_use]
    pub fn into_question(self) -> Question {
        Question::new(
            self.question_id.as_str(),
            self.question,
            self.options,
            self.correct_answer,
        )
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Envelope { data: Payload },
    Bare(Vec<QuestionRecord>),
}

#[derive(Deserialize)]
struct Payload {
    questions: Vec<QuestionRecord>,
}

/// Decode a question document.
///
/// Accepts either `{"data": {"questions": [...]}}` or a bare array of records.
///
/// # Errors
///
/// Returns `SourceError::Parse` for malformed JSON or missing fields.
pub fn parse_questions(raw: &str) -> Result<Vec<Question>, SourceError> {
    let records = match serde_json::from_str::<Document>(raw)? {
        Document::Envelope { data } => data.questions,
        Document::Bare(records) => records,
    };
    Ok(records.into_iter().map(QuestionRecord::into_question).collect())
}

/// Questions shipped with the application.
///
/// # Errors
///
/// Returns `SourceError::Parse` if the embedded dataset is corrupt.
pub fn bundled() -> Result<Vec<Question>, SourceError> {
    parse_questions(BUNDLED_QUESTIONS)
}

/// The dataset compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BundledQuestions;

#[async_trait]
impl QuestionSource for BundledQuestions {
    async fn load_questions(&self) -> Result<Vec<Question>, SourceError> {
        bundled()
    }
}

/// Reads questions from a JSON file each time a quiz starts.
#[derive(Debug, Clone)]
pub struct JsonQuestionFile {
    path: PathBuf,
}

impl JsonQuestionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for JsonQuestionFile {
    async fn load_questions(&self) -> Result<Vec<Question>, SourceError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let questions = parse_questions(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            count = questions.len(),
            "loaded questions"
        );
        Ok(questions)
    }
}
