#![forbid(unsafe_code)]

pub mod json;
pub mod repository;

pub use json::{BundledQuestions, JsonQuestionFile, QuestionRecord, bundled, parse_questions};
pub use repository::{InMemoryQuestionSource, QuestionSource, SourceError};
