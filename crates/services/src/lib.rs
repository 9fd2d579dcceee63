#![forbid(unsafe_code)]

pub mod error;
pub mod quiz;

pub use quiz_core::Clock;

pub use error::QuizServiceError;
pub use quiz::{
    OptionView, QuestionView, QuizLoopService, QuizRunner, QuizSnapshot, SentenceView, Tick,
};
