mod runner;
mod ticker;
mod view;
mod workflow;

// Public API of the quiz subsystem.
pub use crate::error::QuizServiceError;
pub use runner::QuizRunner;
pub use ticker::Tick;
pub use view::{OptionView, QuestionView, QuizSnapshot, SentenceView};
pub use workflow::QuizLoopService;
