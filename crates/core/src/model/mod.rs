mod feedback;
mod ids;
mod question;
mod report;
mod settings;

pub use ids::QuestionId;

pub use feedback::{AdvanceTrigger, Feedback};
pub use question::{BLANK_SENTINEL, Question, QuestionError, SentencePart};
pub use report::ScoreReport;
pub use settings::{DEFAULT_SECONDS_PER_QUESTION, QuizSettings, SettingsError};
