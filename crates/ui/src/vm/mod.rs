mod feedback_vm;
mod quiz_vm;
mod time_fmt;

pub use feedback_vm::{FeedbackCardVm, FeedbackVm, map_feedback};
pub use quiz_vm::{QuizIntent, QuizVm, progress_label, start_quiz, timer_label};
