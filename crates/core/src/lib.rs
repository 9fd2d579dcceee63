#![forbid(unsafe_code)]

pub mod error;
pub mod model;
pub mod session;
pub mod slots;
pub mod time;
pub mod timer;

pub use error::Error;
pub use session::{AdvanceOutcome, QuizProgress, QuizSession, SessionError, SessionTick};
pub use slots::BlankSlotFiller;
pub use time::Clock;
pub use timer::{QuestionTimer, TickOutcome, TimerGeneration, TimerState};
