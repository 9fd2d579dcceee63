use thiserror::Error;

use crate::model::{QuestionError, SettingsError};
use crate::session::SessionError;

/// Any error raised by the quiz domain.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
