//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::SessionError;
use storage::SourceError;

/// Errors emitted by quiz services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizServiceError {
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Source(#[from] SourceError),
}
