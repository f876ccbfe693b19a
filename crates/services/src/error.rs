//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::RosterError;

/// Errors emitted by the round engine and its driver.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a session is already in progress; restart before initializing again")]
    AlreadyStarted,
    #[error(transparent)]
    Roster(#[from] RosterError),
}

/// Errors reported by an audio collaborator. Never fatal to a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AudioError {
    #[error("speech output is not available")]
    Unavailable,
    #[error("speech device failed: {0}")]
    Device(String),
}
