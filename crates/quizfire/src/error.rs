//! Unified error type for the engine's entry points.

use quizfire_room::RoomError;

/// Top-level error returned by the registry and room handles.
///
/// Room-level rejections convert automatically through `?`; ledger failures
/// are boxed because the ledger's error type belongs to the caller.
#[derive(Debug, thiserror::Error)]
pub enum QuizfireError {
    #[error(transparent)]
    Room(#[from] RoomError),

    #[error("ledger operation failed: {0}")]
    Ledger(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl QuizfireError {
    pub(crate) fn ledger(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Ledger(Box::new(err))
    }
}
