//! Error types for the room layer.

use quizfire_protocol::{RoomCode, UserId};

/// Precondition violations on room operations.
///
/// These are rejections, not failures: the orchestrator surfaces them to
/// the single requesting participant and the room carries on.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// No live room has this code.
    #[error("room {0} not found")]
    NotFound(RoomCode),

    /// Random code allocation kept colliding past the retry cap.
    #[error("room code space exhausted")]
    CodeSpaceExhausted,

    /// The room is locked to new entrants.
    #[error("room {0} is locked")]
    Locked(RoomCode),

    /// The game already started; late joins are rejected.
    #[error("game in room {0} already started")]
    AlreadyStarted(RoomCode),

    /// The display name was banned from this room.
    #[error("name {0:?} is banned from this room")]
    BannedName(String),

    /// The display name is already taken in this room.
    #[error("name {0:?} is already in use")]
    DuplicateName(String),

    /// The room is friends-only and the joiner is not a friend of the host.
    #[error("room {0} is restricted to friends of the host")]
    FriendsOnly(RoomCode),

    /// The participant is not in this room's roster.
    #[error("player {0} not in room")]
    PlayerNotFound(UserId),

    /// A second submission for an already-answered question.
    #[error("player {user} already answered question {index}")]
    AlreadyAnswered { user: UserId, index: usize },

    /// Grading or rewriting an answer that was never recorded.
    #[error("player {user} has no answer for question {index}")]
    AnswerMissing { user: UserId, index: usize },

    /// A host-only action attempted by a non-host participant.
    #[error("only the host may perform this action")]
    NotHost,

    /// Advancing (or another start-gated action) before its precondition.
    #[error("not every active player has answered the current question")]
    NotAllAnswered,

    /// Starting a game that does not have enough active players.
    #[error("room {0} needs at least two active players to start")]
    NotStartable(RoomCode),

    /// An action that requires a started, unfinished game.
    #[error("game in room {0} is not running")]
    NotRunning(RoomCode),

    /// The room's actor task is gone (room closed under the caller).
    #[error("room {0} is unavailable")]
    Unavailable(RoomCode),
}
