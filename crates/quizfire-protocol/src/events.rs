//! The outbound event surface.
//!
//! Every event the engine can emit to participants, with its exact payload
//! shape. The engine is transport-agnostic; a sink implementation decides
//! how these reach clients, but the JSON shape defined here is the contract.

use serde::{Deserialize, Serialize};

use crate::{AnswerStatus, QuestionView, RoomCode};

/// The scored outcome of one player's answer, unicast after a question
/// closes (or after host grading for open-ended questions).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerVerdict {
    pub question_index: usize,
    pub status: AnswerStatus,
    pub points: f64,
    pub bonus: f64,
    pub total_points: f64,
}

/// A roster line as seen by everyone in the room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerSummary {
    pub name: String,
    pub points: f64,
    pub is_active: bool,
}

/// One player's final line in the end-of-game summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerReport {
    pub name: String,
    pub points: f64,
    pub challenge_completed: bool,
    /// Total currency credited to this player by settlement.
    pub earnings: u64,
}

/// The settled end-of-game state carried by [`ServerEvent::GameFinished`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSummary {
    pub winners: Vec<String>,
    pub players: Vec<PlayerReport>,
}

/// Everything the engine sends outward. Internally tagged so clients can
/// switch on a single `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ServerEvent {
    // -- Room lifecycle --
    RoomCreated { code: RoomCode },
    PlayerJoined { name: String },
    PlayerLeft { name: String },
    /// Unicast to the kicked player just before removal.
    Kicked,
    RosterUpdate { players: Vec<PlayerSummary> },
    /// Unicast rejection of a precondition-violating action. Never fatal
    /// for the room.
    Rejected { reason: String },
    /// Terminal broadcast when the room closes without a finished game.
    RoomClosed { reason: String },

    // -- Turn sequencing --
    /// The pre-game countdown expired; the game is now starting.
    GameCanStart,
    QuestionBroadcast {
        index: usize,
        total: usize,
        question: QuestionView,
    },
    /// One tick of the short delay window before a question opens.
    DelayTick { remaining: u64 },
    /// The delay window ended; the question countdown is running.
    QuestionBegins,
    CountdownTick { remaining: u64 },
    PanicActivated,
    Paused { remaining: u64 },
    /// The question is over — either the timer expired naturally or every
    /// active player answered.
    QuestionTimedOut,

    // -- Scoring --
    /// Unicast per player once their answer is scored.
    AnswerResult { verdict: AnswerVerdict },
    /// Host-facing aggregate while a question is open.
    AnswerUpdate { answered: usize, active: usize },

    // -- End of game --
    GameFinished { summary: GameSummary },
    /// Host-facing: every player has disconnected mid-game.
    AllPlayersLeft,
}
