//! Identity newtypes and the answer vocabulary.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The short code identifying one active room.
///
/// Codes are 4 decimal digits, allocated randomly by the registry and
/// collision-checked against live rooms. The tiny id space is a documented
/// scaling limit, not a bug.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomCode(pub String);

impl RoomCode {
    /// Number of digits in a room code.
    pub const LEN: usize = 4;
}

impl fmt::Display for RoomCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persistent participant identity, owned by the (external) account system.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Transient transport address for one connected participant.
///
/// Changes when the participant reconnects; never use it as a key for
/// anything that must survive a reconnect.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(pub String);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Outcome classification for one scored answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AnswerStatus {
    Correct,
    PartiallyCorrect,
    PartiallyIncorrect,
    Incorrect,
}

/// What a player actually submitted, one shape per question kind.
///
/// `Numeric(None)` and `Choices(vec![])` both mean "timed out without an
/// answer" — scoring treats them as a guaranteed miss.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Submission {
    /// Selected choice texts for a multiple-choice question.
    Choices(Vec<String>),
    /// Numeric value for an estimate question, `None` if never submitted.
    Numeric(Option<f64>),
    /// Free text for an open-ended question.
    Text(String),
}

impl Submission {
    /// An empty submission of the right shape for a timed-out player.
    pub fn empty_for(kind: crate::QuestionKind) -> Self {
        match kind {
            crate::QuestionKind::MultipleChoice => Self::Choices(Vec::new()),
            crate::QuestionKind::NumericEstimate => Self::Numeric(None),
            crate::QuestionKind::OpenEnded => Self::Text(String::new()),
        }
    }
}

/// An achievement goal drawn per player at game start and verified at
/// settlement (or, for the last two, awarded the moment they trigger
/// during play).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Challenge {
    /// Three consecutive fully-correct answers anywhere in the game.
    ThreeInARow,
    /// Every multiple-choice question answered fully correctly.
    AllMultipleChoiceCorrect,
    /// No incorrect or partial answer across the whole game.
    Flawless,
    /// An open-ended answer graded 100 by the host.
    PerfectOpenEnded,
    /// An exact numeric answer (the +20% precision bonus condition).
    PerfectFastNumeric,
}

/// One line appended to a player's persistent game history at settlement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub room_code: RoomCode,
    pub points: f64,
    pub won: bool,
    /// Total currency credited by settlement (prizes, pot share, bonuses).
    pub earnings: u64,
}
