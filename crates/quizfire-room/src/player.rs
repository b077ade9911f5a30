//! Player and answer records.

use quizfire_protocol::{
    AnswerStatus, Challenge, ConnectionId, PlayerSummary, Submission, UserId,
};
use serde::{Deserialize, Serialize};

/// The recorded outcome of one player's response to one question.
///
/// At most one `Answer` ever exists per (player, question) pair — see
/// [`Room::record_answer`](crate::Room::record_answer).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Answer {
    pub question_index: usize,
    pub submission: Submission,
    pub points: f64,
    pub bonus: f64,
    pub status: AnswerStatus,
}

/// One participant inside a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Persistent identity.
    pub user_id: UserId,
    /// Transport address; replaced on reconnect.
    pub connection_id: ConnectionId,
    pub display_name: String,
    /// False once the player disconnected mid-game. Inactive players stay
    /// in the roster so their answers and points remain addressable.
    pub is_active: bool,
    /// One entry per answered question, in play order.
    pub answers: Vec<Answer>,
    pub total_points: f64,
    /// Achievement goal drawn at game start.
    pub challenge: Option<Challenge>,
    pub challenge_completed: bool,
}

impl Player {
    pub fn new(user_id: UserId, connection_id: ConnectionId, display_name: String) -> Self {
        Self {
            user_id,
            connection_id,
            display_name,
            is_active: true,
            answers: Vec::new(),
            total_points: 0.0,
            challenge: None,
            challenge_completed: false,
        }
    }

    /// The answer this player recorded for a question, if any.
    pub fn answer_for(&self, question_index: usize) -> Option<&Answer> {
        self.answers
            .iter()
            .find(|a| a.question_index == question_index)
    }

    pub fn has_answered(&self, question_index: usize) -> bool {
        self.answer_for(question_index).is_some()
    }

    pub fn summary(&self) -> PlayerSummary {
        PlayerSummary {
            name: self.display_name.clone(),
            points: self.total_points,
            is_active: self.is_active,
        }
    }
}
