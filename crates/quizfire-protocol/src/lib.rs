//! Shared types for the Quizfire session engine.
//!
//! This crate defines everything the engine and its collaborators agree on:
//!
//! - **Identity** ([`RoomCode`], [`UserId`], [`ConnectionId`]) — who and
//!   where. A user id is persistent; a connection id changes on reconnect.
//! - **Questions** ([`Question`], [`Choice`], [`QuestionKind`]) — the quiz
//!   content as a sum type with exhaustive matching downstream.
//! - **Events** ([`ServerEvent`]) — the outbound payload surface. The
//!   transport is out of scope; the payload shape is the contract.
//!
//! Nothing in here is async and nothing in here mutates — the crate sits at
//! the bottom of the dependency graph.

mod events;
mod question;
mod types;

pub use events::{AnswerVerdict, GameSummary, PlayerReport, PlayerSummary, ServerEvent};
pub use question::{Choice, ChoiceView, Question, QuestionKind, QuestionView};
pub use types::{
    AnswerStatus, Challenge, ConnectionId, GameRecord, RoomCode, Submission, UserId,
};
