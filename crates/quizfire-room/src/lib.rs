//! Room state for Quizfire.
//!
//! This crate holds the authoritative mutable state of one game room and
//! every synchronous mutation/query on it. Nothing here is async and
//! nothing here emits events — the orchestrator (one actor task per room)
//! owns a [`Room`] and serializes all access to it.
//!
//! # Key types
//!
//! - [`Room`] — roster, quiz, ban list, lifecycle flags, question cursor
//! - [`Player`] — one participant, their answers, points, and challenge
//! - [`Answer`] — the recorded outcome of one (player, question) pair
//! - [`RoomError`] — precondition violations, never fatal for the room

mod error;
mod player;
mod room;

pub use error::RoomError;
pub use player::{Answer, Player};
pub use room::Room;
