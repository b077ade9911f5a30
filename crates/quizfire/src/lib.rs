//! # Quizfire
//!
//! A live multi-player quiz session engine. A host creates a room from a
//! quiz, players join, questions run one at a time under a countdown
//! (with pause, resume, and a host-triggered accelerated "panic" phase),
//! answers are scored per question type, and the game settles winners,
//! challenges, and prize money at the end.
//!
//! The engine is transport- and storage-agnostic. Embedders provide two
//! collaborators — an [`EconomyLedger`] for money and history, and an
//! [`EventSink`] for outbound delivery — and drive everything through a
//! [`GameRegistry`] and per-room [`RoomHandle`]s. Each room is a single
//! Tokio task owning both its state and its timer, so room mutations and
//! countdown signals are serialized by construction.

mod actor;
mod collab;
mod error;
mod registry;

pub use actor::{PREGAME_SECS, RoomHandle, RoomInfo};
pub use collab::{EconomyLedger, EventSink};
pub use error::QuizfireError;
pub use registry::GameRegistry;

pub use quizfire_countdown as countdown;
pub use quizfire_protocol as protocol;
pub use quizfire_room as room;
pub use quizfire_score as score;
