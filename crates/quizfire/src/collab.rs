//! Traits for the engine's external collaborators.
//!
//! The engine never talks to a database or a socket directly. Money moves
//! through an [`EconomyLedger`] and events leave through an [`EventSink`];
//! the registry and every room actor are generic over both.

use std::future::Future;

use quizfire_protocol::{Challenge, ConnectionId, GameRecord, RoomCode, ServerEvent, UserId};

/// Currency and history operations, keyed by persistent user id.
///
/// Implementations are assumed eventually consistent per user. The engine
/// charges entry fees *before* mutating room state and compensates with a
/// refund when the join is subsequently rejected, so a ledger never sees a
/// charge for a player who silently failed to enter.
///
/// Methods are declared with explicit `Send` futures because room actors
/// run on spawned tasks; implementations can still use plain `async fn`.
pub trait EconomyLedger: Clone + Send + Sync + 'static {
    type Error: std::error::Error + Send + Sync + 'static;

    fn charge_entry(
        &self,
        user: &UserId,
        amount: u64,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn credit(
        &self,
        user: &UserId,
        amount: u64,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn refund_entry(
        &self,
        user: &UserId,
        amount: u64,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn record_challenge_completion(
        &self,
        user: &UserId,
        challenge: Challenge,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;

    fn append_game_history(
        &self,
        user: &UserId,
        record: GameRecord,
    ) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

/// Outbound event delivery. The engine only needs room fan-out and unicast
/// to a connection, both fire-and-forget with at-least-once semantics to
/// currently connected participants.
pub trait EventSink: Clone + Send + Sync + 'static {
    fn send_to_room(&self, code: &RoomCode, event: ServerEvent);

    fn send_to_connection(&self, connection: &ConnectionId, event: ServerEvent);
}
