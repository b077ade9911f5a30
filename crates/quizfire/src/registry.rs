//! Game registry: allocates room codes, spawns room actors, routes joins.

use std::collections::HashMap;

use quizfire_protocol::{ConnectionId, Question, RoomCode, ServerEvent, UserId};
use quizfire_room::{Player, Room, RoomError};
use rand::Rng;
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::actor::{RoomHandle, spawn_room};
use crate::{EconomyLedger, EventSink, QuizfireError};

/// How many random codes to try before declaring the space exhausted.
/// Codes are four decimal digits, so heavy load genuinely can run out.
const MAX_CODE_ATTEMPTS: usize = 32;

/// Owns the set of live rooms. One per process; everything behind it runs
/// in per-room actor tasks, so the registry itself stays synchronous apart
/// from the join round-trip.
pub struct GameRegistry<L: EconomyLedger, S: EventSink> {
    rooms: HashMap<RoomCode, RoomHandle>,
    ledger: L,
    sink: S,
    closed_tx: mpsc::UnboundedSender<RoomCode>,
    closed_rx: mpsc::UnboundedReceiver<RoomCode>,
}

impl<L: EconomyLedger, S: EventSink> GameRegistry<L, S> {
    pub fn new(ledger: L, sink: S) -> Self {
        let (closed_tx, closed_rx) = mpsc::unbounded_channel();
        Self {
            rooms: HashMap::new(),
            ledger,
            sink,
            closed_tx,
            closed_rx,
        }
    }

    /// Creates a room and spawns its actor. The creator becomes the host
    /// and is not part of the scored roster.
    pub fn create_room(
        &mut self,
        quiz: Vec<Question>,
        host: UserId,
        host_connection: ConnectionId,
        friends_only: bool,
        entry_price: u64,
    ) -> Result<RoomCode, QuizfireError> {
        self.prune_closed();

        let code = self.allocate_code()?;
        let room = Room::new(
            code.clone(),
            quiz,
            host,
            host_connection.clone(),
            friends_only,
            entry_price,
        );
        let handle = spawn_room(
            room,
            self.ledger.clone(),
            self.sink.clone(),
            self.closed_tx.clone(),
        );
        self.rooms.insert(code.clone(), handle);

        self.sink.send_to_connection(
            &host_connection,
            ServerEvent::RoomCreated { code: code.clone() },
        );
        info!(%code, entry_price, "room created");
        Ok(code)
    }

    /// Joins a player into a room.
    ///
    /// The entry fee is charged before any room state changes; if the room
    /// then rejects the join (filled, locked, started under the caller),
    /// the charge is compensated with a refund.
    pub async fn join(
        &mut self,
        code: &RoomCode,
        user: UserId,
        connection: ConnectionId,
        display_name: String,
        is_friend: bool,
    ) -> Result<(), QuizfireError> {
        self.prune_closed();

        let handle = self
            .rooms
            .get(code)
            .ok_or_else(|| RoomError::NotFound(code.clone()))?
            .clone();

        let price = handle.info().await?.entry_price;
        if price > 0 {
            self.ledger
                .charge_entry(&user, price)
                .await
                .map_err(QuizfireError::ledger)?;
        }

        let player = Player::new(user.clone(), connection, display_name);
        match handle.join(player, is_friend).await {
            Ok(()) => Ok(()),
            Err(err) => {
                if price > 0 {
                    if let Err(refund_err) = self.ledger.refund_entry(&user, price).await {
                        warn!(%user, error = %refund_err, "compensating refund failed");
                    }
                }
                Err(err.into())
            }
        }
    }

    /// The handle for a live room, if any.
    pub fn room(&self, code: &RoomCode) -> Option<&RoomHandle> {
        self.rooms.get(code)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    /// Drops handles for rooms whose actors have exited.
    pub fn prune_closed(&mut self) {
        while let Ok(code) = self.closed_rx.try_recv() {
            if self.rooms.remove(&code).is_some() {
                info!(%code, "room pruned");
            }
        }
    }

    fn allocate_code(&self) -> Result<RoomCode, QuizfireError> {
        let mut rng = rand::rng();
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = RoomCode(format!("{:04}", rng.random_range(0..10_000)));
            if !self.rooms.contains_key(&code) {
                return Ok(code);
            }
        }
        Err(RoomError::CodeSpaceExhausted.into())
    }
}
