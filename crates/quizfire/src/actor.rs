//! Room actor: one isolated Tokio task per live game.
//!
//! Each room runs in its own task and owns its `Room` state *and* its
//! `Countdown`. Commands arrive on an mpsc channel; countdown signals are
//! polled from the same `select!` loop. That single queue is what
//! serializes the two racing sources — a last-answer early close and a
//! naturally expiring timer can never both fire for the same question,
//! and tearing the task down always destroys the room and the countdown
//! together.

use quizfire_countdown::{Countdown, CountdownSignal};
use quizfire_protocol::{
    AnswerVerdict, Challenge, GameRecord, QuestionKind, RoomCode, ServerEvent, Submission, UserId,
};
use quizfire_room::{Answer, Player, Room, RoomError};
use quizfire_score::{Grade, draw_challenge, grade_open_ended, score_submission, settle};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::{EconomyLedger, EventSink};

/// Duration of the pre-game countdown between "host pressed start" and the
/// first question.
pub const PREGAME_SECS: u64 = 5;

/// Command channel size per room actor.
const COMMAND_CHANNEL_SIZE: usize = 64;

/// Commands a room actor accepts. Join, leave, and info carry a reply
/// channel because the registry needs the outcome; everything else is
/// fire-and-forget, with precondition violations surfaced as a
/// [`ServerEvent::Rejected`] unicast to the requester.
enum RoomCommand {
    Join {
        player: Player,
        is_friend: bool,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    Leave {
        user: UserId,
        reply: oneshot::Sender<Result<(), RoomError>>,
    },
    Info {
        reply: oneshot::Sender<RoomInfo>,
    },
    Start {
        user: UserId,
    },
    Submit {
        user: UserId,
        submission: Submission,
    },
    ActivatePanic {
        user: UserId,
    },
    Pause {
        user: UserId,
    },
    Resume {
        user: UserId,
    },
    Advance {
        user: UserId,
    },
    Grade {
        user: UserId,
        target_name: String,
        question_index: usize,
        grade: Grade,
    },
    Kick {
        user: UserId,
        target_name: String,
    },
    ToggleLock {
        user: UserId,
    },
    EndGame {
        user: UserId,
    },
}

/// A metadata snapshot of one room.
#[derive(Debug, Clone)]
pub struct RoomInfo {
    pub code: RoomCode,
    pub player_count: usize,
    pub active_players: usize,
    pub locked: bool,
    pub started: bool,
    pub finished: bool,
    pub entry_price: u64,
}

/// Handle to a running room actor. Cheap to clone; the registry holds one
/// per live room.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    sender: mpsc::Sender<RoomCommand>,
}

impl RoomHandle {
    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub async fn join(&self, player: Player, is_friend: bool) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Join {
                player,
                is_friend,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?
    }

    pub async fn leave(&self, user: UserId) -> Result<(), RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Leave {
                user,
                reply: reply_tx,
            })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?
    }

    pub async fn info(&self) -> Result<RoomInfo, RoomError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(RoomCommand::Info { reply: reply_tx })
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))?;
        reply_rx
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }

    pub async fn start(&self, user: UserId) -> Result<(), RoomError> {
        self.send(RoomCommand::Start { user }).await
    }

    pub async fn submit(&self, user: UserId, submission: Submission) -> Result<(), RoomError> {
        self.send(RoomCommand::Submit { user, submission }).await
    }

    pub async fn activate_panic(&self, user: UserId) -> Result<(), RoomError> {
        self.send(RoomCommand::ActivatePanic { user }).await
    }

    pub async fn pause(&self, user: UserId) -> Result<(), RoomError> {
        self.send(RoomCommand::Pause { user }).await
    }

    pub async fn resume(&self, user: UserId) -> Result<(), RoomError> {
        self.send(RoomCommand::Resume { user }).await
    }

    pub async fn advance(&self, user: UserId) -> Result<(), RoomError> {
        self.send(RoomCommand::Advance { user }).await
    }

    pub async fn grade(
        &self,
        user: UserId,
        target_name: String,
        question_index: usize,
        grade: Grade,
    ) -> Result<(), RoomError> {
        self.send(RoomCommand::Grade {
            user,
            target_name,
            question_index,
            grade,
        })
        .await
    }

    pub async fn kick(&self, user: UserId, target_name: String) -> Result<(), RoomError> {
        self.send(RoomCommand::Kick { user, target_name }).await
    }

    pub async fn toggle_lock(&self, user: UserId) -> Result<(), RoomError> {
        self.send(RoomCommand::ToggleLock { user }).await
    }

    pub async fn end_game(&self, user: UserId) -> Result<(), RoomError> {
        self.send(RoomCommand::EndGame { user }).await
    }

    async fn send(&self, cmd: RoomCommand) -> Result<(), RoomError> {
        self.sender
            .send(cmd)
            .await
            .map_err(|_| RoomError::Unavailable(self.code.clone()))
    }
}

/// The per-room actor. Owns the room, the countdown, and clones of the
/// external collaborators.
struct RoomActor<L: EconomyLedger, S: EventSink> {
    room: Room,
    countdown: Countdown,
    ledger: L,
    sink: S,
    receiver: mpsc::Receiver<RoomCommand>,
    /// Tells the registry this room is gone so the handle can be pruned.
    closed_tx: mpsc::UnboundedSender<RoomCode>,
    /// Set between "host pressed start" and the pre-game countdown expiry.
    launching: bool,
    /// True while the current question accepts submissions. Stays true
    /// through a pause; cleared when the question closes.
    question_open: bool,
}

impl<L: EconomyLedger, S: EventSink> RoomActor<L, S> {
    async fn run(mut self) {
        info!(code = %self.room.code(), "room actor started");

        loop {
            let close = tokio::select! {
                cmd = self.receiver.recv() => match cmd {
                    Some(cmd) => self.handle_command(cmd).await,
                    None => break,
                },
                signal = self.countdown.wait() => {
                    self.handle_signal(signal).await;
                    false
                }
            };
            if close {
                break;
            }
        }

        let _ = self.closed_tx.send(self.room.code().clone());
        info!(code = %self.room.code(), "room actor stopped");
    }

    /// Returns `true` when the room should close and the actor exit.
    async fn handle_command(&mut self, cmd: RoomCommand) -> bool {
        match cmd {
            RoomCommand::Join {
                player,
                is_friend,
                reply,
            } => {
                let _ = reply.send(self.handle_join(player, is_friend));
                false
            }
            RoomCommand::Leave { user, reply } => {
                let (result, close) = self.handle_leave(user).await;
                let _ = reply.send(result);
                close
            }
            RoomCommand::Info { reply } => {
                let _ = reply.send(self.info());
                false
            }
            RoomCommand::Start { user } => {
                self.handle_start(user);
                false
            }
            RoomCommand::Submit { user, submission } => {
                self.handle_submit(user, submission);
                false
            }
            RoomCommand::ActivatePanic { user } => {
                self.handle_panic(user);
                false
            }
            RoomCommand::Pause { user } => {
                self.handle_pause(user);
                false
            }
            RoomCommand::Resume { user } => {
                self.handle_resume(user);
                false
            }
            RoomCommand::Advance { user } => self.handle_advance(user).await,
            RoomCommand::Grade {
                user,
                target_name,
                question_index,
                grade,
            } => {
                self.handle_grade(user, target_name, question_index, grade);
                false
            }
            RoomCommand::Kick { user, target_name } => self.handle_kick(user, target_name).await,
            RoomCommand::ToggleLock { user } => {
                self.handle_toggle_lock(user);
                false
            }
            RoomCommand::EndGame { user } => {
                self.handle_end_game(user).await;
                false
            }
        }
    }

    async fn handle_signal(&mut self, signal: CountdownSignal) {
        let code = self.room.code().clone();
        match signal {
            CountdownSignal::DelayTick(remaining) => {
                self.sink
                    .send_to_room(&code, ServerEvent::DelayTick { remaining });
            }
            CountdownSignal::QuestionBegins => {
                self.sink.send_to_room(&code, ServerEvent::QuestionBegins);
            }
            CountdownSignal::Tick(remaining) => {
                self.sink
                    .send_to_room(&code, ServerEvent::CountdownTick { remaining });
            }
            CountdownSignal::Expired => {
                // The first expiry of a session means "the game may begin";
                // every later one means "question timed out".
                if self.room.has_started() {
                    self.close_question();
                } else {
                    self.launch_game();
                }
            }
        }
    }

    // -- Lobby ---------------------------------------------------------

    fn handle_join(&mut self, player: Player, is_friend: bool) -> Result<(), RoomError> {
        if self.launching {
            return Err(RoomError::AlreadyStarted(self.room.code().clone()));
        }
        let name = player.display_name.clone();
        self.room.add_player(player, is_friend)?;
        info!(code = %self.room.code(), name = %name, "player joined");
        let code = self.room.code().clone();
        self.sink
            .send_to_room(&code, ServerEvent::PlayerJoined { name });
        self.broadcast_roster();
        Ok(())
    }

    async fn handle_leave(&mut self, user: UserId) -> (Result<(), RoomError>, bool) {
        if self.room.is_host(&user) {
            return (Ok(()), self.handle_host_leave().await);
        }

        let Some(player) = self.room.player(&user) else {
            return (Err(RoomError::PlayerNotFound(user)), false);
        };
        let name = player.display_name.clone();
        let code = self.room.code().clone();

        if self.room.is_finished() {
            // Pure disconnect; the game outcome is already settled.
            return (Ok(()), false);
        }

        if !self.room.has_started() {
            if let Err(err) = self.room.remove_player(&user) {
                return (Err(err), false);
            }
        } else if let Err(err) = self.room.mark_inactive(&user) {
            return (Err(err), false);
        }

        info!(code = %code, name = %name, "player left");
        self.sink
            .send_to_room(&code, ServerEvent::PlayerLeft { name });
        self.broadcast_roster();

        (Ok(()), self.after_player_drop().await)
    }

    /// The host's departure always closes the room, with behavior keyed on
    /// how far the game got.
    async fn handle_host_leave(&mut self) -> bool {
        let code = self.room.code().clone();

        if self.room.is_finished() {
            return true;
        }

        if !self.room.has_started() {
            // Entry fees are not committed yet: give them back.
            let price = self.room.entry_price();
            if price > 0 {
                for player in self.room.players() {
                    if let Err(err) = self.ledger.refund_entry(&player.user_id, price).await {
                        warn!(user = %player.user_id, error = %err, "entry refund failed");
                    }
                }
            }
            self.sink.send_to_room(
                &code,
                ServerEvent::RoomClosed {
                    reason: "host closed the room".into(),
                },
            );
            return true;
        }

        // Mid-game: force end without winners. Fees are already in the pot,
        // so no refunds.
        self.room.finish();
        self.sink.send_to_room(
            &code,
            ServerEvent::RoomClosed {
                reason: "host left during the game".into(),
            },
        );
        true
    }

    /// After a mid-game departure: one survivor wins outright, zero
    /// survivors just notifies the host.
    async fn after_player_drop(&mut self) -> bool {
        if !self.room.has_started() || self.room.is_finished() {
            return false;
        }
        match self.room.active_count() {
            1 => {
                info!(code = %self.room.code(), "sole survivor, force ending");
                self.finish_game().await;
                true
            }
            0 => {
                let host = self.room.host_connection().clone();
                self.sink
                    .send_to_connection(&host, ServerEvent::AllPlayersLeft);
                false
            }
            _ => false,
        }
    }

    async fn handle_kick(&mut self, user: UserId, target_name: String) -> bool {
        if !self.require_host(&user) {
            return false;
        }
        let Some(target) = self.room.player_by_name(&target_name) else {
            self.reject(&user, format!("no player named {target_name:?}"));
            return false;
        };
        let target_user = target.user_id.clone();
        let target_conn = target.connection_id.clone();

        self.room.ban_name(&target_name);
        self.sink
            .send_to_connection(&target_conn, ServerEvent::Kicked);

        let result = if self.room.has_started() {
            self.room.mark_inactive(&target_user)
        } else {
            self.room.remove_player(&target_user).map(|_| ())
        };
        if result.is_err() {
            return false;
        }

        info!(code = %self.room.code(), name = %target_name, "player kicked");
        let code = self.room.code().clone();
        self.sink.send_to_room(
            &code,
            ServerEvent::PlayerLeft {
                name: target_name,
            },
        );
        self.broadcast_roster();

        self.after_player_drop().await
    }

    fn handle_toggle_lock(&mut self, user: UserId) {
        if !self.require_host(&user) {
            return;
        }
        let locked = self.room.toggle_lock();
        debug!(code = %self.room.code(), locked, "lock toggled");
    }

    // -- Turn sequencing -----------------------------------------------

    fn handle_start(&mut self, user: UserId) {
        if !self.require_host(&user) {
            return;
        }
        if self.launching || self.room.has_started() {
            self.reject(
                &user,
                RoomError::AlreadyStarted(self.room.code().clone()).to_string(),
            );
            return;
        }
        if !self.room.is_startable() {
            self.reject(
                &user,
                RoomError::NotStartable(self.room.code().clone()).to_string(),
            );
            return;
        }
        self.launching = true;
        self.countdown.configure(Duration::from_secs(PREGAME_SECS));
        self.countdown.start(false);
        info!(code = %self.room.code(), "pre-game countdown started");
    }

    /// The pre-game countdown expired: shuffle, draw challenges, and put
    /// up the first question.
    fn launch_game(&mut self) {
        self.launching = false;

        // Players can leave during the pre-game countdown, so the start
        // precondition has to hold again here. If it broke, drop back to
        // the lobby and let the host try again once the room refills.
        if !self.room.is_startable() {
            warn!(code = %self.room.code(), "launch aborted, not enough active players");
            let host = self.room.host_connection().clone();
            self.sink.send_to_connection(
                &host,
                ServerEvent::Rejected {
                    reason: RoomError::NotStartable(self.room.code().clone()).to_string(),
                },
            );
            return;
        }

        let mut rng = rand::rng();
        self.room.start(&mut rng);
        let code = self.room.code().clone();
        self.sink.send_to_room(&code, ServerEvent::GameCanStart);

        let users: Vec<UserId> = self
            .room
            .players()
            .iter()
            .map(|p| p.user_id.clone())
            .collect();
        for user in users {
            let challenge = draw_challenge(self.room.quiz(), &mut rng);
            self.room.assign_challenge(&user, challenge);
        }

        self.broadcast_question();
    }

    fn broadcast_question(&mut self) {
        let Some(question) = self.room.current_question() else {
            warn!(code = %self.room.code(), "no question at cursor");
            return;
        };
        let view = question.view();
        let duration = question.duration();
        let index = self.room.question_index();
        let total = self.room.quiz().len();

        self.countdown.configure(duration);
        self.countdown.start(true);
        self.question_open = true;

        let code = self.room.code().clone();
        self.sink.send_to_room(
            &code,
            ServerEvent::QuestionBroadcast {
                index,
                total,
                question: view,
            },
        );
    }

    fn handle_submit(&mut self, user: UserId, submission: Submission) {
        if !self.question_open {
            self.reject(&user, "no question is currently open".into());
            return;
        }
        let Some(question) = self.room.current_question().cloned() else {
            return;
        };
        let index = self.room.question_index();

        let first_perfect_available = !self.room.first_perfect_awarded();
        let verdict = score_submission(&question, &submission, first_perfect_available);

        let answer = Answer {
            question_index: index,
            submission,
            points: verdict.points,
            bonus: verdict.bonus,
            status: verdict.status,
        };
        if let Err(err) = self.room.record_answer(&user, answer) {
            debug!(code = %self.room.code(), %user, %err, "submission rejected");
            self.reject(&user, err.to_string());
            return;
        }
        if verdict.claims_first_perfect {
            self.room.mark_first_perfect_awarded();
        }

        // Perfect+fast numeric answers complete their challenge on the spot.
        if question.kind() == QuestionKind::NumericEstimate && verdict.bonus > 0.0 {
            let holds = self
                .room
                .player(&user)
                .is_some_and(|p| p.challenge == Some(Challenge::PerfectFastNumeric));
            if holds {
                self.room.complete_challenge(&user);
            }
        }

        let host = self.room.host_connection().clone();
        self.sink.send_to_connection(
            &host,
            ServerEvent::AnswerUpdate {
                answered: self.room.answered_count(index),
                active: self.room.active_count(),
            },
        );

        // The only legitimate early end of a question: everyone answered.
        if self.room.all_active_answered(index) {
            self.close_question();
        }
    }

    /// Ends the current question: stop the timer, fill in empty answers for
    /// anyone who never submitted, and push everyone's verdict.
    fn close_question(&mut self) {
        if !self.question_open {
            return;
        }
        self.question_open = false;
        self.countdown.stop();

        let code = self.room.code().clone();
        self.sink.send_to_room(&code, ServerEvent::QuestionTimedOut);

        let Some(question) = self.room.current_question().cloned() else {
            return;
        };
        let index = self.room.question_index();

        let missing: Vec<UserId> = self
            .room
            .active_players()
            .filter(|p| !p.has_answered(index))
            .map(|p| p.user_id.clone())
            .collect();
        for user in missing {
            let submission = Submission::empty_for(question.kind());
            let verdict = score_submission(&question, &submission, false);
            let answer = Answer {
                question_index: index,
                submission,
                points: verdict.points,
                bonus: verdict.bonus,
                status: verdict.status,
            };
            // A race with a just-arrived submission is a no-op by design.
            let _ = self.room.record_answer(&user, answer);
        }

        for player in self.room.active_players() {
            let Some(answer) = player.answer_for(index) else {
                continue;
            };
            self.sink.send_to_connection(
                &player.connection_id,
                ServerEvent::AnswerResult {
                    verdict: AnswerVerdict {
                        question_index: index,
                        status: answer.status,
                        points: answer.points,
                        bonus: answer.bonus,
                        total_points: player.total_points,
                    },
                },
            );
        }
    }

    fn handle_panic(&mut self, user: UserId) {
        if !self.require_host(&user) {
            return;
        }
        if !self.question_open {
            return;
        }
        let Some(kind) = self.room.current_question().map(|q| q.kind()) else {
            return;
        };
        if self.countdown.activate_panic(kind) {
            let code = self.room.code().clone();
            self.sink.send_to_room(&code, ServerEvent::PanicActivated);
        }
    }

    fn handle_pause(&mut self, user: UserId) {
        if !self.require_host(&user) {
            return;
        }
        if let Some(remaining) = self.countdown.pause() {
            let code = self.room.code().clone();
            self.sink
                .send_to_room(&code, ServerEvent::Paused { remaining });
        }
    }

    fn handle_resume(&mut self, user: UserId) {
        if !self.require_host(&user) {
            return;
        }
        self.countdown.resume();
    }

    async fn handle_advance(&mut self, user: UserId) -> bool {
        if !self.require_host(&user) {
            return false;
        }
        if !self.room.has_started() || self.room.is_finished() {
            self.reject(
                &user,
                RoomError::NotRunning(self.room.code().clone()).to_string(),
            );
            return false;
        }
        if !self.room.all_active_answered(self.room.question_index()) {
            self.reject(&user, RoomError::NotAllAnswered.to_string());
            return false;
        }
        match self.room.advance() {
            Some(_) => {
                self.broadcast_question();
                false
            }
            None => {
                // Past the last question the game is over.
                self.finish_game().await;
                false
            }
        }
    }

    fn handle_grade(
        &mut self,
        user: UserId,
        target_name: String,
        question_index: usize,
        grade: Grade,
    ) {
        if !self.require_host(&user) {
            return;
        }
        let Some(target) = self.room.player_by_name(&target_name) else {
            self.reject(&user, format!("no player named {target_name:?}"));
            return;
        };
        let target_user = target.user_id.clone();
        let target_conn = target.connection_id.clone();

        let Some(question) = self.room.quiz().get(question_index) else {
            self.reject(&user, format!("no question at index {question_index}"));
            return;
        };
        // Choice and numeric questions are scored automatically; grading
        // must not overwrite those verdicts.
        if question.kind() != QuestionKind::OpenEnded {
            self.reject(&user, "only open-ended answers can be graded".into());
            return;
        }
        let points = question.points();

        let verdict = grade_open_ended(points, grade);
        match self.room.apply_verdict(
            &target_user,
            question_index,
            verdict.points,
            verdict.bonus,
            verdict.status,
        ) {
            Ok(_) => {}
            Err(err) => {
                self.reject(&user, err.to_string());
                return;
            }
        }

        // A 100 grade completes the perfect open-ended challenge on the spot.
        if grade == Grade::Hundred {
            let holds = self
                .room
                .player(&target_user)
                .is_some_and(|p| p.challenge == Some(Challenge::PerfectOpenEnded));
            if holds {
                self.room.complete_challenge(&target_user);
            }
        }

        let total_points = self
            .room
            .player(&target_user)
            .map(|p| p.total_points)
            .unwrap_or_default();
        self.sink.send_to_connection(
            &target_conn,
            ServerEvent::AnswerResult {
                verdict: AnswerVerdict {
                    question_index,
                    status: verdict.status,
                    points: verdict.points,
                    bonus: verdict.bonus,
                    total_points,
                },
            },
        );
    }

    async fn handle_end_game(&mut self, user: UserId) {
        if !self.require_host(&user) {
            return;
        }
        if !self.room.has_started() || self.room.is_finished() {
            self.reject(
                &user,
                RoomError::NotRunning(self.room.code().clone()).to_string(),
            );
            return;
        }
        self.finish_game().await;
    }

    /// Settles the game, pushes money and history through the ledger, and
    /// broadcasts the final state. Runs exactly once per game.
    async fn finish_game(&mut self) {
        self.question_open = false;
        self.countdown.stop();

        let settlement = settle(&mut self.room);
        self.room.finish();

        for (user, amount) in &settlement.earnings {
            if let Err(err) = self.ledger.credit(user, *amount).await {
                warn!(%user, error = %err, "settlement credit failed");
            }
        }
        for (user, challenge) in &settlement.completed_challenges {
            if let Err(err) = self
                .ledger
                .record_challenge_completion(user, *challenge)
                .await
            {
                warn!(%user, error = %err, "challenge record failed");
            }
        }
        for player in self.room.players() {
            let record = GameRecord {
                room_code: self.room.code().clone(),
                points: player.total_points,
                won: settlement.winners.contains(&player.user_id),
                earnings: settlement.earnings_for(&player.user_id),
            };
            if let Err(err) = self.ledger.append_game_history(&player.user_id, record).await {
                warn!(user = %player.user_id, error = %err, "history append failed");
            }
        }

        let code = self.room.code().clone();
        self.sink.send_to_room(
            &code,
            ServerEvent::GameFinished {
                summary: settlement.summary(&self.room),
            },
        );
    }

    // -- Helpers -------------------------------------------------------

    fn require_host(&self, user: &UserId) -> bool {
        if self.room.is_host(user) {
            true
        } else {
            debug!(code = %self.room.code(), %user, "host-only action refused");
            self.reject(user, RoomError::NotHost.to_string());
            false
        }
    }

    /// Unicasts a rejection to whoever asked. Never fatal for the room.
    fn reject(&self, user: &UserId, reason: String) {
        let connection = if self.room.is_host(user) {
            Some(self.room.host_connection().clone())
        } else {
            self.room.player(user).map(|p| p.connection_id.clone())
        };
        if let Some(connection) = connection {
            self.sink
                .send_to_connection(&connection, ServerEvent::Rejected { reason });
        }
    }

    fn broadcast_roster(&self) {
        let code = self.room.code().clone();
        self.sink.send_to_room(
            &code,
            ServerEvent::RosterUpdate {
                players: self.room.roster_summaries(),
            },
        );
    }

    fn info(&self) -> RoomInfo {
        RoomInfo {
            code: self.room.code().clone(),
            player_count: self.room.players().len(),
            active_players: self.room.active_count(),
            locked: self.room.is_locked(),
            started: self.room.has_started() || self.launching,
            finished: self.room.is_finished(),
            entry_price: self.room.entry_price(),
        }
    }
}

/// Spawns a room actor task and returns the handle to drive it.
pub(crate) fn spawn_room<L: EconomyLedger, S: EventSink>(
    room: Room,
    ledger: L,
    sink: S,
    closed_tx: mpsc::UnboundedSender<RoomCode>,
) -> RoomHandle {
    let code = room.code().clone();
    let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_SIZE);

    let actor = RoomActor {
        room,
        countdown: Countdown::new(Duration::from_secs(PREGAME_SECS)),
        ledger,
        sink,
        receiver: rx,
        closed_tx,
        launching: false,
        question_open: false,
    };
    tokio::spawn(actor.run());

    RoomHandle { code, sender: tx }
}
