//! The room: one active game instance and all its mutable state.

use std::collections::HashSet;

use quizfire_protocol::{
    AnswerStatus, Challenge, ConnectionId, PlayerSummary, Question, RoomCode, UserId,
};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::{Answer, Player, RoomError};

/// One active game instance.
///
/// The host controls pacing and is not scored; it is tracked separately
/// from the roster, so the roster only ever contains players.
#[derive(Debug)]
pub struct Room {
    code: RoomCode,
    /// Question order is shuffled exactly once when the game starts and
    /// immutable afterwards.
    quiz: Vec<Question>,
    roster: Vec<Player>,
    host: UserId,
    host_connection: ConnectionId,
    question_index: usize,
    locked: bool,
    started: bool,
    finished: bool,
    banned_names: HashSet<String>,
    friends_only: bool,
    entry_price: u64,
    /// One-shot per question: set when the first fully-correct answer
    /// claims the speed bonus, reset on advance.
    first_perfect_awarded: bool,
}

impl Room {
    pub fn new(
        code: RoomCode,
        quiz: Vec<Question>,
        host: UserId,
        host_connection: ConnectionId,
        friends_only: bool,
        entry_price: u64,
    ) -> Self {
        Self {
            code,
            quiz,
            roster: Vec::new(),
            host,
            host_connection,
            question_index: 0,
            locked: false,
            started: false,
            finished: false,
            banned_names: HashSet::new(),
            friends_only,
            entry_price,
            first_perfect_awarded: false,
        }
    }

    // -- Accessors -----------------------------------------------------

    pub fn code(&self) -> &RoomCode {
        &self.code
    }

    pub fn host(&self) -> &UserId {
        &self.host
    }

    pub fn host_connection(&self) -> &ConnectionId {
        &self.host_connection
    }

    pub fn is_host(&self, user: &UserId) -> bool {
        &self.host == user
    }

    pub fn entry_price(&self) -> u64 {
        self.entry_price
    }

    pub fn friends_only(&self) -> bool {
        self.friends_only
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn question_index(&self) -> usize {
        self.question_index
    }

    pub fn quiz(&self) -> &[Question] {
        &self.quiz
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.get(self.question_index)
    }

    /// True when the cursor sits on the last question.
    pub fn on_last_question(&self) -> bool {
        self.question_index + 1 >= self.quiz.len()
    }

    pub fn first_perfect_awarded(&self) -> bool {
        self.first_perfect_awarded
    }

    pub fn mark_first_perfect_awarded(&mut self) {
        self.first_perfect_awarded = true;
    }

    // -- Roster --------------------------------------------------------

    pub fn players(&self) -> &[Player] {
        &self.roster
    }

    pub fn player(&self, user: &UserId) -> Option<&Player> {
        self.roster.iter().find(|p| &p.user_id == user)
    }

    pub fn player_mut(&mut self, user: &UserId) -> Option<&mut Player> {
        self.roster.iter_mut().find(|p| &p.user_id == user)
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.roster.iter().find(|p| p.display_name == name)
    }

    pub fn active_players(&self) -> impl Iterator<Item = &Player> {
        self.roster.iter().filter(|p| p.is_active)
    }

    pub fn active_count(&self) -> usize {
        self.active_players().count()
    }

    /// At least two active players are needed to start a game.
    pub fn is_startable(&self) -> bool {
        self.active_count() >= 2
    }

    pub fn roster_summaries(&self) -> Vec<PlayerSummary> {
        self.roster.iter().map(Player::summary).collect()
    }

    /// Admits a player, enforcing the room's admission policy.
    ///
    /// `is_friend` is resolved by the caller against the external social
    /// graph; the engine only enforces the flag.
    pub fn add_player(
        &mut self,
        player: Player,
        is_friend: bool,
    ) -> Result<&Player, RoomError> {
        if self.started {
            return Err(RoomError::AlreadyStarted(self.code.clone()));
        }
        if self.locked {
            return Err(RoomError::Locked(self.code.clone()));
        }
        if self.friends_only && !is_friend {
            return Err(RoomError::FriendsOnly(self.code.clone()));
        }
        if self.banned_names.contains(&player.display_name) {
            return Err(RoomError::BannedName(player.display_name));
        }
        if self.player_by_name(&player.display_name).is_some() {
            return Err(RoomError::DuplicateName(player.display_name));
        }
        self.roster.push(player);
        Ok(self.roster.last().expect("just pushed"))
    }

    /// Deletes a player from the roster outright. Only valid before the
    /// game starts; afterwards use [`mark_inactive`](Self::mark_inactive)
    /// so answers stay addressable.
    pub fn remove_player(&mut self, user: &UserId) -> Result<Player, RoomError> {
        let idx = self
            .roster
            .iter()
            .position(|p| &p.user_id == user)
            .ok_or_else(|| RoomError::PlayerNotFound(user.clone()))?;
        Ok(self.roster.remove(idx))
    }

    /// Flags a mid-game leaver inactive, keeping their history.
    pub fn mark_inactive(&mut self, user: &UserId) -> Result<(), RoomError> {
        let player = self
            .player_mut(user)
            .ok_or_else(|| RoomError::PlayerNotFound(user.clone()))?;
        player.is_active = false;
        Ok(())
    }

    /// Bans a display name from ever re-entering this room, even through
    /// a new connection.
    pub fn ban_name(&mut self, name: &str) {
        self.banned_names.insert(name.to_string());
    }

    pub fn is_banned(&self, name: &str) -> bool {
        self.banned_names.contains(name)
    }

    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        self.locked
    }

    // -- Game lifecycle ------------------------------------------------

    /// Marks the game started and shuffles the question order once.
    pub fn start(&mut self, rng: &mut impl Rng) {
        self.started = true;
        self.quiz.shuffle(rng);
        tracing::info!(code = %self.code, questions = self.quiz.len(), "game started");
    }

    pub fn finish(&mut self) {
        self.finished = true;
    }

    /// Moves the cursor to the next question and re-arms the one-shot
    /// first-perfect bonus. Returns the new index, or `None` past the end.
    pub fn advance(&mut self) -> Option<usize> {
        if self.on_last_question() {
            return None;
        }
        self.question_index += 1;
        self.first_perfect_awarded = false;
        Some(self.question_index)
    }

    // -- Answers -------------------------------------------------------

    /// Records an answer, rejecting a second submission for the same
    /// question as a no-op. Totals are updated from the answer's points
    /// and bonus.
    pub fn record_answer(&mut self, user: &UserId, answer: Answer) -> Result<(), RoomError> {
        let user = user.clone();
        let player = self
            .player_mut(&user)
            .ok_or_else(|| RoomError::PlayerNotFound(user.clone()))?;
        if player.has_answered(answer.question_index) {
            return Err(RoomError::AlreadyAnswered {
                user,
                index: answer.question_index,
            });
        }
        player.total_points += answer.points + answer.bonus;
        player.answers.push(answer);
        Ok(())
    }

    /// Rewrites the verdict of an existing answer (host grading of an
    /// open-ended question), adjusting the player's total by the delta.
    pub fn apply_verdict(
        &mut self,
        user: &UserId,
        question_index: usize,
        points: f64,
        bonus: f64,
        status: AnswerStatus,
    ) -> Result<&Answer, RoomError> {
        let user = user.clone();
        let player = self
            .player_mut(&user)
            .ok_or_else(|| RoomError::PlayerNotFound(user.clone()))?;
        let answer = player
            .answers
            .iter_mut()
            .find(|a| a.question_index == question_index)
            .ok_or_else(|| RoomError::AnswerMissing {
                user: user.clone(),
                index: question_index,
            })?;
        let delta = points + bonus - answer.points - answer.bonus;
        answer.points = points;
        answer.bonus = bonus;
        answer.status = status;
        player.total_points += delta;
        Ok(player
            .answer_for(question_index)
            .expect("answer exists, found above"))
    }

    /// How many active players have answered the given question.
    pub fn answered_count(&self, question_index: usize) -> usize {
        self.active_players()
            .filter(|p| p.has_answered(question_index))
            .count()
    }

    /// True once every active player holds an answer for the question.
    pub fn all_active_answered(&self, question_index: usize) -> bool {
        self.active_players().all(|p| p.has_answered(question_index))
    }

    // -- Challenges ----------------------------------------------------

    pub fn assign_challenge(&mut self, user: &UserId, challenge: Challenge) {
        if let Some(player) = self.player_mut(user) {
            player.challenge = Some(challenge);
        }
    }

    pub fn complete_challenge(&mut self, user: &UserId) {
        if let Some(player) = self.player_mut(user) {
            player.challenge_completed = true;
        }
    }
}
