//! End-of-game settlement: winners, challenge verification, prize split.

use std::collections::HashMap;

use quizfire_protocol::{Challenge, GameSummary, PlayerReport, UserId};
use quizfire_room::Room;

use crate::challenge::verify_challenge;

/// Flat reward credited to each winner.
pub const WINNER_REWARD: u64 = 50;
/// Flat reward credited to each non-winning active player.
pub const PARTICIPATION_REWARD: u64 = 10;
/// Flat reward for a completed challenge.
pub const CHALLENGE_REWARD: u64 = 25;

/// The outcome of settling one finished game.
#[derive(Debug, Clone, Default)]
pub struct Settlement {
    /// Active players holding the maximum score. Ties share the win.
    pub winners: Vec<UserId>,
    pub earnings: HashMap<UserId, u64>,
    pub completed_challenges: Vec<(UserId, Challenge)>,
}

impl Settlement {
    pub fn earnings_for(&self, user: &UserId) -> u64 {
        self.earnings.get(user).copied().unwrap_or(0)
    }

    /// Builds the final broadcast payload from the settled room.
    pub fn summary(&self, room: &Room) -> GameSummary {
        let winners = self
            .winners
            .iter()
            .filter_map(|u| room.player(u))
            .map(|p| p.display_name.clone())
            .collect();
        let players = room
            .players()
            .iter()
            .map(|p| PlayerReport {
                name: p.display_name.clone(),
                points: p.total_points,
                challenge_completed: p.challenge_completed,
                earnings: self.earnings_for(&p.user_id),
            })
            .collect();
        GameSummary { winners, players }
    }
}

/// Settles a game. Runs once, at the moment the game ends.
///
/// Challenge verification only covers players still active at the end;
/// a mid-game leaver keeps any challenge flag play already awarded but
/// is never verified retroactively. The entry pot counts every roster
/// member, active or not, since their fee was committed at join time.
pub fn settle(room: &mut Room) -> Settlement {
    let max_points = room
        .active_players()
        .map(|p| p.total_points)
        .fold(f64::NEG_INFINITY, f64::max);
    let winners: Vec<UserId> = room
        .active_players()
        .filter(|p| p.total_points == max_points)
        .map(|p| p.user_id.clone())
        .collect();
    let losers: Vec<UserId> = room
        .active_players()
        .filter(|p| !winners.contains(&p.user_id))
        .map(|p| p.user_id.clone())
        .collect();

    let verified: Vec<UserId> = room
        .active_players()
        .filter(|p| {
            p.challenge
                .is_some_and(|c| verify_challenge(c, p, room.quiz()))
        })
        .map(|p| p.user_id.clone())
        .collect();
    for user in &verified {
        room.complete_challenge(user);
    }

    let mut earnings: HashMap<UserId, u64> = HashMap::new();
    for user in &winners {
        *earnings.entry(user.clone()).or_default() += WINNER_REWARD;
    }
    for user in &losers {
        *earnings.entry(user.clone()).or_default() += PARTICIPATION_REWARD;
    }

    let pot = room.entry_price() * room.players().len() as u64;
    if pot > 0 {
        if !winners.is_empty() {
            let share = pot * 2 / 3 / winners.len() as u64;
            for user in &winners {
                *earnings.entry(user.clone()).or_default() += share;
            }
        }
        if !losers.is_empty() {
            let share = pot / 3 / losers.len() as u64;
            for user in &losers {
                *earnings.entry(user.clone()).or_default() += share;
            }
        }
    }

    let completed_challenges: Vec<(UserId, Challenge)> = room
        .players()
        .iter()
        .filter(|p| p.challenge_completed)
        .filter_map(|p| p.challenge.map(|c| (p.user_id.clone(), c)))
        .collect();
    for (user, _) in &completed_challenges {
        *earnings.entry(user.clone()).or_default() += CHALLENGE_REWARD;
    }

    tracing::info!(
        code = %room.code(),
        winners = winners.len(),
        pot,
        challenges = completed_challenges.len(),
        "game settled"
    );

    Settlement {
        winners,
        earnings,
        completed_challenges,
    }
}
