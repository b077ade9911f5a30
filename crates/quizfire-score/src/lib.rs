//! Scoring, challenges, and settlement for Quizfire.
//!
//! Everything in this crate is a pure computation over room state. The
//! orchestrator calls in here and owns all side effects (events, ledger).
//!
//! - [`score_submission`] — type-specific points and status for one answer
//! - [`grade_open_ended`] — maps a host grade (0/50/100) to a verdict
//! - [`eligible_challenges`] / [`draw_challenge`] / [`verify_challenge`]
//! - [`settle`] — winners, prize pool split, challenge bonuses

mod challenge;
mod scoring;
mod settlement;

pub use challenge::{draw_challenge, eligible_challenges, verify_challenge};
pub use scoring::{Grade, Verdict, grade_open_ended, score_submission, BONUS_RATE};
pub use settlement::{
    Settlement, settle, CHALLENGE_REWARD, PARTICIPATION_REWARD, WINNER_REWARD,
};
