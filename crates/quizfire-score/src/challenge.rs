//! Challenge eligibility, assignment, and settlement-time verification.

use quizfire_protocol::{AnswerStatus, Challenge, Question, QuestionKind};
use quizfire_room::Player;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Minimum quiz size before the all-multiple-choice challenge becomes
/// assignable. The threshold counts every question kind even though
/// verification scans only multiple-choice answers; the asymmetry is
/// inherited product behavior.
const ALL_QCM_MIN_QUESTIONS: usize = 4;

/// The challenges this quiz's composition supports.
pub fn eligible_challenges(quiz: &[Question]) -> Vec<Challenge> {
    let mut out = vec![Challenge::Flawless];
    if quiz.len() >= 3 {
        out.push(Challenge::ThreeInARow);
    }
    if quiz.len() >= ALL_QCM_MIN_QUESTIONS {
        out.push(Challenge::AllMultipleChoiceCorrect);
    }
    if quiz.iter().any(|q| q.kind() == QuestionKind::OpenEnded) {
        out.push(Challenge::PerfectOpenEnded);
    }
    if quiz.iter().any(|q| q.kind() == QuestionKind::NumericEstimate) {
        out.push(Challenge::PerfectFastNumeric);
    }
    out
}

/// Draws one challenge uniformly from the quiz-supported subset.
pub fn draw_challenge(quiz: &[Question], rng: &mut impl Rng) -> Challenge {
    *eligible_challenges(quiz)
        .choose(rng)
        .expect("Flawless is always eligible")
}

/// Settlement-time verification of a player's assigned challenge.
///
/// The two opportunistic challenges (perfect open-ended, perfect-fast
/// numeric) are awarded during play the moment they trigger; here they
/// simply keep whatever flag play set.
pub fn verify_challenge(challenge: Challenge, player: &Player, quiz: &[Question]) -> bool {
    match challenge {
        Challenge::ThreeInARow => player
            .answers
            .windows(3)
            .any(|w| w.iter().all(|a| a.status == AnswerStatus::Correct)),
        Challenge::AllMultipleChoiceCorrect => quiz
            .iter()
            .enumerate()
            .filter(|(_, q)| q.kind() == QuestionKind::MultipleChoice)
            .all(|(i, _)| {
                player
                    .answer_for(i)
                    .is_some_and(|a| a.status == AnswerStatus::Correct)
            }),
        Challenge::Flawless => player
            .answers
            .iter()
            .all(|a| a.status == AnswerStatus::Correct),
        Challenge::PerfectOpenEnded | Challenge::PerfectFastNumeric => {
            player.challenge_completed
        }
    }
}
