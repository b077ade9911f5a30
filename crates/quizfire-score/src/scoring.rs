//! Pure answer-scoring functions, one rule set per question kind.
//!
//! The duplicate-answer check happens in the room layer before any of this
//! runs; these functions only ever see a first submission.

use quizfire_protocol::{AnswerStatus, Choice, Question, Submission};
use serde::{Deserialize, Serialize};

/// Speed/precision bonus rate: +20% of the question's points.
pub const BONUS_RATE: f64 = 0.20;

/// The computed outcome of scoring one submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Verdict {
    pub points: f64,
    pub bonus: f64,
    pub status: AnswerStatus,
    /// True when this verdict claims the room's one-shot first-perfect
    /// bonus for the current question.
    pub claims_first_perfect: bool,
}

impl Verdict {
    fn miss() -> Self {
        Self {
            points: 0.0,
            bonus: 0.0,
            status: AnswerStatus::Incorrect,
            claims_first_perfect: false,
        }
    }
}

/// Discrete grade a host can assign to an open-ended answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    Zero,
    Fifty,
    Hundred,
}

impl Grade {
    pub fn percent(self) -> f64 {
        match self {
            Self::Zero => 0.0,
            Self::Fifty => 0.5,
            Self::Hundred => 1.0,
        }
    }
}

/// Scores a submission against a question.
///
/// `first_perfect_available` is the room's per-question one-shot flag: when
/// set and the verdict is fully correct on a multiple-choice question, the
/// verdict carries the +20% bonus and claims the flag.
///
/// Open-ended questions are not scored here — they are recorded pending and
/// graded by the host ([`grade_open_ended`]); a free-text submission scores
/// zero until graded.
pub fn score_submission(
    question: &Question,
    submission: &Submission,
    first_perfect_available: bool,
) -> Verdict {
    match (question, submission) {
        (
            Question::MultipleChoice {
                points, choices, ..
            },
            Submission::Choices(selected),
        ) => score_multiple_choice(choices, *points, selected, first_perfect_available),
        (
            Question::NumericEstimate {
                points,
                correct_answer,
                tolerance,
                ..
            },
            Submission::Numeric(value),
        ) => score_numeric_estimate(*correct_answer, *tolerance, *points, *value),
        (Question::OpenEnded { .. }, Submission::Text(_)) => Verdict::miss(),
        // Shape mismatch: treat as a guaranteed miss rather than crash the
        // room over a malformed client payload.
        _ => Verdict::miss(),
    }
}

fn score_multiple_choice(
    choices: &[Choice],
    question_points: f64,
    selected: &[String],
    first_perfect_available: bool,
) -> Verdict {
    let correct_total = choices.iter().filter(|c| c.is_correct).count();
    let selected_correct = selected
        .iter()
        .filter(|s| choices.iter().any(|c| c.is_correct && &c.text == *s))
        .count();
    let selected_wrong = selected.len() - selected_correct;

    let status = match (selected_correct, selected_wrong) {
        (c, 0) if c == correct_total && c > 0 => AnswerStatus::Correct,
        (c, 0) if c > 0 => AnswerStatus::PartiallyCorrect,
        (c, w) if c > 0 && w > 0 => AnswerStatus::PartiallyIncorrect,
        _ => AnswerStatus::Incorrect,
    };

    let earned = if correct_total == 0 {
        0.0
    } else {
        let share = selected_correct as f64 / correct_total as f64;
        let penalty = selected_wrong as f64 / choices.len() as f64;
        ((share - penalty) * question_points).max(0.0)
    };

    let claims = status == AnswerStatus::Correct && first_perfect_available;
    Verdict {
        points: earned,
        bonus: if claims { question_points * BONUS_RATE } else { 0.0 },
        status,
        claims_first_perfect: claims,
    }
}

fn score_numeric_estimate(
    correct_answer: f64,
    tolerance: f64,
    question_points: f64,
    value: Option<f64>,
) -> Verdict {
    // A missing submission is a guaranteed miss.
    let diff = value.map_or(tolerance + 1.0, |v| (v - correct_answer).abs());

    if diff == 0.0 {
        Verdict {
            points: question_points,
            bonus: question_points * BONUS_RATE,
            status: AnswerStatus::Correct,
            claims_first_perfect: false,
        }
    } else if diff <= tolerance {
        Verdict {
            points: question_points,
            bonus: 0.0,
            status: AnswerStatus::PartiallyCorrect,
            claims_first_perfect: false,
        }
    } else {
        Verdict::miss()
    }
}

/// Maps a host-assigned grade to a verdict for an open-ended answer.
pub fn grade_open_ended(question_points: f64, grade: Grade) -> Verdict {
    let status = match grade {
        Grade::Zero => AnswerStatus::Incorrect,
        Grade::Fifty => AnswerStatus::PartiallyCorrect,
        Grade::Hundred => AnswerStatus::Correct,
    };
    Verdict {
        points: question_points * grade.percent(),
        bonus: 0.0,
        status,
        claims_first_perfect: false,
    }
}
