//! The question model: a tagged union over the three supported kinds.
//!
//! The wire discriminators (`QCM`, `QRE`, `QRL`) are kept for compatibility
//! with the quiz subsystem that authors the content:
//!
//! - `QCM` — multiple choice, each choice flagged correct or not.
//! - `QRE` — numeric estimate with a correct value, bounds, and tolerance.
//! - `QRL` — free text, graded 0/50/100 by the host after the fact.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How long an open-ended question runs, regardless of the quiz setting.
/// Graders need a longer response window than choice questions.
pub const OPEN_ENDED_DURATION_SECS: u64 = 60;

/// One selectable choice in a multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Choice {
    pub text: String,
    pub is_correct: bool,
}

/// A quiz question. Owned by the quiz subsystem, immutable once a game
/// starts (the engine shuffles the question order exactly once at start).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    #[serde(rename = "QCM", rename_all = "camelCase")]
    MultipleChoice {
        text: String,
        points: f64,
        /// Per-question countdown duration from the quiz settings.
        duration_secs: u64,
        choices: Vec<Choice>,
    },

    #[serde(rename = "QRE", rename_all = "camelCase")]
    NumericEstimate {
        text: String,
        points: f64,
        duration_secs: u64,
        correct_answer: f64,
        lower_bound: f64,
        upper_bound: f64,
        tolerance: f64,
    },

    #[serde(rename = "QRL", rename_all = "camelCase")]
    OpenEnded { text: String, points: f64 },
}

/// The kind of a question, without its content. Drives panic-mode
/// thresholds and timeout-submission shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    MultipleChoice,
    NumericEstimate,
    OpenEnded,
}

impl Question {
    pub fn kind(&self) -> QuestionKind {
        match self {
            Self::MultipleChoice { .. } => QuestionKind::MultipleChoice,
            Self::NumericEstimate { .. } => QuestionKind::NumericEstimate,
            Self::OpenEnded { .. } => QuestionKind::OpenEnded,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::MultipleChoice { text, .. }
            | Self::NumericEstimate { text, .. }
            | Self::OpenEnded { text, .. } => text,
        }
    }

    pub fn points(&self) -> f64 {
        match self {
            Self::MultipleChoice { points, .. }
            | Self::NumericEstimate { points, .. }
            | Self::OpenEnded { points, .. } => *points,
        }
    }

    /// Countdown duration for this question. Choice and estimate questions
    /// use the quiz-configured duration; open-ended questions always get
    /// the longer fixed window.
    pub fn duration(&self) -> Duration {
        match self {
            Self::MultipleChoice { duration_secs, .. }
            | Self::NumericEstimate { duration_secs, .. } => {
                Duration::from_secs(*duration_secs)
            }
            Self::OpenEnded { .. } => Duration::from_secs(OPEN_ENDED_DURATION_SECS),
        }
    }

    /// The client-safe projection of this question, with correctness
    /// information stripped.
    pub fn view(&self) -> QuestionView {
        match self {
            Self::MultipleChoice {
                text,
                points,
                choices,
                ..
            } => QuestionView {
                kind: QuestionKind::MultipleChoice,
                text: text.clone(),
                points: *points,
                choices: choices
                    .iter()
                    .map(|c| ChoiceView {
                        text: c.text.clone(),
                    })
                    .collect(),
                bounds: None,
            },
            Self::NumericEstimate {
                text,
                points,
                lower_bound,
                upper_bound,
                ..
            } => QuestionView {
                kind: QuestionKind::NumericEstimate,
                text: text.clone(),
                points: *points,
                choices: Vec::new(),
                bounds: Some((*lower_bound, *upper_bound)),
            },
            Self::OpenEnded { text, points } => QuestionView {
                kind: QuestionKind::OpenEnded,
                text: text.clone(),
                points: *points,
                choices: Vec::new(),
                bounds: None,
            },
        }
    }
}

/// A choice as broadcast to players — no correctness flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceView {
    pub text: String,
}

/// A question as broadcast to players.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionView {
    pub kind: QuestionKind,
    pub text: String,
    pub points: f64,
    pub choices: Vec<ChoiceView>,
    /// `(lower, upper)` for numeric-estimate questions.
    pub bounds: Option<(f64, f64)>,
}
