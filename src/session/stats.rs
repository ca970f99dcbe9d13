//! Figures derived from a session for the header and the results screen.

use crate::models::{Answer, Question};

use super::state::SessionState;

/// Seconds left below which the clock is shown as a warning.
pub const CLOCK_WARNING_SECONDS: u32 = 60;

/// Score bands used to color the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTier {
    High,
    Mid,
    Low,
}

impl ScoreTier {
    pub fn for_score(score: u32) -> Self {
        match score {
            80.. => ScoreTier::High,
            60..=79 => ScoreTier::Mid,
            _ => ScoreTier::Low,
        }
    }
}

pub fn score_message(score: u32) -> &'static str {
    match score {
        90.. => "Outstanding!",
        80..=89 => "Great job!",
        70..=79 => "Good work!",
        60..=69 => "Not bad!",
        _ => "Keep practicing!",
    }
}

/// Summary of a finished attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultsSummary {
    pub title: String,
    /// The score frozen at completion, not recomputed here.
    pub score: u32,
    pub total: usize,
    pub correct: usize,
    /// Includes unanswered questions.
    pub incorrect: usize,
    pub answered: usize,
    /// Mean seconds per answered question, zero when nothing was answered.
    pub average_time: f64,
}

impl ResultsSummary {
    pub fn from_state(state: &SessionState) -> Option<Self> {
        let quiz = state.quiz.as_ref()?;
        let total = quiz.question_count();
        let correct = state.correct_count();

        Some(Self {
            title: quiz.title.clone(),
            score: state.score,
            total,
            correct,
            incorrect: total.saturating_sub(correct),
            answered: state.answers.len(),
            average_time: average_time(&state.answers),
        })
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_score(self.score)
    }

    pub fn message(&self) -> &'static str {
        score_message(self.score)
    }
}

pub fn average_time(answers: &[Answer]) -> f64 {
    if answers.is_empty() {
        return 0.0;
    }
    let total: u64 = answers.iter().map(|answer| answer.time_spent).sum();
    total as f64 / answers.len() as f64
}

/// One row of the per-question review.
#[derive(Debug, Clone, Copy)]
pub struct ReviewItem<'a> {
    /// 1-based.
    pub number: usize,
    pub question: &'a Question,
    pub answer: Option<&'a Answer>,
}

impl ReviewItem<'_> {
    pub fn is_correct(&self) -> bool {
        self.answer.is_some_and(|answer| answer.is_correct)
    }
}

/// Every question of the current quiz in order, paired with its answer.
pub fn review(state: &SessionState) -> Vec<ReviewItem<'_>> {
    let Some(quiz) = state.quiz.as_ref() else {
        return Vec::new();
    };

    quiz.questions
        .iter()
        .enumerate()
        .map(|(index, question)| ReviewItem {
            number: index + 1,
            question,
            answer: state.answer_for(question.id),
        })
        .collect()
}

/// Bands for the remaining-time gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeTier {
    Plenty,
    Low,
    Critical,
}

/// Progress and clock figures for the quiz header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderStats {
    /// 1-based.
    pub question_number: usize,
    pub total: usize,
    pub answered: usize,
    /// Percent of questions reached, `0.0..=100.0`.
    pub progress: f64,
    /// Percent of the time limit left, `0.0..=100.0`.
    pub time_left: f64,
    pub time_remaining: u32,
}

impl HeaderStats {
    pub fn from_state(state: &SessionState) -> Option<Self> {
        let quiz = state.quiz.as_ref()?;
        let total = quiz.question_count();
        let question_number = state.current_index + 1;

        Some(Self {
            question_number,
            total,
            answered: state.answers.len(),
            progress: percent_of(question_number as f64, total as f64),
            time_left: percent_of(state.time_remaining as f64, quiz.time_limit as f64),
            time_remaining: state.time_remaining,
        })
    }

    pub fn time_tier(&self) -> TimeTier {
        if self.time_left < 20.0 {
            TimeTier::Critical
        } else if self.time_left < 50.0 {
            TimeTier::Low
        } else {
            TimeTier::Plenty
        }
    }

    pub fn clock(&self) -> String {
        format_clock(self.time_remaining)
    }

    pub fn clock_warning(&self) -> bool {
        self.time_remaining < CLOCK_WARNING_SECONDS
    }
}

fn percent_of(part: f64, whole: f64) -> f64 {
    if whole <= 0.0 {
        return 0.0;
    }
    (part * 100.0 / whole).clamp(0.0, 100.0)
}

/// `MM:SS`.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
