use std::sync::Arc;

use crate::models::{Answer, Question, Quiz};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No quiz chosen yet.
    Idle,
    /// Answering questions while the clock runs.
    InProgress,
    /// Score frozen, results not yet shown.
    Completed,
    ResultsShown,
}

/// One player's attempt at a quiz.
///
/// The default value is the idle state the application starts in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub quiz: Option<Arc<Quiz>>,
    /// Always within `0..question_count` while a quiz is set.
    pub current_index: usize,
    /// At most one answer per question id, in first-submission order.
    pub answers: Vec<Answer>,
    pub time_remaining: u32,
    pub started: bool,
    pub completed: bool,
    pub showing_results: bool,
    /// Percentage in `0..=100`, fixed when the quiz completes.
    pub score: u32,
}

impl SessionState {
    pub fn phase(&self) -> Phase {
        if self.showing_results {
            Phase::ResultsShown
        } else if self.completed {
            Phase::Completed
        } else if self.started && self.quiz.is_some() {
            Phase::InProgress
        } else {
            Phase::Idle
        }
    }

    pub fn question_count(&self) -> usize {
        self.quiz.as_ref().map_or(0, |quiz| quiz.question_count())
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.quiz.as_ref()?.question(self.current_index)
    }

    pub fn answer_for(&self, question_id: u32) -> Option<&Answer> {
        self.answers
            .iter()
            .find(|answer| answer.question_id == question_id)
    }

    pub fn current_answer(&self) -> Option<&Answer> {
        self.answer_for(self.current_question()?.id)
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 >= self.question_count()
    }

    pub fn correct_count(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_correct).count()
    }

    /// True while the countdown should be running.
    pub fn is_timed(&self) -> bool {
        self.started && !self.completed && self.quiz.is_some()
    }
}
