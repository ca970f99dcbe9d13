use std::sync::Arc;

use crate::models::{Answer, Quiz};

/// Everything that can change a session.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Begin a fresh attempt at `quiz`.
    StartQuiz(Arc<Quiz>),
    NextQuestion,
    PreviousQuestion,
    /// Record an answer, replacing any earlier one for the same question.
    SubmitAnswer(Answer),
    /// Set the remaining seconds. Negative values clamp to zero.
    UpdateTime(i64),
    /// Freeze the score.
    CompleteQuiz,
    ShowResults,
    /// Back to the idle state.
    ResetQuiz,
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::StartQuiz(_) => "start_quiz",
            Action::NextQuestion => "next_question",
            Action::PreviousQuestion => "previous_question",
            Action::SubmitAnswer(_) => "submit_answer",
            Action::UpdateTime(_) => "update_time",
            Action::CompleteQuiz => "complete_quiz",
            Action::ShowResults => "show_results",
            Action::ResetQuiz => "reset_quiz",
        }
    }
}
