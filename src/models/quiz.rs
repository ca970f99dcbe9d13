use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use super::question::{Question, QuestionError};

/// Reasons a quiz definition is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizValidationError {
    #[error("quiz has no questions")]
    NoQuestions,
    #[error("quiz time limit must be at least one second")]
    ZeroTimeLimit,
    #[error("question id {0} is used more than once")]
    DuplicateQuestionId(u32),
    #[error("question {id}: {source}")]
    Question {
        id: u32,
        #[source]
        source: QuestionError,
    },
}

/// A quiz from the catalog. Never modified once loaded.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quiz {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    /// Navigation order.
    pub questions: Vec<Question>,
    /// Seconds.
    pub time_limit: u32,
    /// Color name used to tint the quiz in the catalog, e.g. `yellow`.
    pub color: String,
}

impl Quiz {
    pub fn validate(&self) -> Result<(), QuizValidationError> {
        if self.questions.is_empty() {
            return Err(QuizValidationError::NoQuestions);
        }
        if self.time_limit == 0 {
            return Err(QuizValidationError::ZeroTimeLimit);
        }

        let mut seen = HashSet::with_capacity(self.questions.len());
        for question in &self.questions {
            if !seen.insert(question.id) {
                return Err(QuizValidationError::DuplicateQuestionId(question.id));
            }
            question
                .validate()
                .map_err(|source| QuizValidationError::Question {
                    id: question.id,
                    source,
                })?;
        }

        Ok(())
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    pub fn question(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Whole minutes, as shown on the catalog cards.
    pub fn minutes(&self) -> u32 {
        self.time_limit / 60
    }
}
