mod answer;
mod question;
mod quiz;

pub use answer::Answer;
pub use question::{option_letter, AnswerValue, Difficulty, Question, QuestionError, QuestionKind};
pub use quiz::{Quiz, QuizValidationError};
