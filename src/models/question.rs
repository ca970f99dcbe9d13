use serde::Deserialize;
use thiserror::Error;

const TRUE_FALSE_OPTIONS: [&str; 2] = ["True", "False"];

/// How a question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionKind {
    MultipleChoice,
    TrueFalse,
}

impl QuestionKind {
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "Multiple Choice",
            QuestionKind::TrueFalse => "True/False",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A submitted or expected answer.
///
/// Multiple-choice questions are answered with an option index, true/false
/// questions with the strings `"true"` or `"false"`. The two never compare
/// equal to each other.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Option(usize),
    Text(String),
}

impl AnswerValue {
    pub fn boolean(value: bool) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

/// Broken question invariants found while validating a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error("multiple-choice question has no options")]
    MissingOptions,
    #[error("correct answer {index} is out of range for {len} options")]
    CorrectIndexOutOfRange { index: usize, len: usize },
    #[error("multiple-choice question must use an option index as its correct answer")]
    ExpectedIndex,
    #[error("true/false question must use \"true\" or \"false\" as its correct answer, got {0:?}")]
    InvalidBoolean(String),
    #[error("true/false question must not list options")]
    UnexpectedOptions,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: u32,
    #[serde(rename = "question")]
    pub prompt: String,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(default)]
    pub options: Option<Vec<String>>,
    pub correct_answer: AnswerValue,
    pub explanation: String,
    pub difficulty: Difficulty,
}

impl Question {
    pub fn validate(&self) -> Result<(), QuestionError> {
        match self.kind {
            QuestionKind::MultipleChoice => {
                let options = match &self.options {
                    Some(options) if !options.is_empty() => options,
                    _ => return Err(QuestionError::MissingOptions),
                };
                match &self.correct_answer {
                    AnswerValue::Option(index) if *index < options.len() => Ok(()),
                    AnswerValue::Option(index) => Err(QuestionError::CorrectIndexOutOfRange {
                        index: *index,
                        len: options.len(),
                    }),
                    AnswerValue::Text(_) => Err(QuestionError::ExpectedIndex),
                }
            }
            QuestionKind::TrueFalse => {
                if self.options.is_some() {
                    return Err(QuestionError::UnexpectedOptions);
                }
                match &self.correct_answer {
                    AnswerValue::Text(text) if text == "true" || text == "false" => Ok(()),
                    AnswerValue::Text(text) => Err(QuestionError::InvalidBoolean(text.clone())),
                    AnswerValue::Option(index) => {
                        Err(QuestionError::InvalidBoolean(index.to_string()))
                    }
                }
            }
        }
    }

    /// The choices a player picks from, in display order.
    pub fn options_for_display(&self) -> Vec<&str> {
        match self.kind {
            QuestionKind::MultipleChoice => self
                .options
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(String::as_str)
                .collect(),
            QuestionKind::TrueFalse => TRUE_FALSE_OPTIONS.to_vec(),
        }
    }

    pub fn option_count(&self) -> usize {
        match self.kind {
            QuestionKind::MultipleChoice => self.options.as_ref().map_or(0, Vec::len),
            QuestionKind::TrueFalse => TRUE_FALSE_OPTIONS.len(),
        }
    }

    /// Maps a display position to the value submitted for it.
    pub fn value_at(&self, position: usize) -> Option<AnswerValue> {
        if position >= self.option_count() {
            return None;
        }
        match self.kind {
            QuestionKind::MultipleChoice => Some(AnswerValue::Option(position)),
            QuestionKind::TrueFalse => Some(AnswerValue::boolean(position == 0)),
        }
    }

    /// Inverse of [`Question::value_at`].
    pub fn position_of(&self, value: &AnswerValue) -> Option<usize> {
        (0..self.option_count()).find(|&position| self.value_at(position).as_ref() == Some(value))
    }

    pub fn is_correct(&self, value: &AnswerValue) -> bool {
        self.correct_answer == *value
    }

    /// Human readable label for an answer value, e.g. `B. pop()` or `True`.
    pub fn describe(&self, value: &AnswerValue) -> String {
        match (self.position_of(value), self.kind) {
            (Some(position), QuestionKind::MultipleChoice) => {
                let text = self.options_for_display()[position];
                format!("{}. {}", option_letter(position), text)
            }
            (Some(position), QuestionKind::TrueFalse) => TRUE_FALSE_OPTIONS[position].to_string(),
            (None, _) => match value {
                AnswerValue::Option(index) => format!("option {}", index + 1),
                AnswerValue::Text(text) => text.clone(),
            },
        }
    }
}

/// `A`, `B`, `C`, ... for option positions.
pub fn option_letter(position: usize) -> char {
    (b'A' + (position % 26) as u8) as char
}
