use super::question::AnswerValue;

/// A recorded answer. The session keeps at most one per question id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub question_id: u32,
    pub value: AnswerValue,
    /// Decided when the answer is submitted.
    pub is_correct: bool,
    /// Whole seconds spent on the question during the visit it was submitted in.
    pub time_spent: u64,
}
