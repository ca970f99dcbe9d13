use crate::models::Answer;

use super::action::Action;
use super::state::SessionState;

/// Applies `action` to `state` and returns the resulting state.
///
/// The input is never modified. Actions that need a quiz are ignored while
/// none is set.
pub fn reduce(state: &SessionState, action: Action) -> SessionState {
    match action {
        Action::StartQuiz(quiz) => SessionState {
            time_remaining: quiz.time_limit,
            quiz: Some(quiz),
            current_index: 0,
            answers: Vec::new(),
            started: true,
            completed: false,
            showing_results: false,
            score: 0,
        },
        Action::NextQuestion => match &state.quiz {
            Some(quiz) => {
                let last = quiz.question_count().saturating_sub(1);
                SessionState {
                    current_index: (state.current_index + 1).min(last),
                    ..state.clone()
                }
            }
            None => state.clone(),
        },
        Action::PreviousQuestion => match &state.quiz {
            Some(_) => SessionState {
                current_index: state.current_index.saturating_sub(1),
                ..state.clone()
            },
            None => state.clone(),
        },
        Action::SubmitAnswer(answer) => match &state.quiz {
            Some(_) => SessionState {
                answers: upsert(&state.answers, answer),
                ..state.clone()
            },
            None => state.clone(),
        },
        Action::UpdateTime(seconds) => SessionState {
            time_remaining: seconds.clamp(0, u32::MAX as i64) as u32,
            ..state.clone()
        },
        Action::CompleteQuiz => match &state.quiz {
            Some(quiz) => SessionState {
                completed: true,
                score: percentage(state.correct_count(), quiz.question_count()),
                ..state.clone()
            },
            None => state.clone(),
        },
        Action::ShowResults => SessionState {
            showing_results: true,
            ..state.clone()
        },
        Action::ResetQuiz => SessionState::default(),
    }
}

fn upsert(answers: &[Answer], answer: Answer) -> Vec<Answer> {
    let mut answers = answers.to_vec();
    match answers
        .iter_mut()
        .find(|existing| existing.question_id == answer.question_id)
    {
        Some(existing) => *existing = answer,
        None => answers.push(answer),
    }
    answers
}

/// `round(100 * correct / total)`, rounding halves up, with an empty quiz
/// counted as one question and the result capped at 100.
pub fn percentage(correct: usize, total: usize) -> u32 {
    let total = total.max(1) as u64;
    let correct = correct as u64;
    let rounded = (200 * correct + total) / (2 * total);
    rounded.min(100) as u32
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{AnswerValue, Difficulty, Question, QuestionKind, Quiz};
    use crate::session::Phase;

    fn quiz(questions: usize, time_limit: u32) -> Arc<Quiz> {
        Arc::new(Quiz {
            id: "sample".to_string(),
            title: "Sample".to_string(),
            description: "A sample quiz".to_string(),
            category: "General".to_string(),
            questions: (1..=questions as u32)
                .map(|id| Question {
                    id,
                    prompt: format!("Question {}", id),
                    kind: QuestionKind::MultipleChoice,
                    options: Some(vec!["a".into(), "b".into(), "c".into(), "d".into()]),
                    correct_answer: AnswerValue::Option(0),
                    explanation: String::new(),
                    difficulty: Difficulty::Easy,
                })
                .collect(),
            time_limit,
            color: "cyan".to_string(),
        })
    }

    fn answer(question_id: u32, is_correct: bool) -> Answer {
        Answer {
            question_id,
            value: AnswerValue::Option(if is_correct { 0 } else { 1 }),
            is_correct,
            time_spent: 3,
        }
    }

    fn apply(state: SessionState, actions: Vec<Action>) -> SessionState {
        actions
            .into_iter()
            .fold(state, |state, action| reduce(&state, action))
    }

    fn started(questions: usize) -> SessionState {
        reduce(&SessionState::default(), Action::StartQuiz(quiz(questions, 60)))
    }

    #[test]
    fn test_start_quiz_resets_session() {
        let dirty = SessionState {
            current_index: 3,
            answers: vec![answer(1, true)],
            completed: true,
            showing_results: true,
            score: 80,
            ..SessionState::default()
        };

        let state = reduce(&dirty, Action::StartQuiz(quiz(5, 600)));
        assert_eq!(state.current_index, 0);
        assert!(state.answers.is_empty());
        assert_eq!(state.time_remaining, 600);
        assert!(state.started);
        assert!(!state.completed);
        assert!(!state.showing_results);
        assert_eq!(state.score, 0);
        assert_eq!(state.phase(), Phase::InProgress);
    }

    #[test]
    fn test_reduce_does_not_touch_input() {
        let before = started(3);
        let snapshot = before.clone();
        let _ = reduce(&before, Action::SubmitAnswer(answer(1, true)));
        let _ = reduce(&before, Action::NextQuestion);
        assert_eq!(before, snapshot);
    }

    #[test]
    fn test_navigation_is_clamped() {
        let state = apply(
            started(3),
            vec![
                Action::NextQuestion,
                Action::NextQuestion,
                Action::NextQuestion,
                Action::NextQuestion,
            ],
        );
        assert_eq!(state.current_index, 2);

        let state = apply(
            state,
            vec![
                Action::PreviousQuestion,
                Action::PreviousQuestion,
                Action::PreviousQuestion,
            ],
        );
        assert_eq!(state.current_index, 0);
    }

    #[test]
    fn test_navigation_without_quiz_is_ignored() {
        let idle = SessionState::default();
        assert_eq!(reduce(&idle, Action::NextQuestion), idle);
        assert_eq!(reduce(&idle, Action::PreviousQuestion), idle);
        assert_eq!(reduce(&idle, Action::SubmitAnswer(answer(1, true))), idle);
        assert_eq!(reduce(&idle, Action::CompleteQuiz), idle);
    }

    #[test]
    fn test_submit_answer_upserts() {
        let first = answer(2, false);
        let second = Answer {
            time_spent: 9,
            ..answer(2, true)
        };

        let state = apply(
            started(3),
            vec![
                Action::SubmitAnswer(answer(1, true)),
                Action::SubmitAnswer(first),
                Action::SubmitAnswer(second.clone()),
            ],
        );

        assert_eq!(state.answers.len(), 2);
        assert_eq!(state.answers[0].question_id, 1);
        assert_eq!(state.answers[1], second);
        assert_eq!(
            state.answers.iter().filter(|a| a.question_id == 2).count(),
            1
        );
    }

    #[test]
    fn test_update_time_clamps_at_zero() {
        let state = reduce(&started(1), Action::UpdateTime(-5));
        assert_eq!(state.time_remaining, 0);

        let state = reduce(&state, Action::UpdateTime(42));
        assert_eq!(state.time_remaining, 42);
    }

    #[test]
    fn test_complete_quiz_scores_sixty_percent() {
        let state = apply(
            started(5),
            vec![
                Action::SubmitAnswer(answer(1, true)),
                Action::SubmitAnswer(answer(2, true)),
                Action::SubmitAnswer(answer(3, true)),
                Action::SubmitAnswer(answer(4, false)),
                Action::SubmitAnswer(answer(5, false)),
                Action::CompleteQuiz,
            ],
        );
        assert!(state.completed);
        assert_eq!(state.score, 60);
        assert_eq!(state.phase(), Phase::Completed);
    }

    #[test]
    fn test_unanswered_questions_score_as_incorrect() {
        let state = apply(
            started(3),
            vec![Action::SubmitAnswer(answer(1, true)), Action::CompleteQuiz],
        );
        assert_eq!(state.score, 33);
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(0, 5), 0);
        assert_eq!(percentage(3, 5), 60);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(5, 5), 100);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(4, 2), 100);
    }

    #[test]
    fn test_score_matches_formula_for_every_split() {
        for total in 1..=12usize {
            for correct in 0..=total {
                let mut actions: Vec<Action> = (1..=total as u32)
                    .map(|id| Action::SubmitAnswer(answer(id, id as usize <= correct)))
                    .collect();
                actions.push(Action::CompleteQuiz);
                let state = apply(started(total), actions);

                let expected = (100.0 * correct as f64 / total as f64).round() as u32;
                assert_eq!(state.score, expected, "{} of {}", correct, total);
            }
        }
    }

    #[test]
    fn test_show_results_is_idempotent() {
        let once = reduce(&started(2), Action::ShowResults);
        let twice = reduce(&once, Action::ShowResults);
        assert_eq!(once, twice);
        assert_eq!(twice.phase(), Phase::ResultsShown);
    }

    #[test]
    fn test_reset_from_every_phase() {
        let in_progress = apply(
            started(3),
            vec![Action::NextQuestion, Action::SubmitAnswer(answer(2, true))],
        );
        let completed = reduce(&in_progress, Action::CompleteQuiz);
        let shown = reduce(&completed, Action::ShowResults);

        for state in [SessionState::default(), in_progress, completed, shown] {
            assert_eq!(reduce(&state, Action::ResetQuiz), SessionState::default());
        }
    }

    #[test]
    fn test_tick_and_submit_commute() {
        let base = started(2);
        let tick = Action::UpdateTime(59);
        let submit = Action::SubmitAnswer(answer(1, true));

        let a = apply(base.clone(), vec![tick.clone(), submit.clone()]);
        let b = apply(base, vec![submit, tick]);
        assert_eq!(a, b);
    }
}
