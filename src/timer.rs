//! Quiz countdown.
//!
//! [`advance`] is the per-second step applied to a [`Store`]; [`Ticker`] is
//! the background interval that tells the event loop when to apply it.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use crate::session::{Action, Phase, Store};

/// Default countdown period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

/// One elapsed period, tagged with the generation of the ticker that sent it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick(pub u64);

/// Takes one second off the clock if the quiz is running.
///
/// Reads the remaining time from the store on every call, so changes made
/// elsewhere are picked up.
pub fn tick(store: &mut Store) -> bool {
    let state = store.state();
    if !state.is_timed() || state.time_remaining == 0 {
        return false;
    }

    let remaining = i64::from(state.time_remaining) - 1;
    store.dispatch(Action::UpdateTime(remaining));
    true
}

/// Completes the quiz and shows the results once the clock reads zero.
///
/// Questions without an answer count as incorrect.
pub fn enforce_deadline(store: &mut Store) -> bool {
    let state = store.state();
    if state.phase() != Phase::InProgress || state.time_remaining > 0 {
        return false;
    }

    tracing::info!(
        answered = state.answers.len(),
        total = state.question_count(),
        "time is up, submitting quiz"
    );
    store.dispatch(Action::CompleteQuiz);
    store.dispatch(Action::ShowResults);
    true
}

/// The per-second step: [`tick`] then [`enforce_deadline`].
pub fn advance(store: &mut Store) {
    tick(store);
    enforce_deadline(store);
}

/// A repeating timer task that lives as long as this value.
///
/// Dropping the ticker aborts the task, so at most one ticker per quiz
/// attempt exists as long as the owner replaces or drops it when the attempt
/// ends.
#[derive(Debug)]
pub struct Ticker {
    generation: u64,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Starts sending `Tick(generation)` every `period`, first after one full period.
    pub fn spawn(period: Duration, generation: u64, tx: mpsc::UnboundedSender<Tick>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if tx.send(Tick(generation)).is_err() {
                    break;
                }
            }
        });

        tracing::debug!(generation, ?period, "ticker started");
        Self { generation, handle }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(generation = self.generation, "ticker stopped");
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::models::{Answer, AnswerValue, Difficulty, Question, QuestionKind, Quiz};

    fn quiz(time_limit: u32) -> Arc<Quiz> {
        Arc::new(Quiz {
            id: "short".to_string(),
            title: "Short".to_string(),
            description: String::new(),
            category: "General".to_string(),
            questions: (1..=3)
                .map(|id| Question {
                    id,
                    prompt: format!("Statement {}", id),
                    kind: QuestionKind::TrueFalse,
                    options: None,
                    correct_answer: AnswerValue::boolean(true),
                    explanation: String::new(),
                    difficulty: Difficulty::Hard,
                })
                .collect(),
            time_limit,
            color: "green".to_string(),
        })
    }

    fn started(time_limit: u32) -> Store {
        let mut store = Store::new();
        store.dispatch(Action::StartQuiz(quiz(time_limit)));
        store
    }

    #[test]
    fn test_tick_decrements_by_one() {
        let mut store = started(10);
        assert!(tick(&mut store));
        assert!(tick(&mut store));
        assert_eq!(store.state().time_remaining, 8);
    }

    #[test]
    fn test_tick_reads_current_time() {
        let mut store = started(10);
        store.dispatch(Action::UpdateTime(3));
        tick(&mut store);
        assert_eq!(store.state().time_remaining, 2);
    }

    #[test]
    fn test_tick_is_idle_outside_a_running_quiz() {
        let mut store = Store::new();
        assert!(!tick(&mut store));

        let mut store = started(10);
        store.dispatch(Action::CompleteQuiz);
        assert!(!tick(&mut store));
        assert_eq!(store.state().time_remaining, 10);
    }

    #[test]
    fn test_timeout_forces_submission() {
        let mut store = started(1);
        store.dispatch(Action::NextQuestion);

        advance(&mut store);

        let state = store.state();
        assert!(state.completed);
        assert!(state.showing_results);
        assert_eq!(state.score, 0);
        assert_eq!(state.current_index, 1);
        assert_eq!(state.time_remaining, 0);
    }

    #[test]
    fn test_timeout_keeps_submitted_answers() {
        let mut store = started(1);
        store.dispatch(Action::SubmitAnswer(Answer {
            question_id: 1,
            value: AnswerValue::boolean(true),
            is_correct: true,
            time_spent: 1,
        }));

        advance(&mut store);
        assert_eq!(store.state().score, 33);
    }

    #[test]
    fn test_deadline_ignored_when_idle_or_done() {
        let mut store = Store::new();
        assert!(!enforce_deadline(&mut store));
        assert!(!store.state().completed);

        let mut store = started(1);
        store.dispatch(Action::UpdateTime(0));
        assert!(enforce_deadline(&mut store));
        assert!(!enforce_deadline(&mut store));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticker_sends_tagged_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _ticker = Ticker::spawn(TICK_PERIOD, 7, tx);

        let started = Instant::now();
        assert_eq!(rx.recv().await, Some(Tick(7)));
        assert_eq!(rx.recv().await, Some(Tick(7)));
        assert_eq!(started.elapsed(), Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_ticker_stops_ticks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let ticker = Ticker::spawn(TICK_PERIOD, 1, tx);
        assert_eq!(rx.recv().await, Some(Tick(1)));

        drop(ticker);
        assert_eq!(rx.recv().await, None);
    }
}
