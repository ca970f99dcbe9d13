use std::sync::Arc;
use std::time::Instant;

use crate::data::Catalog;
use crate::models::{Answer, AnswerValue, Question, Quiz};
use crate::session::{Action, Phase, SessionState, Store};
use crate::timer::{self, Tick};

/// Screen-level state around the session store.
///
/// Everything that changes the session goes through [`Store::dispatch`]; the
/// fields here only track cursors and the timing baseline for the question
/// on screen.
pub struct App {
    store: Store,
    catalog: Catalog,
    catalog_cursor: usize,
    option_cursor: usize,
    /// Rows scrolled in the results review.
    results_scroll: usize,
    /// Largest useful scroll, measured when the review is drawn.
    results_scroll_limit: usize,
    question_shown_at: Instant,
    timer_generation: u64,
}

impl App {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            store: Store::new(),
            catalog,
            catalog_cursor: 0,
            option_cursor: 0,
            results_scroll: 0,
            results_scroll_limit: 0,
            question_shown_at: Instant::now(),
            timer_generation: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        self.store.state()
    }

    pub fn phase(&self) -> Phase {
        self.store.state().phase()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn catalog_cursor(&self) -> usize {
        self.catalog_cursor
    }

    pub fn option_cursor(&self) -> usize {
        self.option_cursor
    }

    pub fn results_scroll(&self) -> usize {
        self.results_scroll
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.store.state().current_question()
    }

    pub fn current_answer(&self) -> Option<&Answer> {
        self.store.state().current_answer()
    }

    pub fn can_go_next(&self) -> bool {
        self.phase() == Phase::InProgress && self.current_answer().is_some()
    }

    pub fn can_go_previous(&self) -> bool {
        self.phase() == Phase::InProgress && self.store.state().current_index > 0
    }

    // Catalog screen

    pub fn select_next_quiz(&mut self) {
        if !self.catalog.is_empty() {
            self.catalog_cursor = (self.catalog_cursor + 1) % self.catalog.len();
        }
    }

    pub fn select_previous_quiz(&mut self) {
        let len = self.catalog.len();
        if len > 0 {
            self.catalog_cursor = (self.catalog_cursor + len - 1) % len;
        }
    }

    pub fn start_selected_quiz(&mut self) {
        if let Some(quiz) = self.catalog.quizzes().get(self.catalog_cursor).cloned() {
            self.start_quiz(quiz);
        }
    }

    /// Starts the quiz with the given id. Returns `false` if the catalog has no such quiz.
    pub fn start_quiz_by_id(&mut self, id: &str) -> bool {
        let Some(position) = self.catalog.position(id) else {
            return false;
        };
        self.catalog_cursor = position;
        self.start_selected_quiz();
        true
    }

    fn start_quiz(&mut self, quiz: Arc<Quiz>) {
        tracing::info!(quiz = %quiz.id, questions = quiz.question_count(), "starting quiz");
        self.timer_generation += 1;
        self.reset_results_scroll();
        self.store.dispatch(Action::StartQuiz(quiz));
        self.question_changed(Instant::now());
        timer::enforce_deadline(&mut self.store);
    }

    // Quiz screen

    pub fn select_next_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + 1) % count;
        }
    }

    pub fn select_previous_option(&mut self) {
        let count = self.option_count();
        if count > 0 {
            self.option_cursor = (self.option_cursor + count - 1) % count;
        }
    }

    fn option_count(&self) -> usize {
        self.current_question().map_or(0, Question::option_count)
    }

    /// Submits the option under the cursor.
    pub fn submit_selected(&mut self) {
        self.submit_option_at(self.option_cursor, Instant::now());
    }

    /// Submits the option at `position` in display order.
    pub fn submit_option(&mut self, position: usize) {
        self.submit_option_at(position, Instant::now());
    }

    /// Answers a true/false question. Ignored for multiple-choice questions.
    pub fn submit_boolean(&mut self, value: bool) {
        let position = self
            .current_question()
            .and_then(|question| question.position_of(&AnswerValue::boolean(value)));
        if let Some(position) = position {
            self.submit_option_at(position, Instant::now());
        }
    }

    fn submit_option_at(&mut self, position: usize, now: Instant) {
        let Some(value) = self
            .current_question()
            .and_then(|question| question.value_at(position))
        else {
            return;
        };
        self.option_cursor = position;
        self.submit_value_at(value, now);
    }

    /// Records `value` for the current question, timed from when it was shown.
    pub fn submit_value_at(&mut self, value: AnswerValue, now: Instant) {
        if self.phase() != Phase::InProgress {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };

        let answer = Answer {
            question_id: question.id,
            is_correct: question.is_correct(&value),
            value,
            time_spent: now.saturating_duration_since(self.question_shown_at).as_secs(),
        };
        tracing::debug!(
            question = answer.question_id,
            correct = answer.is_correct,
            seconds = answer.time_spent,
            "answer submitted"
        );
        self.store.dispatch(Action::SubmitAnswer(answer));
    }

    /// Moves to the next question, or finishes the quiz on the last one.
    ///
    /// Does nothing until the current question has an answer.
    pub fn next_question(&mut self) {
        self.next_question_at(Instant::now());
    }

    pub fn next_question_at(&mut self, now: Instant) {
        if !self.can_go_next() {
            return;
        }

        if self.store.state().is_last_question() {
            self.finish();
        } else {
            self.store.dispatch(Action::NextQuestion);
            self.question_changed(now);
        }
    }

    pub fn previous_question(&mut self) {
        self.previous_question_at(Instant::now());
    }

    pub fn previous_question_at(&mut self, now: Instant) {
        if !self.can_go_previous() {
            return;
        }
        self.store.dispatch(Action::PreviousQuestion);
        self.question_changed(now);
    }

    fn finish(&mut self) {
        self.store.dispatch(Action::CompleteQuiz);
        self.store.dispatch(Action::ShowResults);
        let state = self.store.state();
        tracing::info!(score = state.score, answered = state.answers.len(), "quiz finished");
    }

    fn question_changed(&mut self, now: Instant) {
        let cursor = match (self.current_question(), self.current_answer()) {
            (Some(question), Some(answer)) => question.position_of(&answer.value).unwrap_or(0),
            _ => 0,
        };
        self.question_shown_at = now;
        self.option_cursor = cursor;
    }

    /// Leaves the quiz, discarding the attempt.
    pub fn abandon(&mut self) {
        tracing::info!("quiz abandoned");
        self.go_home();
    }

    // Results screen

    pub fn scroll_results_down(&mut self) {
        self.results_scroll = (self.results_scroll + 1).min(self.results_scroll_limit);
    }

    pub fn scroll_results_up(&mut self) {
        self.results_scroll = self.results_scroll.saturating_sub(1);
    }

    /// Starts the same quiz again from scratch.
    pub fn retake(&mut self) {
        let Some(quiz) = self.store.state().quiz.clone() else {
            return;
        };
        self.store.dispatch(Action::ResetQuiz);
        self.start_quiz(quiz);
    }

    pub fn go_home(&mut self) {
        self.store.dispatch(Action::ResetQuiz);
        self.option_cursor = 0;
        self.reset_results_scroll();
    }

    /// Records how far the review can scroll for the size it was last drawn at.
    pub(crate) fn set_results_scroll_limit(&mut self, limit: usize) {
        self.results_scroll_limit = limit;
        self.results_scroll = self.results_scroll.min(limit);
    }

    fn reset_results_scroll(&mut self) {
        self.results_scroll = 0;
        self.results_scroll_limit = 0;
    }

    // Timer

    /// Whether a ticker should be running for the current attempt.
    pub fn timer_active(&self) -> bool {
        self.phase() == Phase::InProgress
    }

    /// Changes whenever a new attempt starts, so ticks from an older ticker can be told apart.
    pub fn timer_generation(&self) -> u64 {
        self.timer_generation
    }

    pub fn on_tick(&mut self, tick: Tick) {
        if tick.0 != self.timer_generation {
            tracing::debug!(
                stale = tick.0,
                current = self.timer_generation,
                "ignoring tick from a stopped ticker"
            );
            return;
        }
        timer::advance(&mut self.store);
    }
}
