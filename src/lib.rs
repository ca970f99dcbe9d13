//! # quiz-master
//!
//! A terminal quiz: pick a quiz from the catalog, answer timed
//! multiple-choice and true/false questions, then review the score.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quiz_master::{QuizApp, QuizError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     // The quizzes shipped with the crate
//!     let quiz = QuizApp::builtin()?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run().await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! The session logic is usable without a terminal:
//!
//! ```rust
//! use quiz_master::data::Catalog;
//! use quiz_master::session::{Action, Store};
//!
//! let catalog = Catalog::builtin().unwrap();
//! let mut store = Store::new();
//! store.dispatch(Action::StartQuiz(catalog.get("react").unwrap().clone()));
//! store.dispatch(Action::CompleteQuiz);
//! assert_eq!(store.state().score, 0);
//! ```

mod app;
pub mod data;
pub mod models;
pub mod session;
pub mod terminal;
pub mod timer;
mod ui;

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use futures_util::StreamExt;
use thiserror::Error;
use tokio::sync::mpsc;

pub use app::App;
pub use data::{load_catalog_from_json, Catalog, LoadError};
pub use models::{Answer, AnswerValue, Question, Quiz};
pub use session::{Action, Phase, SessionState, Store};

use terminal::TerminalSession;
use timer::{Tick, Ticker};

/// Error type for quiz operations.
#[derive(Debug, Error)]
pub enum QuizError {
    /// The catalog could not be loaded.
    #[error("failed to load quizzes: {0}")]
    Load(#[from] LoadError),
    /// Terminal IO failed while the quiz was running.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The log file could not be created.
    #[error("failed to create log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// No quiz with this id in the catalog.
    #[error("no quiz with id {0:?} in the catalog")]
    UnknownQuiz(String),
}

/// A quiz catalog ready to be played in the terminal.
pub struct QuizApp {
    app: App,
    tick_period: Duration,
}

impl QuizApp {
    /// Create a new quiz application over the given catalog.
    pub fn new(catalog: Catalog) -> Self {
        Self {
            app: App::new(catalog),
            tick_period: timer::TICK_PERIOD,
        }
    }

    /// Use the quizzes shipped with the crate.
    pub fn builtin() -> Result<Self, QuizError> {
        Ok(Self::new(Catalog::builtin()?))
    }

    /// Load the catalog from a JSON file.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use quiz_master::QuizApp;
    ///
    /// let quiz = QuizApp::from_json("quizzes.json").expect("Failed to load quizzes");
    /// ```
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, QuizError> {
        Ok(Self::new(load_catalog_from_json(path)?))
    }

    /// Change how often the countdown advances. One second by default.
    pub fn with_tick_period(mut self, period: Duration) -> Self {
        self.tick_period = period;
        self
    }

    /// Skip the catalog screen and start the quiz with this id.
    pub fn start(&mut self, quiz_id: &str) -> Result<(), QuizError> {
        if self.app.start_quiz_by_id(quiz_id) {
            Ok(())
        } else {
            Err(QuizError::UnknownQuiz(quiz_id.to_string()))
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal until the user quits.
    pub async fn run(mut self) -> Result<(), QuizError> {
        let mut term = TerminalSession::enter()?;
        let result = run_event_loop(&mut term, &mut self.app, self.tick_period).await;
        first_error(result, term.leave())
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

async fn run_event_loop(
    terminal: &mut TerminalSession,
    app: &mut App,
    tick_period: Duration,
) -> Result<(), QuizError> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Tick>();
    let mut events = EventStream::new();
    let mut ticker: Option<Ticker> = None;

    loop {
        sync_ticker(app, &mut ticker, &tx, tick_period);
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            event = events.next() => match event {
                Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                    if handle_input(app, key) {
                        break;
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(err)) => return Err(err.into()),
                None => break,
            },
            Some(tick) = rx.recv() => app.on_tick(tick),
        }
    }

    Ok(())
}

/// Prefers the event loop's error over a failure to restore the terminal.
fn first_error(result: Result<(), QuizError>, left: io::Result<()>) -> Result<(), QuizError> {
    result.and(left.map_err(QuizError::from))
}

/// Keeps exactly one ticker alive while a quiz is running.
fn sync_ticker(
    app: &App,
    ticker: &mut Option<Ticker>,
    tx: &mpsc::UnboundedSender<Tick>,
    period: Duration,
) {
    let wanted = app.timer_active().then(|| app.timer_generation());
    if ticker.as_ref().map(Ticker::generation) == wanted {
        return;
    }
    // Replacing or clearing the slot drops, and so stops, the previous ticker.
    *ticker = wanted.map(|generation| Ticker::spawn(period, generation, tx.clone()));
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    match app.phase() {
        Phase::Idle => handle_catalog_input(app, key.code),
        Phase::InProgress | Phase::Completed => handle_quiz_input(app, key.code),
        Phase::ResultsShown => handle_results_input(app, key.code),
    }
}

fn handle_catalog_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_quiz();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_quiz();
            false
        }
        KeyCode::Enter => {
            app.start_selected_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Enter | KeyCode::Char(' ') => app.submit_selected(),
        KeyCode::Char(digit @ '1'..='9') => {
            app.submit_option(digit as usize - '1' as usize);
        }
        KeyCode::Char('t') | KeyCode::Char('T') => app.submit_boolean(true),
        KeyCode::Char('f') | KeyCode::Char('F') => app.submit_boolean(false),
        KeyCode::Right | KeyCode::Char('n') | KeyCode::Char('l') => app.next_question(),
        KeyCode::Left | KeyCode::Char('p') | KeyCode::Char('h') => app.previous_question(),
        KeyCode::Esc => app.abandon(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

fn handle_results_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.retake();
            false
        }
        KeyCode::Esc | KeyCode::Char('b') | KeyCode::Char('B') => {
            app.go_home();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
