mod catalog;
mod quiz;
mod results;

use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph},
};

use crate::app::App;
use crate::models::{Difficulty, Quiz};
use crate::session::{Phase, ScoreTier, TimeTier};

pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();
    frame.render_widget(Block::default().bg(Color::Reset), area);

    match app.phase() {
        Phase::Idle => catalog::render(frame, area, app),
        Phase::InProgress | Phase::Completed => quiz::render(frame, area, app),
        Phase::ResultsShown => results::render(frame, area, app),
    }
}

fn quiz_color(quiz: &Quiz) -> Color {
    quiz.color.parse().unwrap_or(Color::Cyan)
}

fn difficulty_color(difficulty: Difficulty) -> Color {
    match difficulty {
        Difficulty::Easy => Color::Green,
        Difficulty::Medium => Color::Yellow,
        Difficulty::Hard => Color::Red,
    }
}

fn score_color(tier: ScoreTier) -> Color {
    match tier {
        ScoreTier::High => Color::Green,
        ScoreTier::Mid => Color::Yellow,
        ScoreTier::Low => Color::Red,
    }
}

fn time_color(tier: TimeTier) -> Color {
    match tier {
        TimeTier::Plenty => Color::Green,
        TimeTier::Low => Color::Yellow,
        TimeTier::Critical => Color::Red,
    }
}

fn render_controls(frame: &mut Frame, area: Rect, text: &str) {
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .fg(Color::DarkGray);
    frame.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use super::*;
    use crate::data::Catalog;
    use crate::timer::Tick;

    fn render_to_string(app: &mut App) -> String {
        render_sized(app, 110, 48)
    }

    fn render_sized(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        App::new(Catalog::builtin().unwrap())
    }

    #[test]
    fn test_render_catalog() {
        let screen = render_to_string(&mut app());
        assert!(screen.contains("QUIZMASTER"));
        assert!(screen.contains("JavaScript Fundamentals"));
        assert!(screen.contains("React Development"));
        assert!(screen.contains("UI/UX Design Principles"));
        assert!(screen.contains("5 questions"));
        assert!(screen.contains("10 min"));
    }

    #[test]
    fn test_render_quiz() {
        let mut app = app();
        app.start_quiz_by_id("react");
        app.on_tick(Tick(app.timer_generation()));

        let screen = render_to_string(&mut app);
        assert!(screen.contains("React Development"));
        assert!(screen.contains("Question 1 of 5"));
        assert!(screen.contains("07:59"));
        assert!(screen.contains("0 answered"));
        assert!(screen.contains("Multiple Choice"));
        assert!(screen.contains("Both A and B"));
    }

    #[test]
    fn test_render_true_false_question() {
        let mut app = app();
        app.start_quiz_by_id("react");
        app.submit_option(3);
        app.next_question();

        let screen = render_to_string(&mut app);
        assert!(screen.contains("Question 2 of 5"));
        assert!(screen.contains("True/False"));
        assert!(screen.contains("True"));
        assert!(screen.contains("False"));
        assert!(screen.contains("1 answered"));
    }

    #[test]
    fn test_render_results_after_timeout() {
        let mut app = app();
        app.start_quiz_by_id("design");
        let generation = app.timer_generation();
        for _ in 0..420 {
            app.on_tick(Tick(generation));
        }

        let screen = render_to_string(&mut app);
        assert!(screen.contains("QUIZ COMPLETE"));
        assert!(screen.contains("Keep practicing!"));
        assert!(screen.contains("0%"));
        assert!(screen.contains("Avg. Time"));
        assert!(screen.contains("0s"));
        assert!(!screen.contains("NaN"));
        assert!(screen.contains("Not answered"));
    }

    #[test]
    fn test_render_results_with_explanations() {
        let mut app = app();
        app.start_quiz_by_id("design");
        app.submit_option(1);
        for _ in 0..4 {
            app.next_question();
            app.submit_option(0);
        }
        app.next_question();

        let screen = render_to_string(&mut app);
        assert!(screen.contains("Q1."));
        assert!(screen.contains("Incorrect"));
        assert!(screen.contains("Explanation:"));
    }

    #[test]
    fn test_review_scrolls_to_last_explanation() {
        let mut app = app();
        app.start_quiz_by_id("design");
        app.submit_option(1);
        app.next_question();
        app.submit_boolean(true);
        app.next_question();
        app.submit_option(0);
        app.next_question();
        app.submit_option(0);
        app.next_question();
        app.submit_boolean(true);
        app.next_question();
        assert_eq!(app.state().score, 0);

        let top = render_sized(&mut app, 80, 24);
        assert!(top.contains("Q1."));
        assert!(!top.contains("Q5."));

        for _ in 0..200 {
            app.scroll_results_down();
        }
        let bottom = render_sized(&mut app, 80, 24);
        assert!(bottom.contains("Q5."));
        assert!(bottom.contains("Mobile-first design means starting"));
        assert!(bottom.contains("screens."));

        // Already at the end, so one step up moves the view.
        let end = app.results_scroll();
        app.scroll_results_up();
        assert_eq!(app.results_scroll(), end - 1);
    }
}
