use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::Quiz;

use super::{quiz_color, render_controls};

const CARD_HEIGHT: u16 = 6;

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_banner(frame, chunks[0]);
    render_cards(frame, chunks[1], app);
    render_controls(frame, chunks[2], "j/k navigate  ·  enter start quiz  ·  q quit");
}

fn render_banner(frame: &mut Frame, area: Rect) {
    let content = vec![
        Line::from(Span::styled(
            "QUIZMASTER",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(""),
        Line::from(
            "Challenge yourself with our interactive quizzes. Test your knowledge and learn something new!"
                .fg(Color::DarkGray),
        ),
    ];

    let widget = Paragraph::new(content)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(widget, area);
}

fn render_cards(frame: &mut Frame, area: Rect, app: &App) {
    let quizzes = app.catalog().quizzes();
    let visible = (area.height / CARD_HEIGHT).max(1) as usize;
    // Keep the cursor on screen when the catalog is taller than the terminal.
    let first = app.catalog_cursor().saturating_sub(visible - 1);

    let mut constraints: Vec<Constraint> = quizzes
        .iter()
        .skip(first)
        .take(visible)
        .map(|_| Constraint::Length(CARD_HEIGHT))
        .collect();
    constraints.push(Constraint::Fill(1));
    let slots = Layout::vertical(constraints).split(area);

    for (slot, (index, quiz)) in slots
        .iter()
        .zip(quizzes.iter().enumerate().skip(first).take(visible))
    {
        render_card(frame, *slot, quiz, index == app.catalog_cursor());
    }
}

fn render_card(frame: &mut Frame, area: Rect, quiz: &Quiz, selected: bool) {
    let accent = quiz_color(quiz);
    let (border, title_style) = if selected {
        (Style::default().fg(accent), Style::default().fg(accent).bold())
    } else {
        (Style::default().fg(Color::DarkGray), Style::default().fg(Color::White).bold())
    };
    let marker = if selected { "> " } else { "  " };

    let content = vec![
        Line::from(vec![
            Span::styled(marker, title_style),
            Span::styled(quiz.title.as_str(), title_style),
            Span::raw("  "),
            Span::styled(format!("[{}]", quiz.category), Style::default().fg(accent)),
        ]),
        Line::from(quiz.description.as_str().fg(Color::Gray)),
        Line::from(Span::styled(
            format!(
                "{} questions  ·  {} min",
                quiz.question_count(),
                quiz.minutes()
            ),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(content).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border)
            .padding(Padding::horizontal(1)),
    );
    frame.render_widget(widget, area);
}
