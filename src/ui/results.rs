use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::session::stats::{review, ReviewItem};
use crate::session::ResultsSummary;

use super::{difficulty_color, render_controls, score_color};

pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let Some(summary) = ResultsSummary::from_state(app.state()) else {
        super::catalog::render(frame, area, app);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Length(4),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_heading(frame, chunks[0], &summary);
    render_score(frame, chunks[1], &summary);
    render_stats(frame, chunks[2], &summary);
    let limit = render_review(frame, chunks[3], &review(app.state()), app.results_scroll());
    app.set_results_scroll_limit(limit);
    render_controls(
        frame,
        chunks[4],
        "j/k scroll  ·  r retake quiz  ·  esc back to home  ·  q quit",
    );
}

fn render_heading(frame: &mut Frame, area: Rect, summary: &ResultsSummary) {
    let content = vec![
        Line::from(Span::styled(
            "QUIZ COMPLETE",
            Style::default().fg(Color::Cyan).bold(),
        )),
        Line::from(summary.message().fg(Color::Gray)),
    ];
    frame.render_widget(
        Paragraph::new(content).alignment(Alignment::Center),
        area,
    );
}

fn render_score(frame: &mut Frame, area: Rect, summary: &ResultsSummary) {
    let color = score_color(summary.tier());
    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(area);

    frame.render_widget(
        Paragraph::new(summary.title.as_str())
            .alignment(Alignment::Center)
            .fg(Color::White)
            .bold(),
        rows[0],
    );
    frame.render_widget(
        Paragraph::new(format!("{}%", summary.score))
            .alignment(Alignment::Center)
            .fg(color)
            .bold(),
        rows[1],
    );
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(color).bg(Color::Black))
            .percent(summary.score.min(100) as u16)
            .label(""),
        rows[2],
    );
}

fn render_stats(frame: &mut Frame, area: Rect, summary: &ResultsSummary) {
    let columns = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
        Constraint::Fill(1),
    ])
    .split(area);

    let average = format!("{}s", summary.average_time.round() as u64);
    let tiles = [
        ("Correct", summary.correct.to_string(), Color::Green),
        ("Incorrect", summary.incorrect.to_string(), Color::Red),
        ("Avg. Time", average, Color::Blue),
        ("Total", summary.total.to_string(), Color::Magenta),
    ];

    for (column, (label, value, color)) in columns.iter().zip(tiles) {
        let content = vec![
            Line::from(Span::styled(value, Style::default().fg(color).bold())),
            Line::from(label.fg(Color::DarkGray)),
        ];
        let widget = Paragraph::new(content).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(color),
        );
        frame.render_widget(widget, *column);
    }
}

/// Draws the review scrolled down by `scroll` rows and returns the largest
/// scroll that still fills the view.
fn render_review(
    frame: &mut Frame,
    area: Rect,
    items: &[ReviewItem<'_>],
    scroll: usize,
) -> usize {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Color::DarkGray)
        .title(" Question Review ")
        .title_style(Style::default().fg(Color::Cyan))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines: Vec<Line> = items.iter().flat_map(review_lines).collect();
    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true });

    // Scrolling counts rows after wrapping.
    let rows = paragraph.line_count(inner.width);
    let limit = rows.saturating_sub(inner.height as usize);
    let offset = scroll.min(limit).min(u16::MAX as usize) as u16;

    frame.render_widget(paragraph.scroll((offset, 0)), inner);
    limit
}

fn review_lines<'a>(item: &ReviewItem<'a>) -> Vec<Line<'a>> {
    let question = item.question;
    let (verdict, color) = if item.is_correct() {
        ("Correct", Color::Green)
    } else {
        ("Incorrect", Color::Red)
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("Q{}. ", item.number),
                Style::default().fg(Color::White).bold(),
            ),
            Span::styled(format!("[{}]", verdict), Style::default().fg(color).bold()),
            Span::raw("  "),
            Span::styled(
                question.difficulty.label(),
                Style::default().fg(difficulty_color(question.difficulty)),
            ),
        ]),
        Line::from(question.prompt.as_str().fg(Color::Gray)),
    ];

    if !item.is_correct() {
        let given = match item.answer {
            Some(answer) => format!("Your answer: {}", question.describe(&answer.value)),
            None => "Not answered".to_string(),
        };
        lines.push(Line::from(Span::styled(
            given,
            Style::default().fg(Color::DarkGray),
        )));
        lines.push(Line::from(vec![
            Span::styled("Explanation: ", Style::default().fg(Color::DarkGray).bold()),
            Span::styled(
                question.explanation.as_str(),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines
}
