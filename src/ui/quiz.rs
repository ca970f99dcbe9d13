use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::App;
use crate::models::{option_letter, Question, QuestionKind};
use crate::session::HeaderStats;

use super::{difficulty_color, quiz_color, render_controls, time_color};

pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let state = app.state();
    let (Some(quiz), Some(question), Some(stats)) = (
        state.quiz.as_ref(),
        state.current_question(),
        HeaderStats::from_state(state),
    ) else {
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(5),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .margin(1)
    .split(area);

    render_header(frame, chunks[0], &quiz.title, quiz_color(quiz), &stats);
    render_question(frame, chunks[1], app, question);
    render_navigation(frame, chunks[2], app);
    render_controls(
        frame,
        chunks[4],
        "j/k select  ·  enter submit  ·  n next  ·  p previous  ·  esc leave quiz  ·  q quit",
    );
}

fn render_header(frame: &mut Frame, area: Rect, title: &str, accent: Color, stats: &HeaderStats) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .title(Span::styled(format!(" {} ", title), Style::default().fg(accent).bold()))
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .split(inner);

    let info = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(rows[0]);
    let position = Paragraph::new(format!(
        "Question {} of {}",
        stats.question_number, stats.total
    ))
    .fg(Color::Gray);
    frame.render_widget(position, info[0]);

    let clock_style = if stats.clock_warning() {
        Style::default().fg(Color::Red).bold()
    } else {
        Style::default().fg(Color::Gray)
    };
    let status = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} answered  ·  ", stats.answered),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(stats.clock(), clock_style),
    ]))
    .alignment(Alignment::Right);
    frame.render_widget(status, info[1]);

    frame.render_widget(
        labelled_gauge("Progress", stats.progress, Color::Cyan),
        rows[1],
    );
    frame.render_widget(
        labelled_gauge("Time Remaining", stats.time_left, time_color(stats.time_tier())),
        rows[2],
    );
}

fn labelled_gauge(label: &str, percent: f64, color: Color) -> Gauge<'static> {
    Gauge::default()
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio((percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{} {}%", label, percent.round() as u32))
}

fn render_question(frame: &mut Frame, area: Rect, app: &App, question: &Question) {
    let title = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            question.difficulty.label(),
            Style::default()
                .fg(difficulty_color(question.difficulty))
                .bold(),
        ),
        Span::styled("  ·  ", Style::default().fg(Color::DarkGray)),
        Span::styled(question.kind.label(), Style::default().fg(Color::Gray)),
        Span::raw(" "),
    ]);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Color::DarkGray)
        .title(title)
        .padding(Padding::new(2, 2, 1, 0));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::vertical([Constraint::Length(3), Constraint::Fill(1)]).split(inner);

    let prompt = Paragraph::new(question.prompt.as_str())
        .wrap(Wrap { trim: true })
        .fg(Color::White)
        .bold();
    frame.render_widget(prompt, chunks[0]);

    let submitted = app
        .current_answer()
        .and_then(|answer| question.position_of(&answer.value));
    render_options(frame, chunks[1], question, app.option_cursor(), submitted);
}

fn render_options(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    cursor: usize,
    submitted: Option<usize>,
) {
    let options = question.options_for_display();
    let mut lines: Vec<Line> = Vec::with_capacity(options.len() * 2);

    for (position, option) in options.into_iter().enumerate() {
        let is_cursor = position == cursor;
        let is_submitted = submitted == Some(position);
        let style = match (is_cursor, is_submitted) {
            (_, true) => Style::default().fg(Color::Green).bold(),
            (true, false) => Style::default().fg(Color::Cyan).bold(),
            (false, false) => Style::default().fg(Color::Gray),
        };
        let marker = if is_cursor { ">" } else { " " };
        let check = if is_submitted { "●" } else { "○" };
        let label = match question.kind {
            QuestionKind::MultipleChoice => format!("{}. ", option_letter(position)),
            QuestionKind::TrueFalse => String::new(),
        };

        lines.push(Line::from(vec![
            Span::styled(format!(" {} {} ", marker, check), style),
            Span::styled(label, style),
            Span::styled(option, style),
        ]));
        lines.push(Line::from(""));
    }

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_navigation(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let enabled = |on: bool, color: Color| {
        if on {
            Style::default().fg(color).bold()
        } else {
            Style::default().fg(Color::DarkGray)
        }
    };

    let previous = Paragraph::new(Span::styled(
        "< Previous",
        enabled(app.can_go_previous(), Color::White),
    ));
    frame.render_widget(previous, chunks[0]);

    let next_label = if app.state().is_last_question() {
        "Finish Quiz"
    } else {
        "Next >"
    };
    let next = Paragraph::new(Span::styled(
        next_label,
        enabled(app.can_go_next(), Color::Green),
    ))
    .alignment(Alignment::Right);
    frame.render_widget(next, chunks[1]);
}

