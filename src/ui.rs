pub mod screen;
pub mod tips;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Gauge, Paragraph, Row, StatefulWidget, Table, TableState, Widget,
        Wrap,
    },
};
use unicode_width::UnicodeWidthStr;

use circuit::plan::FULL_BODY_INFO;
use circuit::session::{format_time, Phase, Session};

use crate::App;

const HORIZONTAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Length(3), // info cards
                Constraint::Length(3), // progress
                Constraint::Length(6), // timer section
                Constraint::Length(1), // controls
                Constraint::Min(0),    // exercise list
            ])
            .split(area);

        render_header(chunks[0], buf);
        render_info_cards(session, chunks[1], buf);
        render_progress(session, chunks[2], buf);
        render_timer(session, chunks[3], buf);
        render_controls(self, chunks[4], buf);
        render_exercise_list(session, chunks[5], buf);
    }
}

fn render_header(area: Rect, buf: &mut Buffer) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            FULL_BODY_INFO.title,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            FULL_BODY_INFO.description,
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ])
    .block(Block::default().borders(Borders::BOTTOM))
    .alignment(Alignment::Center);

    header.render(area, buf);
}

fn render_info_cards(session: &Session, area: Rect, buf: &mut Buffer) {
    let exercises = session.plan().exercise_count().to_string();
    let cards = [
        ("Duration", FULL_BODY_INFO.duration_label),
        ("Equipment", FULL_BODY_INFO.equipment),
        ("Exercises", exercises.as_str()),
        ("Focus", FULL_BODY_INFO.focus),
    ];

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 4); 4])
        .split(area);

    for ((title, value), column) in cards.iter().zip(columns.iter()) {
        Paragraph::new(Span::styled(
            *value,
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(*title, Style::default().fg(Color::Gray))),
        )
        .alignment(Alignment::Center)
        .render(*column, buf);
    }
}

fn render_progress(session: &Session, area: Rect, buf: &mut Buffer) {
    let progress = session.progress().clamp(0.0, 1.0);
    let label = format!(
        "{:.0}%  {} / {}",
        progress * 100.0,
        format_time(session.elapsed_secs()),
        format_time(session.total_duration_secs())
    );

    Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .ratio(progress)
        .label(label)
        .render(area, buf);
}

fn render_timer(session: &Session, area: Rect, buf: &mut Buffer) {
    let step = session.current_step();
    let (position, total) = session.exercise_position();

    let readout_style = match session.phase() {
        Phase::Running => Style::default().fg(Color::Green),
        Phase::Paused => Style::default().fg(Color::Yellow),
        Phase::NotStarted => Style::default(),
        Phase::Completed => Style::default().fg(Color::Magenta),
    }
    .add_modifier(Modifier::BOLD);

    let status = if session.is_completed() {
        "Workout complete! Great work.".to_string()
    } else {
        session.phase().to_string()
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(session.formatted_time_remaining(), readout_style),
            Span::raw("  "),
            Span::styled(status, Style::default().add_modifier(Modifier::DIM)),
        ]),
        Line::from(Span::styled(
            step.name,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{} • Exercise {} of {}",
            step.reps, position, total
        )),
        Line::from(Span::styled(
            step.instructions,
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

/// Key hints mirroring which controls are currently available
pub fn control_hints(app: &App) -> Vec<(String, bool)> {
    let session = &app.session;
    let mut hints = Vec::new();

    match session.phase() {
        Phase::NotStarted => hints.push(("(space) start".to_string(), true)),
        Phase::Running => hints.push(("(space) pause".to_string(), true)),
        Phase::Paused if session.can_resume() => {
            hints.push(("(space) resume".to_string(), true))
        }
        Phase::Paused | Phase::Completed => {}
    }

    if session.has_started() {
        hints.push(("(s)kip".to_string(), session.can_skip()));
        hints.push(("(r)eset".to_string(), true));
    }

    hints.push(("(t)ips".to_string(), true));
    hints.push((format!("(m) cue: {}", app.settings.cue), true));
    hints.push(("(q)uit".to_string(), true));
    hints
}

fn render_controls(app: &App, area: Rect, buf: &mut Buffer) {
    let hints = control_hints(app);
    let joined: String = hints
        .iter()
        .map(|(h, _)| h.as_str())
        .collect::<Vec<_>>()
        .join(" / ");

    // drop the optional hints when the full legend does not fit
    let hints: Vec<(String, bool)> = if joined.width() > area.width as usize {
        hints
            .into_iter()
            .filter(|(h, _)| !h.starts_with("(t)") && !h.starts_with("(m)"))
            .collect()
    } else {
        hints
    };

    let mut spans = Vec::new();
    for (i, (hint, enabled)) in hints.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(" / "));
        }
        let style = if enabled {
            Style::default().add_modifier(Modifier::ITALIC)
        } else {
            Style::default().add_modifier(Modifier::DIM | Modifier::CROSSED_OUT)
        };
        spans.push(Span::styled(hint, style));
    }

    Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn render_exercise_list(session: &Session, area: Rect, buf: &mut Buffer) {
    let current = session.current_step_index();

    let rows: Vec<Row> = session
        .plan()
        .steps()
        .iter()
        .enumerate()
        .map(|(index, step)| {
            let (marker, style) = if index < current {
                (
                    "✓",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::DIM),
                )
            } else if index == current {
                (
                    "▶",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                (" ", Style::default())
            };

            Row::new(vec![
                Cell::from(marker),
                Cell::from(step.name),
                Cell::from(step.reps),
                Cell::from(format!("{}s", step.duration_secs)),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(20),
            Constraint::Length(20),
            Constraint::Length(5),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title("Workout"))
    .row_highlight_style(Style::default().bg(Color::DarkGray));

    // selecting the active row keeps it scrolled into view
    let mut state = TableState::default().with_selected(Some(current));
    StatefulWidget::render(table, area, buf, &mut state);
}
