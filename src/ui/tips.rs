use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use circuit::plan::TRAINING_TIPS;
use circuit::session::format_time;

use crate::App;

pub fn render_tips(app: &App, f: &mut Frame) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(0),    // Tips
            Constraint::Length(3), // Instructions
        ])
        .split(area);

    let title = Paragraph::new("Training Tips")
        .block(Block::default().borders(Borders::ALL))
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let mut lines = Vec::with_capacity(TRAINING_TIPS.len() * 2);
    for tip in TRAINING_TIPS.iter() {
        lines.push(Line::from(vec![
            Span::raw("• "),
            Span::styled(
                format!("{}:", tip.heading),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::raw(tip.body),
        ]));
        lines.push(Line::default());
    }

    let tips = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    f.render_widget(tips, chunks[1]);

    // the workout keeps running behind this screen, so keep the clock visible
    let footer = format!(
        "{} {} | {} left | (t) back to workout | (q)uit",
        app.session.phase(),
        app.session.current_step().name,
        format_time(app.session.time_remaining())
    );
    let instructions = Paragraph::new(footer)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC))
        .alignment(Alignment::Center);
    f.render_widget(instructions, chunks[2]);
}
