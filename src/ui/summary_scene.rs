//! Run summary.

use crate::app::App;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" RUN COMPLETE ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines = vec![Line::from("")];
    match app.run.as_ref() {
        Some(run) => {
            lines.push(Line::from(Span::styled(
                run.score.to_string(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(Span::styled(
                "Final Score",
                Style::default().fg(Color::DarkGray),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Trophies: {}", run.total_trophies)));
            lines.push(Line::from(format!("Rounds Reached: {}", run.round)));
            lines.push(Line::from(Span::styled(
                format!("Seed: {}", run.seed),
                Style::default().fg(Color::DarkGray),
            )));
            if let Some(rank) = app
                .leaderboard
                .runs()
                .iter()
                .position(|r| r.run_id == run.run_id)
            {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    format!("Leaderboard rank #{}", rank + 1),
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        None => lines.push(Line::from("No run in progress.")),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "[Enter] Back to Home",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
