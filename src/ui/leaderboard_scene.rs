//! Leaderboard: best runs by trophies.

use ascii_battles::leaderboard::Leaderboard;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, leaderboard: &Leaderboard) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" LEADERBOARD ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    let lines: Vec<Line> = if leaderboard.is_empty() {
        vec![
            Line::from(""),
            Line::from("No runs yet"),
            Line::from(Span::styled(
                "Complete a run to see it here!",
                Style::default().fg(Color::DarkGray),
            )),
        ]
    } else {
        leaderboard
            .runs()
            .iter()
            .enumerate()
            .map(|(i, run)| {
                let rank_style = match i {
                    0 => Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                    1 | 2 => Style::default().fg(Color::White),
                    _ => Style::default().fg(Color::Gray),
                };
                Line::from(vec![
                    Span::styled(format!("#{:<3}", i + 1), rank_style),
                    Span::styled(
                        format!("{:>4} ★  ", run.total_trophies),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(format!("R{:<4}", run.round_reached)),
                    Span::styled(
                        run.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
            })
            .collect()
    };
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), chunks[0]);
    frame.render_widget(
        Paragraph::new("[Esc] Back")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        chunks[1],
    );
}
