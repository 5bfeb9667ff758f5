//! Settings: gore intensity and reduced motion.

use ascii_battles::settings::Settings;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn row(label: &str, value: String, selected: bool) -> Line<'static> {
    let marker = if selected { "▶ " } else { "  " };
    let style = if selected {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![
        Span::styled(format!("{}{:<16}", marker, label), style),
        Span::styled(value, Style::default().fg(Color::Cyan)),
    ])
}

pub fn draw(frame: &mut Frame, area: Rect, settings: &Settings, selected: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Settings ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let gore = settings.gore_intensity;
    let lines = vec![
        Line::from(""),
        row("Gore Intensity", gore.display_name().to_string(), selected == 0),
        Line::from(Span::styled(
            format!("    {}", gore.description()),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        row(
            "Reduced Motion",
            if settings.reduced_motion { "On" } else { "Off" }.to_string(),
            selected == 1,
        ),
        Line::from(Span::styled(
            "    Halves how long hit effects linger",
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "[↑/↓] Select   [Enter] Change   [Esc] Back",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Left), inner);
}
