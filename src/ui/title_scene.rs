//! Title screen: marathon backdrop with the main menu over it.

use super::marathon_backdrop::MarathonWidget;
use crate::app::{App, TitleItem};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const RULE: &str = "═══════════════════════";

pub fn draw(frame: &mut Frame, area: Rect, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4), // Title
            Constraint::Min(8),    // Marathon
            Constraint::Length(6), // Menu
            Constraint::Length(1), // Controls
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(RULE, Style::default().fg(Color::Yellow))),
        Line::from(Span::styled(
            "EPIC ASCII BATTLES",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(RULE, Style::default().fg(Color::Yellow))),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, chunks[0]);

    frame.render_widget(MarathonWidget::new(&app.marathon, &mut app.tiles), chunks[1]);

    let menu: Vec<Line> = TitleItem::ALL
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let selected = i == app.title_index;
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(Span::styled(
                format!(" {} {:<12}", item.icon(), item.label()),
                style,
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(menu).alignment(Alignment::Center), chunks[2]);

    let controls = Paragraph::new("[↑/↓] Select   [Enter] Confirm   [Q] Quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(controls, chunks[3]);
}
