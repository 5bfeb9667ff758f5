//! Scrolling combat log panel.

use super::named;
use ascii_battles::interpret::CombatLog;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Newest lines at the bottom; older lines scroll off the top.
pub fn render_combat_log(frame: &mut Frame, area: Rect, log: &CombatLog) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Combat Log ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let visible = inner.height as usize;
    let skip = log.len().saturating_sub(visible);
    let lines: Vec<Line> = log
        .entries()
        .skip(skip)
        .map(|entry| {
            let mut style = Style::default().fg(named(entry.color));
            if entry.is_critical {
                style = style.add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(entry.text.clone(), style))
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
