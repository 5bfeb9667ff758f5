//! Round offer: the upcoming matchup and the team-size adjustments.

use super::named;
use crate::app::App;
use ascii_battles::engine::Team;
use ascii_battles::run::{GameRun, TeamPick};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(run) = app.run.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3), // Round header
            Constraint::Min(9),    // Teams
            Constraint::Length(2), // Notice
            Constraint::Length(2), // Controls
        ])
        .split(area);

    draw_header(frame, chunks[0], run);

    let teams = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Percentage(10),
            Constraint::Percentage(45),
        ])
        .split(chunks[1]);
    draw_team(frame, teams[0], &run.matchup.team_a, app.offer_team == Team::A);
    let versus = Paragraph::new(vec![Line::from(""), Line::from(""), Line::from("VS")])
        .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(versus, teams[1]);
    draw_team(frame, teams[2], &run.matchup.team_b, app.offer_team == Team::B);

    if let Some(notice) = &app.notice {
        let notice = Paragraph::new(notice.as_str())
            .style(Style::default().fg(Color::LightRed))
            .alignment(Alignment::Center);
        frame.render_widget(notice, chunks[2]);
    }

    let controls = Paragraph::new(vec![
        Line::from("[←/→] Pick team   [↑/+] Add one   [↓/-] Remove one"),
        Line::from("[Enter] Fight   [Esc] End run"),
    ])
    .style(Style::default().fg(Color::DarkGray))
    .alignment(Alignment::Center);
    frame.render_widget(controls, chunks[3]);
}

fn draw_header(frame: &mut Frame, area: Rect, run: &GameRun) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            format!("Round {}", run.round),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            Span::raw(format!("Score: {}   ", run.score)),
            Span::styled(
                format!("Trophies: {}   ", run.total_trophies),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                format!(
                    "Adjustments: {}/{}",
                    run.adjustments_remaining(),
                    run.max_adjustments()
                ),
                Style::default().fg(Color::Cyan),
            ),
        ]),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(header, area);
}

fn draw_team(frame: &mut Frame, area: Rect, pick: &TeamPick, selected: bool) {
    let border = if selected {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if selected {
            BorderType::Double
        } else {
            BorderType::Plain
        })
        .border_style(border)
        .title(format!(" {} ", pick.species.name));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let color = named(pick.species.named_color());
    let squad: String = std::iter::repeat(pick.species.glyph)
        .take(pick.count as usize)
        .map(|g| format!("{} ", g))
        .collect();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            pick.species.glyph.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(squad, Style::default().fg(color))),
        Line::from(""),
        Line::from(format!("Count: {}", pick.count)),
    ];
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
