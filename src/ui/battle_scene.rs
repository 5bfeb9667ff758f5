//! Battle view: team bars, battlefield, combat log, and the result panel.

use super::battle_grid::BattleGridWidget;
use super::combat_log::render_combat_log;
use super::{centered_rect, named};
use crate::app::App;
use ascii_battles::core::RunState;
use ascii_battles::effects::Scene;
use ascii_battles::engine::{GridInfo, Team};
use ascii_battles::palette;
use ascii_battles::round::BattleSession;
use ascii_battles::run::RunProgress;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &mut App) {
    let now = app.now();
    let App {
        session,
        tiles,
        progress,
        ..
    } = app;
    let Some(session) = session.as_ref() else {
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Team bars
            Constraint::Min(8),     // Battlefield
            Constraint::Length(10), // Combat log
            Constraint::Length(1),  // Controls
        ])
        .split(area);

    draw_team_bars(frame, chunks[0], session);

    let field = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(format!(" Round {} ", session.round()));
    let field_inner = field.inner(chunks[1]);
    frame.render_widget(field, chunks[1]);
    if let Some(snapshot) = session.snapshot() {
        let scene = Scene::new(Some(snapshot), session.effects(), now);
        let grid: GridInfo = snapshot.grid;
        frame.render_widget(BattleGridWidget::new(&scene, grid, tiles), field_inner);
    } else {
        let missing = Paragraph::new("The combatants failed to take the field.")
            .style(Style::default().fg(Color::LightRed))
            .alignment(Alignment::Center);
        frame.render_widget(missing, field_inner);
    }

    render_combat_log(frame, chunks[2], session.log());
    draw_controls(frame, chunks[3], session, progress.is_some());

    if let Some(progress) = progress {
        draw_result(frame, area, progress);
    }
}

fn team_bar(session: &BattleSession, team: Team) -> Line<'static> {
    let alive = session
        .snapshot()
        .map_or(0, |s| s.alive_count(team) as u32);
    let total = session.start_count(team).max(1);
    let color = named(match team {
        Team::A => palette::TEAM_A,
        Team::B => palette::TEAM_B,
    });
    let width = 20usize;
    let filled = (alive as usize * width) / total as usize;
    Line::from(vec![
        Span::styled(
            format!("{:<10}", session.team_name(team)),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled("█".repeat(filled), Style::default().fg(color)),
        Span::styled(
            "░".repeat(width - filled.min(width)),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw(format!(" {}/{}", alive, session.start_count(team))),
    ])
}

fn draw_team_bars(frame: &mut Frame, area: Rect, session: &BattleSession) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    for (team, column) in [(Team::A, columns[0]), (Team::B, columns[1])] {
        let bar = Paragraph::new(team_bar(session, team)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(bar, column);
    }
}

fn draw_controls(frame: &mut Frame, area: Rect, session: &BattleSession, scored: bool) {
    let text = if scored {
        "[Enter] Continue".to_string()
    } else {
        match session.run_state() {
            RunState::Running => "[Space] Pause   [Esc] End run".to_string(),
            RunState::Manual => "PAUSED   [Space] Resume   [S] Step   [Esc] End run".to_string(),
            RunState::Stopped => "Battle over".to_string(),
        }
    };
    frame.render_widget(
        Paragraph::new(text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center),
        area,
    );
}

fn draw_result(frame: &mut Frame, area: Rect, progress: &RunProgress) {
    let popup = centered_rect(36, 8, area);
    frame.render_widget(Clear, popup);
    let (title, outcome, color) = match progress {
        RunProgress::Advanced { outcome, .. } => (" Round Won ", outcome, Color::Yellow),
        RunProgress::Ended { outcome } => (" Run Ended ", outcome, Color::LightRed),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
        .title(title);
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let stars = "★".repeat(outcome.tier.trophies() as usize);
    let mut lines = vec![
        Line::from(Span::styled(
            if stars.is_empty() { "-".to_string() } else { stars },
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(format!(
            "{:.0}% of the winners still standing",
            outcome.survivor_ratio * 100.0
        )),
    ];
    match progress {
        RunProgress::Advanced { round, .. } => {
            lines.push(Line::from(format!("+{} points", outcome.score)));
            lines.push(Line::from(format!("On to round {}", round)));
        }
        RunProgress::Ended { .. } => {
            lines.push(Line::from(Span::styled(
                "BLOWOUT! Too one-sided.",
                Style::default().fg(Color::LightRed),
            )));
        }
    }
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
