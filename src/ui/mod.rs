//! Terminal front-end. Screens read library state and draw it; none of them
//! mutate game logic.

pub mod battle_grid;
pub mod battle_scene;
pub mod combat_log;
pub mod leaderboard_scene;
pub mod marathon_backdrop;
pub mod round_offer;
pub mod settings_scene;
pub mod summary_scene;
pub mod title_scene;

use crate::app::{App, Screen};
use ascii_battles::palette::{NamedColor, Rgb};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    Frame,
};

/// Draws the current screen.
pub fn draw_ui(frame: &mut Frame, app: &mut App) {
    let area = frame.size();
    match app.screen {
        Screen::Title => title_scene::draw(frame, area, app),
        Screen::RoundOffer => round_offer::draw(frame, area, app),
        Screen::Battle => battle_scene::draw(frame, area, app),
        Screen::Summary => summary_scene::draw(frame, area, app),
        Screen::Leaderboard => leaderboard_scene::draw(frame, area, &app.leaderboard),
        Screen::Settings => settings_scene::draw(frame, area, &app.settings, app.settings_index),
    }
}

pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

pub fn named(color: NamedColor) -> Color {
    to_color(color.rgb())
}

/// A `width` x `height` rect centered in `area`, shrunk to fit.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(area.height.saturating_sub(height) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(area.width.saturating_sub(width) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);
    horizontal[1]
}
