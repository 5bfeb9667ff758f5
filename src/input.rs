//! Key dispatch, one handler per screen.

use crate::app::{App, Screen, TitleItem, SETTINGS_ROWS};
use ascii_battles::engine::Team;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind == KeyEventKind::Release {
        return;
    }
    match app.screen {
        Screen::Title => handle_title(app, key.code),
        Screen::RoundOffer => handle_round_offer(app, key.code),
        Screen::Battle => handle_battle(app, key.code),
        Screen::Summary => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                app.open_title();
            }
        }
        Screen::Leaderboard => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q')) {
                app.open(Screen::Title);
            }
        }
        Screen::Settings => handle_settings(app, key.code),
    }
}

fn handle_title(app: &mut App, code: KeyCode) {
    let last = TitleItem::ALL.len() - 1;
    match code {
        KeyCode::Up => app.title_index = app.title_index.saturating_sub(1),
        KeyCode::Down => app.title_index = (app.title_index + 1).min(last),
        KeyCode::Enter => match TitleItem::ALL[app.title_index.min(last)] {
            TitleItem::StartRun => app.start_run(),
            TitleItem::Leaderboard => app.open(Screen::Leaderboard),
            TitleItem::Settings => app.open(Screen::Settings),
            TitleItem::Quit => app.quit(),
        },
        KeyCode::Char('q') | KeyCode::Esc => app.quit(),
        _ => {}
    }
}

fn handle_round_offer(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Left => app.offer_team = Team::A,
        KeyCode::Right => app.offer_team = Team::B,
        KeyCode::Tab => app.offer_team = app.offer_team.other(),
        KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => app.adjust(true),
        KeyCode::Down | KeyCode::Char('-') => app.adjust(false),
        KeyCode::Enter => app.begin_battle(),
        KeyCode::Esc => app.abandon_run(),
        _ => {}
    }
}

fn handle_battle(app: &mut App, code: KeyCode) {
    if app.progress.is_some() {
        if matches!(code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.continue_after_battle();
        }
        return;
    }
    match code {
        KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('s') | KeyCode::Char('.') => app.step_battle(),
        KeyCode::Esc => app.abandon_run(),
        _ => {}
    }
}

fn handle_settings(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Up => app.settings_index = app.settings_index.saturating_sub(1),
        KeyCode::Down => app.settings_index = (app.settings_index + 1).min(SETTINGS_ROWS - 1),
        KeyCode::Enter | KeyCode::Left | KeyCode::Right | KeyCode::Char(' ') => {
            app.cycle_setting()
        }
        KeyCode::Esc | KeyCode::Char('q') => app.open(Screen::Title),
        _ => {}
    }
}
