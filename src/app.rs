//! Front-end state: which screen is up and the game objects behind it.

use ascii_battles::core::constants::{
    MARATHON_GRID_HEIGHT, MARATHON_GRID_WIDTH, ROUND_GRID_HEIGHT, ROUND_GRID_WIDTH,
};
use ascii_battles::core::{Clock, RunState, SystemClock};
use ascii_battles::engine::skirmish::SkirmishFactory;
use ascii_battles::engine::Team;
use ascii_battles::interpret::InterpretConfig;
use ascii_battles::leaderboard::Leaderboard;
use ascii_battles::marathon::MarathonOrchestrator;
use ascii_battles::round::{BattleSession, RoundResult};
use ascii_battles::run::{GameRun, RunProgress};
use ascii_battles::settings::Settings;
use ascii_battles::tiles::TileRenderer;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Instant;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Title,
    RoundOffer,
    Battle,
    Summary,
    Leaderboard,
    Settings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleItem {
    StartRun,
    Leaderboard,
    Settings,
    Quit,
}

impl TitleItem {
    pub const ALL: [TitleItem; 4] = [
        TitleItem::StartRun,
        TitleItem::Leaderboard,
        TitleItem::Settings,
        TitleItem::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TitleItem::StartRun => "Start Run",
            TitleItem::Leaderboard => "Leaderboard",
            TitleItem::Settings => "Settings",
            TitleItem::Quit => "Quit",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            TitleItem::StartRun => "▶",
            TitleItem::Leaderboard => "☆",
            TitleItem::Settings => "⚙",
            TitleItem::Quit => "×",
        }
    }
}

/// Rows on the settings screen.
pub const SETTINGS_ROWS: usize = 2;

pub struct App {
    pub screen: Screen,
    pub settings: Settings,
    pub leaderboard: Leaderboard,
    pub marathon: MarathonOrchestrator,
    pub run: Option<GameRun>,
    pub session: Option<BattleSession>,
    /// Set once the current battle is scored; cleared when moving on.
    pub progress: Option<RunProgress>,
    pub tiles: TileRenderer,
    pub title_index: usize,
    pub settings_index: usize,
    pub offer_team: Team,
    pub notice: Option<String>,
    pub should_quit: bool,
    clock: SystemClock,
    factory: SkirmishFactory,
    rng: StdRng,
    seed: Option<u64>,
}

impl App {
    pub fn new(
        settings: Settings,
        leaderboard: Leaderboard,
        tiles: TileRenderer,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let marathon = MarathonOrchestrator::new(Box::new(SkirmishFactory::new(
            MARATHON_GRID_WIDTH,
            MARATHON_GRID_HEIGHT,
        )));
        let mut app = Self {
            screen: Screen::Title,
            settings,
            leaderboard,
            marathon,
            run: None,
            session: None,
            progress: None,
            tiles,
            title_index: 0,
            settings_index: 0,
            offer_team: Team::A,
            notice: None,
            should_quit: false,
            clock: SystemClock::new(),
            factory: SkirmishFactory::new(ROUND_GRID_WIDTH, ROUND_GRID_HEIGHT),
            rng,
            seed,
        };
        app.open_title();
        app
    }

    /// Effect clock reading, in seconds.
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    /// Advances whatever runs on the current screen.
    pub fn update(&mut self, instant: Instant) {
        match self.screen {
            Screen::Title => {
                self.marathon.pump(instant, &mut self.rng);
            }
            Screen::Battle => {
                let now = self.clock.seconds_at(instant);
                let finished = self
                    .session
                    .as_mut()
                    .and_then(|session| session.pump(instant, now, &mut self.rng));
                if let Some(result) = finished {
                    self.score_battle(result);
                }
            }
            _ => {}
        }
    }

    pub fn open_title(&mut self) {
        self.screen = Screen::Title;
        self.run = None;
        self.session = None;
        self.progress = None;
        self.marathon.start(&mut self.rng);
    }

    pub fn open(&mut self, screen: Screen) {
        self.notice = None;
        self.screen = screen;
    }

    pub fn start_run(&mut self) {
        self.marathon.stop();
        let seed = self.seed.unwrap_or_else(|| self.rng.gen());
        self.run = Some(GameRun::new(seed, &mut self.rng));
        self.progress = None;
        self.offer_team = Team::A;
        self.open(Screen::RoundOffer);
    }

    pub fn adjust(&mut self, grow: bool) {
        let Some(run) = self.run.as_mut() else {
            return;
        };
        self.notice = match run.adjust(self.offer_team, grow) {
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        };
    }

    pub fn begin_battle(&mut self) {
        let Some(run) = self.run.as_ref() else {
            return;
        };
        let config = InterpretConfig::from_settings(&self.settings);
        let mut session = BattleSession::for_run(&self.factory, run, config);
        session.start();
        self.session = Some(session);
        self.progress = None;
        self.open(Screen::Battle);
    }

    pub fn toggle_pause(&mut self) {
        if let Some(session) = self.session.as_mut() {
            match session.run_state() {
                RunState::Running => session.pause(),
                RunState::Manual => session.start(),
                RunState::Stopped => {}
            }
        }
    }

    /// Single step while paused.
    pub fn step_battle(&mut self) {
        let now = self.clock.now();
        let finished = match self.session.as_mut() {
            Some(session) if session.run_state() == RunState::Manual => {
                session.step(now, &mut self.rng)
            }
            _ => None,
        };
        if let Some(result) = finished {
            self.score_battle(result);
        }
    }

    fn score_battle(&mut self, result: RoundResult) {
        if let Some(run) = self.run.as_mut() {
            self.progress = Some(run.record_outcome(result.outcome, &mut self.rng));
        }
    }

    /// After a scored battle: the next offer, or the summary on a blowout.
    pub fn continue_after_battle(&mut self) {
        match self.progress.take() {
            Some(RunProgress::Advanced { .. }) => {
                self.session = None;
                self.offer_team = Team::A;
                self.open(Screen::RoundOffer);
            }
            Some(RunProgress::Ended { .. }) => self.end_run(),
            None => {}
        }
    }

    /// Gives up on the current run; it still goes on the leaderboard.
    pub fn abandon_run(&mut self) {
        self.end_run();
    }

    fn end_run(&mut self) {
        self.session = None;
        self.progress = None;
        if let Some(run) = self.run.as_mut() {
            run.active = false;
            info!(
                run_id = %run.run_id,
                trophies = run.total_trophies,
                round = run.round,
                "run recorded"
            );
            self.leaderboard.add_run(run.to_record());
            if let Err(err) = self.leaderboard.save() {
                warn!(error = %err, "failed to save leaderboard");
            }
        }
        self.open(Screen::Summary);
    }

    pub fn cycle_setting(&mut self) {
        match self.settings_index {
            0 => self.settings.gore_intensity = self.settings.gore_intensity.next(),
            _ => self.settings.reduced_motion = !self.settings.reduced_motion,
        }
        if let Err(err) = self.settings.save() {
            warn!(error = %err, "failed to save settings");
        }
        if let Some(session) = self.session.as_mut() {
            session.set_config(InterpretConfig::from_settings(&self.settings));
        }
    }

    pub fn quit(&mut self) {
        self.marathon.stop();
        self.session = None;
        self.should_quit = true;
    }
}
