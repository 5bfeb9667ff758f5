//! Single-round battle session.
//!
//! Owns the scheduler, the interpreter, and everything the interpreter writes
//! to for one battle. On completion it resolves the outcome exactly once,
//! appends the result banner to the log, and releases the engine.

use crate::core::constants::ROUND_TICK_INTERVAL_MS;
use crate::core::tick::{RunState, TickOutcome, TickScheduler};
use crate::effects::BattleEffects;
use crate::engine::{BattleSnapshot, EngineFactory, EngineHandle, Team, Winner};
use crate::interpret::{CombatLog, EventInterpreter, InterpretConfig};
use crate::outcome::{self, BattleOutcome};
use crate::palette::NamedColor;
use crate::run::GameRun;
use crate::species;
use rand::Rng;
use std::time::{Duration, Instant};
use tracing::info;

const BANNER: &str = "═══════════════════════════";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoundResult {
    pub winner: Winner,
    /// Winning side's survivors; zero on a mutual wipe.
    pub survivors: u32,
    pub start_count: u32,
    pub outcome: BattleOutcome,
}

pub struct BattleSession {
    scheduler: TickScheduler,
    interpreter: EventInterpreter,
    fx: BattleEffects,
    log: CombatLog,
    snapshot: Option<BattleSnapshot>,
    team_names: [String; 2],
    start_counts: [u32; 2],
    round: u32,
    result: Option<RoundResult>,
}

impl BattleSession {
    pub fn new(
        handle: EngineHandle,
        team_names: [String; 2],
        round: u32,
        config: InterpretConfig,
    ) -> Self {
        let snapshot = handle.snapshot();
        let start_counts = match &snapshot {
            Some(s) => [s.team_a.len() as u32, s.team_b.len() as u32],
            None => [0, 0],
        };
        Self {
            scheduler: TickScheduler::new(
                handle,
                Duration::from_millis(ROUND_TICK_INTERVAL_MS),
            ),
            interpreter: EventInterpreter::new(config),
            fx: BattleEffects::new(),
            log: CombatLog::new(),
            snapshot,
            team_names,
            start_counts,
            round,
            result: None,
        }
    }

    /// Spawns the engine for the run's current round.
    pub fn for_run(factory: &dyn EngineFactory, run: &GameRun, config: InterpretConfig) -> Self {
        let matchup = &run.matchup;
        let handle = EngineHandle::spawn(
            factory,
            run.battle_seed(),
            &matchup.members(Team::A),
            &matchup.members(Team::B),
        );
        info!(
            round = run.round,
            seed = run.battle_seed(),
            team_a = matchup.team_a.species.id,
            team_b = matchup.team_b.species.id,
            "battle started"
        );
        let names = [
            species::display_name(matchup.team_a.species.id),
            species::display_name(matchup.team_b.species.id),
        ];
        Self::new(handle, names, run.round, config)
    }

    pub fn start(&mut self) {
        if self.result.is_none() {
            self.scheduler
                .start(Duration::from_millis(ROUND_TICK_INTERVAL_MS));
        }
    }

    pub fn pause(&mut self) {
        self.scheduler.pause();
    }

    pub fn stop(&mut self) {
        self.scheduler.stop();
    }

    pub fn run_state(&self) -> RunState {
        self.scheduler.state()
    }

    /// Host-loop entry. `now` is the effect clock in seconds.
    pub fn pump<R: Rng>(&mut self, instant: Instant, now: f64, rng: &mut R) -> Option<RoundResult> {
        let outcome = self.scheduler.pump(instant)?;
        self.absorb(outcome, now, rng)
    }

    /// Manual single step.
    pub fn step<R: Rng>(&mut self, now: f64, rng: &mut R) -> Option<RoundResult> {
        let outcome = self.scheduler.step();
        self.absorb(outcome, now, rng)
    }

    fn absorb<R: Rng>(&mut self, outcome: TickOutcome, now: f64, rng: &mut R) -> Option<RoundResult> {
        match outcome {
            TickOutcome::Idle => None,
            TickOutcome::Advanced { events, snapshot } => {
                if snapshot.is_some() {
                    self.snapshot = snapshot;
                }
                self.interpreter.interpret(
                    &events,
                    self.snapshot.as_ref(),
                    now,
                    &mut self.fx,
                    &mut self.log,
                    rng,
                );
                None
            }
            TickOutcome::Finished { winner } => Some(self.complete(winner)),
        }
    }

    fn complete(&mut self, winner: Winner) -> RoundResult {
        if let Some(result) = self.result {
            return result;
        }
        if let Some(snapshot) = self.scheduler.handle().snapshot() {
            self.snapshot = Some(snapshot);
        }
        let (survivors, start_count) = match winner.team() {
            Some(team) => (
                self.snapshot
                    .as_ref()
                    .map_or(0, |s| s.alive_count(team) as u32),
                self.start_counts[team.index() as usize],
            ),
            None => (0, self.start_counts.iter().sum()),
        };
        let outcome = outcome::resolve(survivors, start_count, self.round);
        let result = RoundResult {
            winner,
            survivors,
            start_count,
            outcome,
        };
        self.write_banner(&result);
        self.scheduler.release();
        info!(
            round = self.round,
            ?winner,
            survivors,
            start_count,
            trophies = outcome.tier.trophies(),
            blowout = outcome.is_blowout,
            "battle finished"
        );
        self.result = Some(result);
        result
    }

    fn write_banner(&mut self, result: &RoundResult) {
        self.log.push("", NamedColor::White, false);
        self.log.push(BANNER, NamedColor::Yellow, true);
        match result.winner.team() {
            Some(team) => {
                let color = match team {
                    Team::A => NamedColor::LightGreen,
                    Team::B => NamedColor::LightRed,
                };
                let name = &self.team_names[team.index() as usize];
                self.log.push(format!("The {} side wins!", name), color, true);
                self.log.push(
                    format!("{} of {} left standing", result.survivors, result.start_count),
                    NamedColor::LightGray,
                    false,
                );
            }
            None => self
                .log
                .push("Nobody is left standing.", NamedColor::LightGray, true),
        }
        let verdict = if result.outcome.is_blowout {
            ("BLOWOUT! The run is over.".to_string(), NamedColor::LightRed)
        } else {
            (
                format!(
                    "{} trophies, +{} points",
                    result.outcome.tier.trophies(),
                    result.outcome.score
                ),
                NamedColor::Yellow,
            )
        };
        self.log.push(verdict.0, verdict.1, true);
        self.log.push(BANNER, NamedColor::Yellow, true);
    }

    /// Clears every effect, mark, and log line.
    pub fn reset_effects(&mut self) {
        self.fx.reset();
        self.log.clear();
    }

    /// Stops ticking and frees the engine. Safe to call repeatedly.
    pub fn teardown(&mut self) {
        self.scheduler.release();
    }

    pub fn set_config(&mut self, config: InterpretConfig) {
        self.interpreter.set_config(config);
    }

    pub fn snapshot(&self) -> Option<&BattleSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn effects(&self) -> &BattleEffects {
        &self.fx
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    pub fn result(&self) -> Option<RoundResult> {
        self.result
    }

    pub fn team_name(&self, team: Team) -> &str {
        &self.team_names[team.index() as usize]
    }

    pub fn start_count(&self, team: Team) -> u32 {
        self.start_counts[team.index() as usize]
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn engine_live(&self) -> bool {
        self.scheduler.handle().is_live()
    }
}

impl Drop for BattleSession {
    fn drop(&mut self) {
        self.teardown();
    }
}
