//! Marathon orchestrator: the never-ending title-screen battle.

use super::types::*;
use crate::core::constants::{
    BLOOD_VFX_LIFETIME_MAX, BLOOD_VFX_LIFETIME_MIN, DEBRIS_CAP, DEBRIS_DWELL_TICKS,
    DEBRIS_FADE_PER_TICK, DEBRIS_TRIM_TO, DECAY_DEBRIS_OPACITY, GIB_DEBRIS_OPACITY,
    MARATHON_GRID_HEIGHT, MARATHON_GRID_WIDTH, MARATHON_TEAM_MAX, MARATHON_TEAM_MIN,
    MARATHON_TICK_INTERVAL_MS, REINFORCEMENT_COOLDOWN_TICKS, VFX_CAP, VFX_TRIM_TO,
};
use crate::core::tick::{Cadence, TickOutcome, TickScheduler};
use crate::effects::scene::actor_color;
use crate::engine::{
    ActorId, BattleSnapshot, Cell, EngineFactory, EngineHandle, GridInfo, Team, TeamMember,
};
use crate::palette::NamedColor;
use crate::species::{self, Species};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::debug;

const BLOOD_GLYPHS: [char; 5] = ['*', '~', '.', ',', '\''];
const GIB_GLYPHS: [char; 5] = ['%', ';', ':', '&', '@'];
const REMAINS_GLYPHS: [char; 4] = [',', '.', '`', ';'];

/// Drives one engine after another forever, keeping the backdrop populated.
///
/// Each tick runs in a fixed order: counters, VFX aging, debris aging, death
/// animation, then either one engine step or the annihilation check, and
/// finally pool trimming.
pub struct MarathonOrchestrator {
    factory: Box<dyn EngineFactory>,
    scheduler: TickScheduler,
    cadence: Cadence,
    running: bool,
    grid: GridInfo,
    combatants: Vec<MarathonCombatant>,
    debris: Vec<MarathonDebris>,
    vfx: Vec<MarathonVfx>,
    species: [&'static Species; 2],
    generation: u32,
    cooldown: u32,
    ticks: u64,
}

impl MarathonOrchestrator {
    pub fn new(factory: Box<dyn EngineFactory>) -> Self {
        let interval = Duration::from_millis(MARATHON_TICK_INTERVAL_MS);
        let default_species = &species::SPECIES_POOL[0];
        Self {
            factory,
            scheduler: TickScheduler::new(EngineHandle::empty(), interval),
            cadence: Cadence::new(interval),
            running: false,
            grid: GridInfo {
                width: MARATHON_GRID_WIDTH,
                height: MARATHON_GRID_HEIGHT,
            },
            combatants: Vec::new(),
            debris: Vec::new(),
            vfx: Vec::new(),
            species: [default_species, default_species],
            generation: 0,
            cooldown: 0,
            ticks: 0,
        }
    }

    /// Launches a fresh matchup and begins ticking.
    pub fn start<R: Rng>(&mut self, rng: &mut R) {
        if self.running {
            return;
        }
        self.running = true;
        self.cadence.reset();
        self.fresh_start(rng);
        debug!("marathon started");
    }

    /// Releases the engine and clears every pool. Safe to call repeatedly.
    pub fn stop(&mut self) {
        if self.running {
            debug!(ticks = self.ticks, "marathon stopped");
        }
        self.running = false;
        self.scheduler.release();
        self.combatants.clear();
        self.debris.clear();
        self.vfx.clear();
        self.cooldown = 0;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Host-loop entry: ticks once when the marathon cadence has elapsed.
    pub fn pump<R: Rng>(&mut self, now: Instant, rng: &mut R) -> Option<MarathonTick> {
        if !self.running || !self.cadence.due(now) {
            return None;
        }
        Some(self.tick(rng))
    }

    pub fn tick<R: Rng>(&mut self, rng: &mut R) -> MarathonTick {
        if !self.running {
            return MarathonTick::Stopped;
        }
        self.ticks += 1;
        self.cooldown = self.cooldown.saturating_sub(1);

        self.age_vfx();
        self.age_debris();
        self.advance_dying(rng);

        let summary = if self.scheduler.handle().is_live() && !self.scheduler.is_finished() {
            self.fight(rng)
        } else if self.cooldown == 0 {
            self.check_annihilation(rng)
        } else {
            MarathonTick::Waiting
        };

        self.trim_pools();
        summary
    }

    fn age_vfx(&mut self) {
        self.vfx.retain_mut(|particle| particle.age_one());
    }

    fn age_debris(&mut self) {
        self.debris.retain_mut(|piece| {
            piece.age += 1;
            if piece.age > DEBRIS_DWELL_TICKS {
                piece.opacity -= DEBRIS_FADE_PER_TICK;
            }
            piece.opacity > 0.0
        });
    }

    fn advance_dying<R: Rng>(&mut self, rng: &mut R) {
        let mut remains = Vec::new();
        self.combatants.retain_mut(|combatant| {
            if combatant.is_alive() || combatant.advance_death() {
                return true;
            }
            remains.push((combatant.x, combatant.y));
            false
        });
        for (x, y) in remains {
            self.debris.push(MarathonDebris {
                x,
                y,
                glyph: *REMAINS_GLYPHS.choose(rng).unwrap_or(&'.'),
                color: NamedColor::DarkGray,
                opacity: DECAY_DEBRIS_OPACITY,
                age: 0,
            });
        }
    }

    fn fight<R: Rng>(&mut self, rng: &mut R) -> MarathonTick {
        let before = self.alive_ids();
        if let TickOutcome::Advanced {
            snapshot: Some(snapshot),
            ..
        } = self.scheduler.step()
        {
            self.sync(&snapshot);
        }
        let after = self.alive_ids();
        let fallen: Vec<Cell> = self
            .combatants
            .iter()
            .filter(|c| c.generation == self.generation)
            .filter(|c| before.contains(&c.id) && !after.contains(&c.id))
            .map(|c| Cell::new(c.x, c.y))
            .collect();
        for cell in &fallen {
            self.spawn_death_vfx(*cell, rng);
        }
        MarathonTick::Fought {
            deaths: fallen.len(),
        }
    }

    fn check_annihilation<R: Rng>(&mut self, rng: &mut R) -> MarathonTick {
        let alive_a = self.alive_count(Team::A);
        let alive_b = self.alive_count(Team::B);
        match (alive_a, alive_b) {
            (0, b) if b > 0 => {
                self.reinforce(Team::A, rng);
                MarathonTick::Reinforced { team: Team::A }
            }
            (a, 0) if a > 0 => {
                self.reinforce(Team::B, rng);
                MarathonTick::Reinforced { team: Team::B }
            }
            // Mutual wipe, or an engine that gave up with both sides standing
            _ => {
                self.fresh_start(rng);
                MarathonTick::FreshStart
            }
        }
    }

    /// New species on both sides; every combatant is discarded while the
    /// ground litter stays.
    fn fresh_start<R: Rng>(&mut self, rng: &mut R) {
        let (a, b) = species::random_pair(rng);
        self.species = [a, b];
        let counts = [
            rng.gen_range(MARATHON_TEAM_MIN..=MARATHON_TEAM_MAX),
            rng.gen_range(MARATHON_TEAM_MIN..=MARATHON_TEAM_MAX),
        ];
        self.combatants.clear();
        self.cooldown = 0;
        debug!(team_a = a.id, team_b = b.id, "marathon fresh start");
        self.launch(counts, rng);
    }

    /// Survivors of the winning side face a new species on `losing`.
    fn reinforce<R: Rng>(&mut self, losing: Team, rng: &mut R) {
        let survivors = self.alive_count(losing.other()).max(1);
        self.species[losing.index() as usize] = species::random(rng);
        let fresh = rng.gen_range(MARATHON_TEAM_MIN..=MARATHON_TEAM_MAX);
        let mut counts = [0; 2];
        counts[losing.index() as usize] = fresh;
        counts[losing.other().index() as usize] = survivors;
        // Dying combatants stay to finish their animation
        self.combatants.retain(|c| !c.is_alive());
        self.cooldown = REINFORCEMENT_COOLDOWN_TICKS;
        debug!(
            ?losing,
            species = self.species[losing.index() as usize].id,
            fresh,
            survivors,
            "marathon reinforcements"
        );
        self.launch(counts, rng);
    }

    fn launch<R: Rng>(&mut self, counts: [u32; 2], rng: &mut R) {
        let seed: u64 = rng.gen();
        let handle = EngineHandle::spawn(
            self.factory.as_ref(),
            seed,
            &TeamMember::squad(self.species[0].id, counts[0]),
            &TeamMember::squad(self.species[1].id, counts[1]),
        );
        self.scheduler.replace(handle);
        self.generation = self.generation.wrapping_add(1);
        if let Some(snapshot) = self.scheduler.handle().snapshot() {
            self.sync(&snapshot);
        }
    }

    /// Mirrors living actors of the current engine. Combatants that left the
    /// living set start dying.
    fn sync(&mut self, snapshot: &BattleSnapshot) {
        self.grid = snapshot.grid;
        let mut living = HashSet::new();
        for (team, actors) in [(Team::A, &snapshot.team_a), (Team::B, &snapshot.team_b)] {
            for actor in actors.iter().filter(|a| a.alive) {
                living.insert(actor.id);
                let generation = self.generation;
                match self
                    .combatants
                    .iter_mut()
                    .find(|c| c.generation == generation && c.id == actor.id && c.is_alive())
                {
                    Some(existing) => {
                        existing.x = actor.x;
                        existing.y = actor.y;
                    }
                    None => self.combatants.push(MarathonCombatant::new(
                        actor.id,
                        generation,
                        actor.x,
                        actor.y,
                        actor.glyph,
                        actor_color(actor.color.as_deref(), team),
                        team,
                    )),
                }
            }
        }
        for combatant in &mut self.combatants {
            if combatant.generation == self.generation
                && combatant.is_alive()
                && !living.contains(&combatant.id)
            {
                combatant.begin_dying();
            }
        }
    }

    fn spawn_death_vfx<R: Rng>(&mut self, at: Cell, rng: &mut R) {
        for _ in 0..rng.gen_range(3..=6) {
            let cell = self
                .grid
                .clamp(at.offset(rng.gen_range(-1..=1), rng.gen_range(-1..=1)));
            self.vfx.push(MarathonVfx {
                x: cell.x,
                y: cell.y,
                glyph: *BLOOD_GLYPHS.choose(rng).unwrap_or(&'*'),
                color: NamedColor::LightRed,
                opacity: rng.gen_range(0.6..=1.0),
                age: 0,
                lifetime: rng.gen_range(BLOOD_VFX_LIFETIME_MIN..=BLOOD_VFX_LIFETIME_MAX),
            });
        }
        for _ in 0..rng.gen_range(1..=3) {
            let cell = self
                .grid
                .clamp(at.offset(rng.gen_range(-2..=2), rng.gen_range(-1..=1)));
            self.debris.push(MarathonDebris {
                x: cell.x,
                y: cell.y,
                glyph: *GIB_GLYPHS.choose(rng).unwrap_or(&'%'),
                color: NamedColor::LightRed,
                opacity: GIB_DEBRIS_OPACITY,
                age: 0,
            });
        }
    }

    fn trim_pools(&mut self) {
        if self.debris.len() > DEBRIS_CAP {
            let excess = self.debris.len() - DEBRIS_TRIM_TO;
            self.debris.drain(..excess);
        }
        if self.vfx.len() > VFX_CAP {
            let excess = self.vfx.len() - VFX_TRIM_TO;
            self.vfx.drain(..excess);
        }
    }

    fn alive_ids(&self) -> HashSet<ActorId> {
        self.combatants
            .iter()
            .filter(|c| c.generation == self.generation && c.is_alive())
            .map(|c| c.id)
            .collect()
    }

    pub fn alive_count(&self, team: Team) -> u32 {
        self.combatants
            .iter()
            .filter(|c| c.team == team && c.is_alive())
            .count() as u32
    }

    pub fn combatants(&self) -> &[MarathonCombatant] {
        &self.combatants
    }

    pub fn debris(&self) -> &[MarathonDebris] {
        &self.debris
    }

    pub fn vfx(&self) -> &[MarathonVfx] {
        &self.vfx
    }

    pub fn species(&self, team: Team) -> &'static Species {
        self.species[team.index() as usize]
    }

    pub fn grid(&self) -> GridInfo {
        self.grid
    }

    pub fn cooldown(&self) -> u32 {
        self.cooldown
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    pub fn engine_live(&self) -> bool {
        self.scheduler.handle().is_live()
    }
}

impl Drop for MarathonOrchestrator {
    fn drop(&mut self) {
        self.scheduler.release();
    }
}
