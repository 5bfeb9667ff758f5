//! Maps resolved combat events to log lines, effects, and ground marks.

use super::phrases;
use super::types::{CombatLog, InterpretConfig};
use crate::core::constants::*;
use crate::effects::{BattleEffects, Blip, Flash, GridMark, Tint};
use crate::engine::{ActorId, BattleSnapshot, Cell, GridInfo, ResolvedEvent, Status};
use crate::names::NameBook;
use crate::palette::NamedColor;
use rand::seq::SliceRandom;
use rand::Rng;

const IMPACT_GLYPHS: [char; 5] = ['/', '\\', 'x', 'X', '*'];
const STAIN_GLYPHS: [char; 4] = ['.', ',', '\'', '`'];
const GIB_EXTRA_GLYPHS: [char; 5] = ['\'', '`', ',', '.', '~'];
const CORPSE_GLYPH: char = 'X';
const DEATH_GLYPH: char = '✚';

const STAIN_BASE_OPACITY: f64 = 0.5;
const STAIN_OPACITY_PER_AMOUNT: f64 = 0.02;
const GIB_MARK_OPACITY: f64 = 0.7;
const CORPSE_MARK_OPACITY: f64 = 0.7;
const VOMIT_MARK_OPACITY: f64 = 0.5;
const HIT_LOUD_DAMAGE: u32 = 10;

/// Stateless apart from its configuration; everything it writes to is passed
/// in by the owning orchestrator.
#[derive(Debug, Clone, Default)]
pub struct EventInterpreter {
    config: InterpretConfig,
}

/// Per-pass view of the snapshot used for lookups.
struct Frame<'a> {
    snapshot: Option<&'a BattleSnapshot>,
    names: NameBook,
    now: f64,
}

impl<'a> Frame<'a> {
    fn position(&self, id: ActorId) -> Option<Cell> {
        self.snapshot?.actor(id).map(|a| a.cell())
    }

    fn grid(&self) -> Option<GridInfo> {
        self.snapshot.map(|s| s.grid)
    }

    fn clamp(&self, cell: Cell) -> Cell {
        match self.grid() {
            Some(grid) => grid.clamp(cell),
            None => cell,
        }
    }
}

impl EventInterpreter {
    pub fn new(config: InterpretConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InterpretConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: InterpretConfig) {
        self.config = config;
    }

    /// Processes one tick's events in engine order.
    ///
    /// Expired effects are swept before anything new is inserted.
    pub fn interpret<R: Rng>(
        &self,
        events: &[ResolvedEvent],
        snapshot: Option<&BattleSnapshot>,
        now: f64,
        fx: &mut BattleEffects,
        log: &mut CombatLog,
        rng: &mut R,
    ) {
        fx.sweep(now);
        let frame = Frame {
            snapshot,
            names: NameBook::from_snapshot(snapshot),
            now,
        };
        for event in events {
            self.apply(event, &frame, fx, log, rng);
        }
    }

    fn apply<R: Rng>(
        &self,
        event: &ResolvedEvent,
        frame: &Frame<'_>,
        fx: &mut BattleEffects,
        log: &mut CombatLog,
        rng: &mut R,
    ) {
        let gore = self.config.gore;
        match event {
            ResolvedEvent::Move { from, to, .. } => {
                if rng.gen_bool(TRAMPLE_FROM_CHANCE) {
                    fx.trample.bump(*from);
                }
                if rng.gen_bool(TRAMPLE_TO_CHANCE) {
                    fx.trample.bump(*to);
                }
            }

            ResolvedEvent::Hit {
                attacker,
                defender,
                part,
                damage,
                attack_name,
            } => {
                let line = phrases::hit(
                    &frame.names.name(*attacker),
                    &frame.names.name(*defender),
                    part,
                    *damage,
                    attack_name,
                    rng,
                );
                let color = if *damage >= HIT_LOUD_DAMAGE {
                    NamedColor::LightRed
                } else {
                    NamedColor::Green
                };
                log.push(line, color, *damage >= SEVERITY_GRIEVOUS_DAMAGE);

                if let Some(cell) = frame.position(*defender) {
                    self.flash(fx, frame, *defender, TTL_HIT_DEFENDER_FLASH);
                    let glyph = IMPACT_GLYPHS.choose(rng).copied().unwrap_or('x');
                    let ttl = TTL_HIT_DEFENDER_BLIP * gore.particle_duration;
                    self.blip(fx, frame, cell, glyph, NamedColor::Red, ttl);
                    self.tint(
                        fx,
                        frame,
                        cell,
                        0,
                        NamedColor::Red,
                        gore.tint_opacity * TINT_HIT_FACTOR,
                        TTL_HIT_TINT * gore.particle_duration,
                    );
                }
                if let Some(cell) = frame.position(*attacker) {
                    self.flash(fx, frame, *attacker, TTL_HIT_ATTACKER_FLASH);
                    self.blip(fx, frame, cell, '!', NamedColor::Orange, TTL_HIT_ATTACKER_BLIP);
                }
            }

            ResolvedEvent::Bleed { actor, amount } => {
                log.push(
                    phrases::bleed(&frame.names.name(*actor), rng),
                    NamedColor::Red,
                    false,
                );
                if let Some(cell) = frame.position(*actor) {
                    let ttl = TTL_BLEED_BLIP * gore.particle_duration;
                    self.blip(fx, frame, cell, '~', NamedColor::Red, ttl);
                    if rng.gen_bool(gore.blood_stain_chance.clamp(0.0, 1.0)) {
                        let glyph = STAIN_GLYPHS.choose(rng).copied().unwrap_or('.');
                        let opacity = (STAIN_BASE_OPACITY
                            + *amount as f64 * STAIN_OPACITY_PER_AMOUNT)
                            .min(1.0);
                        self.mark(fx, frame, cell, glyph, NamedColor::Red, opacity, !gore.fade_marks);
                    }
                }
            }

            ResolvedEvent::Sever {
                actor,
                part,
                debris_glyph,
                pos,
            } => {
                log.push(
                    phrases::sever(&frame.names.name(*actor), part),
                    NamedColor::Orange,
                    true,
                );
                for _ in 0..gore.gib_count {
                    let scatter = pos.offset(
                        rng.gen_range(-GIB_SCATTER_RADIUS..=GIB_SCATTER_RADIUS),
                        rng.gen_range(-GIB_SCATTER_RADIUS..=GIB_SCATTER_RADIUS),
                    );
                    let cell = frame.clamp(scatter);
                    let glyph = if rng.gen_range(0..=GIB_EXTRA_GLYPHS.len()) == 0 {
                        *debris_glyph
                    } else {
                        GIB_EXTRA_GLYPHS.choose(rng).copied().unwrap_or(*debris_glyph)
                    };
                    let jitter = rng.gen_range(0.0..=TTL_GIB_BLIP_JITTER);
                    let ttl = (TTL_GIB_BLIP_MIN + jitter) * gore.particle_duration;
                    self.blip(fx, frame, cell, glyph, NamedColor::Red, ttl);
                    if rng.gen_bool(GIB_MARK_CHANCE) {
                        self.mark(
                            fx,
                            frame,
                            cell,
                            glyph,
                            NamedColor::Red,
                            GIB_MARK_OPACITY,
                            !gore.fade_marks,
                        );
                    }
                }
                if let Some(cell) = frame.position(*actor) {
                    self.flash(fx, frame, *actor, TTL_SEVER_FLASH);
                    self.blip(fx, frame, cell, '*', NamedColor::Orange, TTL_SEVER_BLIP);
                    self.tint(
                        fx,
                        frame,
                        cell,
                        1,
                        NamedColor::Red,
                        gore.tint_opacity * TINT_SEVER_FACTOR,
                        TTL_SEVER_TINT,
                    );
                }
            }

            ResolvedEvent::Death { actor, pos } => {
                log.push(
                    phrases::death(&frame.names.name(*actor), rng),
                    NamedColor::LightRed,
                    true,
                );
                self.blip(fx, frame, *pos, DEATH_GLYPH, NamedColor::LightGray, TTL_DEATH_BLIP);
                self.mark(
                    fx,
                    frame,
                    *pos,
                    CORPSE_GLYPH,
                    NamedColor::LightGray,
                    CORPSE_MARK_OPACITY,
                    true,
                );
                self.tint(
                    fx,
                    frame,
                    *pos,
                    0,
                    NamedColor::Red,
                    gore.tint_opacity * TINT_DEATH_FACTOR,
                    TTL_DEATH_TINT,
                );
            }

            ResolvedEvent::Vomit { actor, pos, .. } => {
                log.push(
                    phrases::vomit(&frame.names.name(*actor), rng),
                    NamedColor::LightGreen,
                    false,
                );
                self.blip(fx, frame, *pos, '@', NamedColor::Green, TTL_VOMIT_BLIP);
                self.mark(
                    fx,
                    frame,
                    *pos,
                    '~',
                    NamedColor::Green,
                    VOMIT_MARK_OPACITY,
                    !gore.fade_marks,
                );
                self.tint(
                    fx,
                    frame,
                    *pos,
                    0,
                    NamedColor::Green,
                    gore.tint_opacity * TINT_VOMIT_FACTOR,
                    TTL_VOMIT_TINT,
                );
            }

            ResolvedEvent::StatusChange {
                actor,
                status,
                active,
            } => {
                let name = frame.names.name(*actor);
                match (status, *active) {
                    (Status::Miss, true) => {
                        log.push(phrases::miss(&name, rng), NamedColor::LightGray, false);
                        if let Some(cell) = frame.position(*actor) {
                            self.blip(fx, frame, cell, '?', NamedColor::Yellow, TTL_MISS_BLIP);
                        }
                    }
                    (Status::Fleeing, true) => {
                        log.push(phrases::flee(&name), NamedColor::Yellow, false);
                    }
                    (Status::Fleeing, false) => {
                        log.push(phrases::rally(&name), NamedColor::LightGray, false);
                    }
                    (Status::Other(other), true) => {
                        log.push(phrases::status(&name, other), NamedColor::LightGray, false);
                    }
                    (_, false) => {}
                }
            }

            ResolvedEvent::Bump { bumper, bumped, to } => {
                log.push(
                    phrases::shove(&frame.names.name(*bumper), &frame.names.name(*bumped)),
                    NamedColor::Yellow,
                    false,
                );
                self.blip(fx, frame, *to, '*', NamedColor::Yellow, TTL_BUMP_BLIP);
                if let Some(cell) = frame.position(*bumped) {
                    self.flash(fx, frame, *bumped, TTL_BUMP_FLASH);
                    self.blip(fx, frame, cell, '!', NamedColor::Orange, TTL_BUMP_BUMPED_BLIP);
                }
            }
        }
    }

    fn expiry(&self, frame: &Frame<'_>, base_ttl: f64) -> f64 {
        frame.now + base_ttl * self.config.motion_scale
    }

    fn blip(
        &self,
        fx: &mut BattleEffects,
        frame: &Frame<'_>,
        cell: Cell,
        glyph: char,
        color: NamedColor,
        base_ttl: f64,
    ) {
        fx.blips.insert(Blip {
            cell,
            glyph,
            color,
            expires_at: self.expiry(frame, base_ttl),
        });
    }

    fn flash(&self, fx: &mut BattleEffects, frame: &Frame<'_>, actor: ActorId, base_ttl: f64) {
        fx.flashes.insert(Flash {
            actor,
            expires_at: self.expiry(frame, base_ttl),
        });
    }

    /// Tints `center` and, for a positive radius, nearby cells with linear
    /// distance falloff. Cells whose falloff reaches zero get nothing.
    #[allow(clippy::too_many_arguments)]
    fn tint(
        &self,
        fx: &mut BattleEffects,
        frame: &Frame<'_>,
        center: Cell,
        radius: i32,
        color: NamedColor,
        opacity: f64,
        base_ttl: f64,
    ) {
        let expires_at = self.expiry(frame, base_ttl);
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let dist = ((dx * dx + dy * dy) as f64).sqrt();
                if dist > radius as f64 {
                    continue;
                }
                let falloff = if radius == 0 {
                    1.0
                } else {
                    1.0 - dist / radius as f64
                };
                let strength = opacity * falloff;
                let cell = center.offset(dx, dy);
                if strength <= 0.0 || frame.grid().is_some_and(|g| !g.contains(cell)) {
                    continue;
                }
                fx.tints.insert(Tint {
                    cell,
                    color,
                    opacity: strength,
                    created_at: frame.now,
                    expires_at,
                });
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn mark(
        &self,
        fx: &mut BattleEffects,
        frame: &Frame<'_>,
        cell: Cell,
        glyph: char,
        color: NamedColor,
        opacity: f64,
        permanent: bool,
    ) {
        fx.marks.push(GridMark {
            cell,
            glyph,
            color,
            opacity,
            permanent,
            placed_at: frame.now,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::ActorSnapshot;
    use crate::settings::{GoreIntensity, Settings};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn snapshot() -> BattleSnapshot {
        let actor = |id: u32, team: u8, x: i32| ActorSnapshot {
            id,
            species_id: "rat".to_string(),
            glyph: 'r',
            team,
            x,
            y: 1,
            hp: 10,
            max_hp: 10,
            alive: true,
            color: None,
        };
        BattleSnapshot {
            seed: 0,
            tick_count: 1,
            finished: false,
            winner: None,
            grid: GridInfo {
                width: 10,
                height: 5,
            },
            team_a: vec![actor(0, 0, 2)],
            team_b: vec![actor(1, 1, 3)],
        }
    }

    fn run(
        interpreter: &EventInterpreter,
        events: &[ResolvedEvent],
    ) -> (BattleEffects, CombatLog) {
        let mut fx = BattleEffects::new();
        let mut log = CombatLog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let snap = snapshot();
        interpreter.interpret(events, Some(&snap), 0.0, &mut fx, &mut log, &mut rng);
        (fx, log)
    }

    #[test]
    fn test_hit_spawns_blips_flashes_tint() {
        let (fx, log) = run(
            &EventInterpreter::default(),
            &[ResolvedEvent::Hit {
                attacker: 0,
                defender: 1,
                part: "head".to_string(),
                damage: 5,
                attack_name: "bite".to_string(),
            }],
        );
        assert_eq!(log.len(), 1);
        assert!(!log.last().unwrap().is_critical);
        assert_eq!(fx.blips.len(), 2);
        assert_eq!(fx.flashes.len(), 2);
        assert_eq!(fx.tints.len(), 1);
        assert!(fx.flashes.is_flashing(0, 0.05));
        assert!(fx.flashes.is_flashing(1, 0.05));
        assert!(fx.blips.top_at(Cell::new(2, 1), 0.0).is_some_and(|b| b.glyph == '!'));
    }

    #[test]
    fn test_reduced_motion_halves_ttl() {
        let settings = Settings {
            reduced_motion: true,
            ..Settings::default()
        };
        let interpreter = EventInterpreter::new(InterpretConfig::from_settings(&settings));
        let (fx, _) = run(
            &interpreter,
            &[ResolvedEvent::Death {
                actor: 1,
                pos: Cell::new(3, 1),
            }],
        );
        let blip = fx.blips.iter().next().unwrap();
        assert!((blip.expires_at - TTL_DEATH_BLIP * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_death_leaves_permanent_corpse() {
        let (fx, log) = run(
            &EventInterpreter::default(),
            &[ResolvedEvent::Death {
                actor: 1,
                pos: Cell::new(3, 1),
            }],
        );
        let mark = fx.marks.iter().next().unwrap();
        assert!(mark.permanent);
        assert_eq!(mark.glyph, CORPSE_GLYPH);
        assert!(log.last().unwrap().is_critical);
    }

    #[test]
    fn test_sever_scatter_stays_on_grid() {
        let config = InterpretConfig::from_settings(&Settings {
            gore_intensity: GoreIntensity::Grotesque,
            reduced_motion: false,
        });
        let interpreter = EventInterpreter::new(config);
        let (fx, _) = run(
            &interpreter,
            &[ResolvedEvent::Sever {
                actor: 1,
                part: "tail".to_string(),
                debris_glyph: '~',
                pos: Cell::new(0, 0),
            }],
        );
        let grid = snapshot().grid;
        // 6 gibs plus the actor's own spark
        assert_eq!(fx.blips.len(), 7);
        assert!(fx.blips.iter().all(|b| grid.contains(b.cell)));
        assert!(fx.marks.iter().all(|m| grid.contains(m.cell)));
    }

    #[test]
    fn test_miss_deactivation_is_silent() {
        let (fx, log) = run(
            &EventInterpreter::default(),
            &[
                ResolvedEvent::StatusChange {
                    actor: 0,
                    status: Status::Miss,
                    active: true,
                },
                ResolvedEvent::StatusChange {
                    actor: 0,
                    status: Status::Miss,
                    active: false,
                },
            ],
        );
        assert_eq!(log.len(), 1);
        assert_eq!(fx.blips.len(), 1);
    }

    #[test]
    fn test_sweep_runs_before_insert() {
        let interpreter = EventInterpreter::default();
        let mut fx = BattleEffects::new();
        let mut log = CombatLog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        fx.blips.insert(Blip {
            cell: Cell::new(0, 0),
            glyph: 'o',
            color: NamedColor::White,
            expires_at: 1.0,
        });
        interpreter.interpret(&[], None, 5.0, &mut fx, &mut log, &mut rng);
        assert!(fx.blips.is_empty());
    }
}
