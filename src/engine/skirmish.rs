//! Stand-in battle engine.
//!
//! Rules are deliberately minimal: every living fighter walks toward the
//! nearest enemy and strikes when adjacent. It speaks the same JSON contract
//! as the real engine (lowercase event tags, snake_case fields, dead actors
//! kept in the snapshot with `is_alive: false`) so the binary runs standalone.

use super::codec::encode_events;
use super::types::{
    ActorId, ActorSnapshot, BattleSnapshot, Cell, GridInfo, ResolvedEvent, Status, TeamMember,
};
use super::{BattleEngine, EngineFactory};
use crate::species;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Battles that run this long end undecided.
pub const MAX_TICKS: u64 = 1_500;

const MISS_CHANCE: f64 = 0.15;
const SEVER_DAMAGE: i32 = 12;
const BLEED_DAMAGE: i32 = 6;
const FLEE_CHANCE: f64 = 0.3;
const RALLY_CHANCE: f64 = 0.2;
const VOMIT_CHANCE: f64 = 0.1;

const BODY_PARTS: [&str; 8] = [
    "head", "upper_body", "lower_body", "left_front_leg", "right_front_leg", "left_rear_leg",
    "right_rear_leg", "tail",
];
/// Parts that can come off, with the gib they leave behind.
const SEVERABLE: [(&str, char); 5] = [
    ("left_front_leg", '%'),
    ("right_front_leg", '%'),
    ("left_rear_leg", '%'),
    ("right_rear_leg", '%'),
    ("tail", '~'),
];

fn attack_name(species_id: &str) -> &'static str {
    match species_id {
        "chicken" | "goose" => "peck",
        "cat" => "scratch",
        "bear" | "lion" | "tiger" | "demon" => "claw",
        "spider" => "sting",
        "baboon" => "bash",
        _ => "bite",
    }
}

#[derive(Debug, Clone)]
struct Fighter {
    id: ActorId,
    species_id: String,
    glyph: char,
    color: Option<String>,
    team: u8,
    pos: Cell,
    hp: i32,
    max_hp: i32,
    alive: bool,
    fleeing: bool,
    lost_parts: Vec<&'static str>,
}

impl Fighter {
    fn snapshot(&self) -> ActorSnapshot {
        ActorSnapshot {
            id: self.id,
            species_id: self.species_id.clone(),
            glyph: self.glyph,
            team: self.team,
            x: self.pos.x,
            y: self.pos.y,
            hp: self.hp.max(0),
            max_hp: self.max_hp,
            alive: self.alive,
            color: self.color.clone(),
        }
    }
}

fn chebyshev(a: Cell, b: Cell) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

pub struct SkirmishEngine {
    seed: u64,
    rng: StdRng,
    grid: GridInfo,
    fighters: Vec<Fighter>,
    pending: Vec<ResolvedEvent>,
    tick_count: u64,
    finished: bool,
    winner: Option<u8>,
}

impl SkirmishEngine {
    pub fn new(seed: u64, width: i32, height: i32) -> Self {
        Self {
            seed,
            rng: StdRng::seed_from_u64(seed),
            grid: GridInfo {
                width: width.max(2),
                height: height.max(1),
            },
            fighters: Vec::new(),
            pending: Vec::new(),
            tick_count: 0,
            finished: false,
            winner: None,
        }
    }

    fn spawn_team(&mut self, members: &[TeamMember], team: u8) {
        let height = self.grid.height;
        for (idx, member) in members.iter().enumerate() {
            let idx = idx as i32;
            let column = idx / height;
            let x = if team == 0 {
                column
            } else {
                self.grid.width - 1 - column
            };
            let pos = self.grid.clamp(Cell::new(x, idx % height));
            let known = species::find(&member.species_id);
            let max_hp = self.rng.gen_range(8..=16);
            self.fighters.push(Fighter {
                id: self.fighters.len() as ActorId,
                species_id: member.species_id.clone(),
                glyph: known.map(|s| s.glyph).unwrap_or('?'),
                color: known.map(|s| s.color.to_string()),
                team,
                pos,
                hp: max_hp,
                max_hp,
                alive: true,
                fleeing: false,
                lost_parts: Vec::new(),
            });
        }
    }

    fn occupant(&self, cell: Cell) -> Option<usize> {
        self.fighters.iter().position(|f| f.alive && f.pos == cell)
    }

    fn nearest_enemy(&self, idx: usize) -> Option<usize> {
        let me = &self.fighters[idx];
        self.fighters
            .iter()
            .enumerate()
            .filter(|(_, f)| f.alive && f.team != me.team)
            .min_by_key(|(_, f)| (chebyshev(me.pos, f.pos), f.id))
            .map(|(i, _)| i)
    }

    fn alive_count(&self, team: u8) -> usize {
        self.fighters.iter().filter(|f| f.alive && f.team == team).count()
    }

    fn act(&mut self, idx: usize) {
        let Some(enemy) = self.nearest_enemy(idx) else {
            return;
        };
        let me = self.fighters[idx].pos;
        let target = self.fighters[enemy].pos;

        if self.fighters[idx].fleeing {
            if self.rng.gen_bool(RALLY_CHANCE) {
                self.fighters[idx].fleeing = false;
                self.pending.push(ResolvedEvent::StatusChange {
                    actor: self.fighters[idx].id,
                    status: Status::Fleeing,
                    active: false,
                });
            } else {
                let away = ((me.x - target.x).signum(), (me.y - target.y).signum());
                self.step(idx, away);
            }
            return;
        }

        if chebyshev(me, target) <= 1 {
            self.attack(idx, enemy);
        } else {
            let toward = ((target.x - me.x).signum(), (target.y - me.y).signum());
            self.step(idx, toward);
        }
    }

    fn attack(&mut self, attacker: usize, defender: usize) {
        let attacker_id = self.fighters[attacker].id;
        if self.rng.gen_bool(MISS_CHANCE) {
            for active in [true, false] {
                self.pending.push(ResolvedEvent::StatusChange {
                    actor: attacker_id,
                    status: Status::Miss,
                    active,
                });
            }
            return;
        }

        let damage: i32 = self.rng.gen_range(1..=18);
        let part = {
            let lost = &self.fighters[defender].lost_parts;
            let remaining: Vec<&'static str> = BODY_PARTS
                .iter()
                .copied()
                .filter(|p| !lost.contains(p))
                .collect();
            remaining.choose(&mut self.rng).copied().unwrap_or("upper_body")
        };
        let attack = attack_name(&self.fighters[attacker].species_id).to_string();
        let def = &mut self.fighters[defender];
        def.hp -= damage;
        let (defender_id, pos) = (def.id, def.pos);
        self.pending.push(ResolvedEvent::Hit {
            attacker: attacker_id,
            defender: defender_id,
            part: part.to_string(),
            damage: damage as u32,
            attack_name: attack,
        });

        if damage >= SEVER_DAMAGE {
            if let Some((severed, gib)) = SEVERABLE.iter().find(|(p, _)| *p == part) {
                self.fighters[defender].lost_parts.push(*severed);
                self.pending.push(ResolvedEvent::Sever {
                    actor: defender_id,
                    part: severed.to_string(),
                    debris_glyph: *gib,
                    pos,
                });
            }
        }

        let def = &mut self.fighters[defender];
        if def.hp <= 0 {
            def.alive = false;
            self.pending.push(ResolvedEvent::Death {
                actor: defender_id,
                pos,
            });
            return;
        }
        if damage >= BLEED_DAMAGE {
            self.pending.push(ResolvedEvent::Bleed {
                actor: defender_id,
                amount: (damage / 3) as u32,
            });
        }
        let (hp, max_hp, fleeing) = (def.hp, def.max_hp, def.fleeing);
        if hp * 4 < max_hp {
            if !fleeing && self.rng.gen_bool(FLEE_CHANCE) {
                self.fighters[defender].fleeing = true;
                self.pending.push(ResolvedEvent::StatusChange {
                    actor: defender_id,
                    status: Status::Fleeing,
                    active: true,
                });
            } else if self.rng.gen_bool(VOMIT_CHANCE) {
                self.pending.push(ResolvedEvent::Vomit {
                    actor: defender_id,
                    amount: 1,
                    pos,
                });
            }
        }
    }

    /// Moves one cell in `dir`, shoving an ally out of the way if needed.
    /// Falls back to single-axis steps when the diagonal is blocked.
    fn step(&mut self, idx: usize, dir: (i32, i32)) {
        let from = self.fighters[idx].pos;
        let candidates = [dir, (dir.0, 0), (0, dir.1)];
        for (dx, dy) in candidates {
            if dx == 0 && dy == 0 {
                continue;
            }
            let to = from.offset(dx, dy);
            if !self.grid.contains(to) {
                continue;
            }
            match self.occupant(to) {
                None => {
                    self.move_to(idx, from, to);
                    return;
                }
                Some(other) if self.fighters[other].team == self.fighters[idx].team => {
                    let pushed = to.offset(dx, dy);
                    if self.grid.contains(pushed) && self.occupant(pushed).is_none() {
                        self.fighters[other].pos = pushed;
                        self.pending.push(ResolvedEvent::Bump {
                            bumper: self.fighters[idx].id,
                            bumped: self.fighters[other].id,
                            to: pushed,
                        });
                        self.move_to(idx, from, to);
                        return;
                    }
                }
                Some(_) => {}
            }
        }
    }

    fn move_to(&mut self, idx: usize, from: Cell, to: Cell) {
        self.fighters[idx].pos = to;
        self.pending.push(ResolvedEvent::Move {
            actor: self.fighters[idx].id,
            from,
            to,
        });
    }

    fn check_finished(&mut self) {
        let (a, b) = (self.alive_count(0), self.alive_count(1));
        self.winner = match (a, b) {
            (0, 0) => None,
            (0, _) => Some(1),
            (_, 0) => Some(0),
            _ if self.tick_count >= MAX_TICKS => None,
            _ => return,
        };
        self.finished = true;
    }

    fn snapshot(&self) -> BattleSnapshot {
        let team = |t: u8| -> Vec<ActorSnapshot> {
            self.fighters
                .iter()
                .filter(|f| f.team == t)
                .map(Fighter::snapshot)
                .collect()
        };
        BattleSnapshot {
            seed: self.seed,
            tick_count: self.tick_count,
            finished: self.finished,
            winner: self.winner,
            grid: self.grid,
            team_a: team(0),
            team_b: team(1),
        }
    }
}

impl BattleEngine for SkirmishEngine {
    fn initialize(&mut self, team_a_json: &str, team_b_json: &str) -> bool {
        let (Ok(team_a), Ok(team_b)) = (
            serde_json::from_str::<Vec<TeamMember>>(team_a_json),
            serde_json::from_str::<Vec<TeamMember>>(team_b_json),
        ) else {
            return false;
        };
        if team_a.is_empty() || team_b.is_empty() {
            return false;
        }
        self.fighters.clear();
        self.spawn_team(&team_a, 0);
        self.spawn_team(&team_b, 1);
        true
    }

    fn tick(&mut self) {
        if self.finished {
            return;
        }
        self.tick_count += 1;
        for idx in 0..self.fighters.len() {
            if self.fighters[idx].alive {
                self.act(idx);
            }
        }
        self.check_finished();
    }

    fn events_json(&mut self) -> String {
        encode_events(&std::mem::take(&mut self.pending))
    }

    fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn winner(&self) -> i32 {
        self.winner.map_or(-1, i32::from)
    }

    fn release(&mut self) {
        self.fighters.clear();
        self.pending.clear();
    }
}

/// Creates skirmish engines on a fixed-size grid.
#[derive(Debug, Clone, Copy)]
pub struct SkirmishFactory {
    pub width: i32,
    pub height: i32,
}

impl SkirmishFactory {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

impl EngineFactory for SkirmishFactory {
    fn create(&self, seed: u64) -> Box<dyn BattleEngine> {
        Box::new(SkirmishEngine::new(seed, self.width, self.height))
    }
}
