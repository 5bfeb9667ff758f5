//! Per-cell render resolution.
//!
//! Layers, highest first: live actor (Team A over Team B), visible blip,
//! latest visible mark, procedural terrain. Tints color the background of
//! whatever wins.

use super::BattleEffects;
use crate::engine::{BattleSnapshot, Cell, Team};
use crate::palette::{self, NamedColor, Rgb};
use std::collections::HashMap;

const PRISTINE_GLYPHS: [char; 5] = ['`', '.', ',', '\'', '"'];
const TRAMPLED_GLYPHS: [char; 5] = ['\'', '.', ',', '-', '_'];
const TERRAIN_OPACITY: f64 = 0.75;
const FLASH_BRIGHTEN: f64 = 1.8;

/// Which layer produced a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layer {
    Actor(Team),
    Blip,
    Mark,
    Terrain,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedCell {
    pub layer: Layer,
    pub glyph: char,
    pub fg: Rgb,
    /// Background tint, if any.
    pub bg: Option<Rgb>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainGlyph {
    pub glyph: char,
    pub color: Rgb,
    pub opacity: f64,
}

fn terrain_hash(cell: Cell) -> i64 {
    (cell.x as i64).wrapping_mul(73_856_093) ^ (cell.y as i64).wrapping_mul(19_349_663)
}

/// Ground glyph for a cell. Stable across frames; darker and flatter as the
/// trample count rises.
pub fn terrain_at(cell: Cell, trample: u8) -> TerrainGlyph {
    let hash = terrain_hash(cell);
    let glyph = if trample > 0 {
        TRAMPLED_GLYPHS[(trample as usize).min(TRAMPLED_GLYPHS.len() - 1)]
    } else {
        PRISTINE_GLYPHS[(hash.unsigned_abs() % PRISTINE_GLYPHS.len() as u64) as usize]
    };
    let jitter = ((hash >> 3) & 0xF) as f64 / 255.0;
    let red = 0.18 + jitter * 0.05;
    let green = 0.32 + jitter * 0.1 - trample as f64 * 0.05;
    TerrainGlyph {
        glyph,
        color: Rgb::from_unit(red, green, 0.18),
        opacity: TERRAIN_OPACITY,
    }
}

/// Color an actor is drawn in.
pub fn actor_color(color: Option<&str>, team: Team) -> NamedColor {
    match color {
        Some(name) => NamedColor::from_name(name),
        None => match team {
            Team::A => palette::TEAM_A,
            Team::B => palette::TEAM_B,
        },
    }
}

/// One frame's view of the battlefield.
pub struct Scene<'a> {
    snapshot: Option<&'a BattleSnapshot>,
    fx: &'a BattleEffects,
    now: f64,
    tints: HashMap<Cell, (NamedColor, f64)>,
}

impl<'a> Scene<'a> {
    pub fn new(snapshot: Option<&'a BattleSnapshot>, fx: &'a BattleEffects, now: f64) -> Self {
        Self {
            snapshot,
            fx,
            now,
            tints: fx.tints.strongest(now),
        }
    }

    pub fn resolve(&self, cell: Cell) -> ResolvedCell {
        let background = palette::BACKGROUND.rgb();
        let bg = self
            .tints
            .get(&cell)
            .map(|(color, opacity)| color.rgb().blend_over(background, *opacity));

        if let Some(resolved) = self.actor_at(cell) {
            return ResolvedCell { bg, ..resolved };
        }
        if let Some(blip) = self.fx.blips.top_at(cell, self.now) {
            return ResolvedCell {
                layer: Layer::Blip,
                glyph: blip.glyph,
                fg: blip.color.rgb(),
                bg,
            };
        }
        if let Some(mark) = self.fx.marks.latest_at(cell, self.now) {
            return ResolvedCell {
                layer: Layer::Mark,
                glyph: mark.glyph,
                fg: mark.color.rgb().blend_over(background, mark.opacity_at(self.now)),
                bg,
            };
        }
        let terrain = terrain_at(cell, self.fx.trample.get(cell));
        ResolvedCell {
            layer: Layer::Terrain,
            glyph: terrain.glyph,
            fg: terrain.color.blend_over(background, terrain.opacity),
            bg,
        }
    }

    fn actor_at(&self, cell: Cell) -> Option<ResolvedCell> {
        let snapshot = self.snapshot?;
        [Team::A, Team::B].into_iter().find_map(|team| {
            let actor = snapshot
                .team(team)
                .iter()
                .find(|a| a.alive && a.cell() == cell)?;
            let mut fg = actor_color(actor.color.as_deref(), team).rgb();
            if self.fx.flashes.is_flashing(actor.id, self.now) {
                fg = fg.brighten(FLASH_BRIGHTEN);
            }
            Some(ResolvedCell {
                layer: Layer::Actor(team),
                glyph: actor.glyph,
                fg,
                bg: None,
            })
        })
    }
}
