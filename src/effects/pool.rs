//! Transient visual effects with a fixed expiry.
//!
//! An effect is visible while `expires_at > now`. Pools are swept before every
//! interpretation pass, so entries that expired while the view was paused are
//! dropped rather than replayed.

use crate::engine::{ActorId, Cell};
use crate::palette::NamedColor;
use std::collections::HashMap;

pub trait Expiring {
    /// Absolute expiry in clock seconds.
    fn expires_at(&self) -> f64;

    fn is_visible(&self, now: f64) -> bool {
        self.expires_at() > now
    }
}

/// A glyph drawn over a cell for a moment (impact sparks, gibs, `?` on a miss).
#[derive(Debug, Clone, PartialEq)]
pub struct Blip {
    pub cell: Cell,
    pub glyph: char,
    pub color: NamedColor,
    pub expires_at: f64,
}

/// Brightens an actor's glyph while live.
#[derive(Debug, Clone, PartialEq)]
pub struct Flash {
    pub actor: ActorId,
    pub expires_at: f64,
}

/// Background color wash on a single cell.
///
/// Opacity fades linearly from `opacity` at `created_at` to zero at
/// `expires_at`.
#[derive(Debug, Clone, PartialEq)]
pub struct Tint {
    pub cell: Cell,
    pub color: NamedColor,
    pub opacity: f64,
    pub created_at: f64,
    pub expires_at: f64,
}

impl Tint {
    pub fn remaining_opacity(&self, now: f64) -> f64 {
        let span = self.expires_at - self.created_at;
        if span <= 0.0 || now >= self.expires_at {
            return 0.0;
        }
        let left = ((self.expires_at - now) / span).clamp(0.0, 1.0);
        self.opacity * left
    }
}

impl Expiring for Blip {
    fn expires_at(&self) -> f64 {
        self.expires_at
    }
}

impl Expiring for Flash {
    fn expires_at(&self) -> f64 {
        self.expires_at
    }
}

impl Expiring for Tint {
    fn expires_at(&self) -> f64 {
        self.expires_at
    }
}

/// Insertion-ordered collection of expiring effects.
#[derive(Debug, Clone)]
pub struct EffectPool<T> {
    items: Vec<T>,
}

impl<T> Default for EffectPool<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Expiring> EffectPool<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, effect: T) {
        self.items.push(effect);
    }

    /// Keeps only entries still visible at `now`.
    pub fn sweep(&mut self, now: f64) {
        self.items.retain(|e| e.is_visible(now));
    }

    /// All entries, including ones that expired since the last sweep.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    /// Entries visible at `now`, oldest first.
    pub fn visible(&self, now: f64) -> impl Iterator<Item = &T> {
        self.items.iter().filter(move |e| e.is_visible(now))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl EffectPool<Flash> {
    pub fn is_flashing(&self, actor: ActorId, now: f64) -> bool {
        self.visible(now).any(|f| f.actor == actor)
    }
}

impl EffectPool<Blip> {
    /// The most recently inserted visible blip on `cell`.
    pub fn top_at(&self, cell: Cell, now: f64) -> Option<&Blip> {
        self.items
            .iter()
            .rev()
            .find(|b| b.cell == cell && b.is_visible(now))
    }
}

impl EffectPool<Tint> {
    /// Per-cell tint resolution: the tint with the highest remaining opacity
    /// wins, regardless of insertion order.
    pub fn strongest(&self, now: f64) -> HashMap<Cell, (NamedColor, f64)> {
        let mut best: HashMap<Cell, (NamedColor, f64)> = HashMap::new();
        for tint in self.visible(now) {
            let opacity = tint.remaining_opacity(now);
            if opacity <= 0.0 {
                continue;
            }
            best.entry(tint.cell)
                .and_modify(|slot| {
                    if opacity > slot.1 {
                        *slot = (tint.color, opacity);
                    }
                })
                .or_insert((tint.color, opacity));
        }
        best
    }
}
