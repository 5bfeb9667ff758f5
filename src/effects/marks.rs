//! Ground marks and trampling, kept for the lifetime of one battle.

use crate::core::constants::{MARK_FADE_SECONDS, TRAMPLE_MAX};
use crate::engine::Cell;
use crate::palette::NamedColor;
use std::collections::HashMap;

/// Blood, gibs, corpses: anything left on the ground.
#[derive(Debug, Clone, PartialEq)]
pub struct GridMark {
    pub cell: Cell,
    pub glyph: char,
    pub color: NamedColor,
    pub opacity: f64,
    pub permanent: bool,
    pub placed_at: f64,
}

impl GridMark {
    /// Visible opacity at `now`. Fading marks reach zero after
    /// `MARK_FADE_SECONDS` and stay there.
    pub fn opacity_at(&self, now: f64) -> f64 {
        if self.permanent {
            return self.opacity;
        }
        let age = (now - self.placed_at).max(0.0);
        let left = (1.0 - age / MARK_FADE_SECONDS).max(0.0);
        self.opacity * left
    }
}

/// Append-only list of marks. Cleared only when a new battle starts.
#[derive(Debug, Clone, Default)]
pub struct MarkLedger {
    marks: Vec<GridMark>,
}

impl MarkLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, mark: GridMark) {
        self.marks.push(mark);
    }

    /// The most recent mark on `cell` that is still visible at `now`.
    pub fn latest_at(&self, cell: Cell, now: f64) -> Option<&GridMark> {
        self.marks
            .iter()
            .rev()
            .find(|m| m.cell == cell && m.opacity_at(now) > 0.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GridMark> {
        self.marks.iter()
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn clear(&mut self) {
        self.marks.clear();
    }
}

/// How flattened the ground is per cell, `0..=TRAMPLE_MAX`.
#[derive(Debug, Clone, Default)]
pub struct TrampleCounter {
    counts: HashMap<Cell, u8>,
}

impl TrampleCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one traversal, saturating at `TRAMPLE_MAX`.
    pub fn bump(&mut self, cell: Cell) {
        let count = self.counts.entry(cell).or_insert(0);
        *count = (*count + 1).min(TRAMPLE_MAX);
    }

    pub fn get(&self, cell: Cell) -> u8 {
        self.counts.get(&cell).copied().unwrap_or(0)
    }

    pub fn max_count(&self) -> u8 {
        self.counts.values().copied().max().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
