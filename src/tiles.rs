//! Glyph rendering through an optional tileset.
//!
//! Glyphs are addressed by their CP437 tile index. A tileset is a
//! substitution table from tile index to the symbol the terminal draws; when
//! no tileset file is available the fallback renderer draws the glyph as-is.
//! Rendered glyphs are memoized in a bounded cache owned by the renderer.

use crate::core::constants::GLYPH_CACHE_CAPACITY;
use crate::palette::Rgb;
use crate::utils::persistence::save_path;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

pub const TILESET_FILE: &str = "tileset.json";

/// CP437 tile index for a glyph. Scalars past 255 share the last tile.
pub fn tile_index(glyph: char) -> u8 {
    (glyph as u32).min(255) as u8
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StyledGlyph {
    pub symbol: char,
    pub color: Rgb,
}

/// Tile index to display symbol.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tileset {
    tiles: HashMap<u8, char>,
}

impl Tileset {
    pub fn new(tiles: HashMap<u8, char>) -> Self {
        Self { tiles }
    }

    /// Reads a tileset file. `None` when missing or malformed.
    pub fn load_from(path: &Path) -> Option<Self> {
        let json = fs::read_to_string(path).ok()?;
        match serde_json::from_str(&json) {
            Ok(tileset) => Some(tileset),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "tileset unreadable, using plain glyphs");
                None
            }
        }
    }

    /// `tileset.json` from the data directory, if present.
    pub fn load() -> Option<Self> {
        let path = save_path(TILESET_FILE).ok()?;
        Self::load_from(&path)
    }

    pub fn symbol(&self, glyph: char) -> Option<char> {
        self.tiles.get(&tile_index(glyph)).copied()
    }
}

/// Bounded memo of rendered glyphs. Filling past capacity starts over.
#[derive(Debug, Clone)]
pub struct GlyphCache {
    entries: HashMap<(char, Rgb), StyledGlyph>,
    capacity: usize,
}

impl GlyphCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, glyph: char, color: Rgb) -> Option<StyledGlyph> {
        self.entries.get(&(glyph, color)).copied()
    }

    pub fn insert(&mut self, glyph: char, color: Rgb, styled: StyledGlyph) {
        if self.entries.len() >= self.capacity && !self.entries.contains_key(&(glyph, color)) {
            self.entries.clear();
        }
        self.entries.insert((glyph, color), styled);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

impl Default for GlyphCache {
    fn default() -> Self {
        Self::new(GLYPH_CACHE_CAPACITY)
    }
}

/// Renders glyphs through a tileset, or plainly when none is loaded.
#[derive(Debug, Clone, Default)]
pub struct TileRenderer {
    tileset: Option<Tileset>,
    cache: GlyphCache,
}

impl TileRenderer {
    pub fn new(tileset: Option<Tileset>) -> Self {
        Self {
            tileset,
            cache: GlyphCache::default(),
        }
    }

    pub fn has_tileset(&self) -> bool {
        self.tileset.is_some()
    }

    pub fn render(&mut self, glyph: char, color: Rgb) -> StyledGlyph {
        if let Some(hit) = self.cache.get(glyph, color) {
            return hit;
        }
        let symbol = self
            .tileset
            .as_ref()
            .and_then(|t| t.symbol(glyph))
            .unwrap_or(glyph);
        let styled = StyledGlyph { symbol, color };
        self.cache.insert(glyph, color, styled);
        styled
    }

    pub fn cache(&self) -> &GlyphCache {
        &self.cache
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}
