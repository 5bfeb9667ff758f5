//! Battlefield grid widget.

use super::to_color;
use ascii_battles::effects::{Layer, Scene};
use ascii_battles::engine::{Cell, GridInfo};
use ascii_battles::tiles::TileRenderer;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::Widget,
};

/// Terminal columns per grid cell. Two keeps the field roughly square.
pub const CELL_WIDTH: u16 = 2;

/// Draws every grid cell as the scene resolves it.
pub struct BattleGridWidget<'a> {
    scene: &'a Scene<'a>,
    grid: GridInfo,
    tiles: &'a mut TileRenderer,
}

impl<'a> BattleGridWidget<'a> {
    pub fn new(scene: &'a Scene<'a>, grid: GridInfo, tiles: &'a mut TileRenderer) -> Self {
        Self { scene, grid, tiles }
    }
}

impl Widget for BattleGridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let map_width = self.grid.width.max(0) as u16 * CELL_WIDTH;
        let map_height = self.grid.height.max(0) as u16;
        let start_x = area.x + area.width.saturating_sub(map_width) / 2;
        let start_y = area.y + area.height.saturating_sub(map_height) / 2;

        for gy in 0..self.grid.height {
            for gx in 0..self.grid.width {
                let sx = start_x + gx as u16 * CELL_WIDTH;
                let sy = start_y + gy as u16;
                if sx >= area.right() || sy >= area.bottom() {
                    continue;
                }
                let resolved = self.scene.resolve(Cell::new(gx, gy));
                let styled = self.tiles.render(resolved.glyph, resolved.fg);
                let mut style = Style::default().fg(to_color(styled.color));
                if let Some(bg) = resolved.bg {
                    style = style.bg(to_color(bg));
                }
                if matches!(resolved.layer, Layer::Actor(_)) {
                    style = style.add_modifier(Modifier::BOLD);
                }
                buf.get_mut(sx, sy).set_char(styled.symbol).set_style(style);
                if sx + 1 < area.right() {
                    buf.get_mut(sx + 1, sy).set_char(' ').set_style(style);
                }
            }
        }
    }
}
