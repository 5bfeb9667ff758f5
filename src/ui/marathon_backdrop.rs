//! Muted marathon battle drawn behind the title menu.

use super::battle_grid::CELL_WIDTH;
use super::to_color;
use ascii_battles::effects::scene::terrain_at;
use ascii_battles::engine::Cell;
use ascii_battles::marathon::MarathonOrchestrator;
use ascii_battles::palette::{self, NamedColor, Rgb};
use ascii_battles::tiles::TileRenderer;
use ratatui::{buffer::Buffer, layout::Rect, style::Style, widgets::Widget};

/// Everything in the backdrop is dimmed by this much.
const BACKDROP_OPACITY: f64 = 0.6;

pub struct MarathonWidget<'a> {
    marathon: &'a MarathonOrchestrator,
    tiles: &'a mut TileRenderer,
}

impl<'a> MarathonWidget<'a> {
    pub fn new(marathon: &'a MarathonOrchestrator, tiles: &'a mut TileRenderer) -> Self {
        Self { marathon, tiles }
    }
}

fn muted(color: NamedColor, opacity: f64) -> Rgb {
    color
        .rgb()
        .blend_over(palette::BACKGROUND.rgb(), opacity * BACKDROP_OPACITY)
}

impl Widget for MarathonWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let grid = self.marathon.grid();
        let map_width = grid.width.max(0) as u16 * CELL_WIDTH;
        let map_height = grid.height.max(0) as u16;
        let start_x = area.x + area.width.saturating_sub(map_width) / 2;
        let start_y = area.y + area.height.saturating_sub(map_height) / 2;

        let mut put = |x: i32, y: i32, glyph: char, color: Rgb, buf: &mut Buffer| {
            if x < 0 || y < 0 || x >= grid.width || y >= grid.height {
                return;
            }
            let sx = start_x + x as u16 * CELL_WIDTH;
            let sy = start_y + y as u16;
            if sx >= area.right() || sy >= area.bottom() {
                return;
            }
            let styled = self.tiles.render(glyph, color);
            buf.get_mut(sx, sy)
                .set_char(styled.symbol)
                .set_style(Style::default().fg(to_color(styled.color)));
        };

        for y in 0..grid.height {
            for x in 0..grid.width {
                let terrain = terrain_at(Cell::new(x, y), 0);
                let color = terrain
                    .color
                    .blend_over(palette::BACKGROUND.rgb(), terrain.opacity * BACKDROP_OPACITY);
                put(x, y, terrain.glyph, color, buf);
            }
        }
        // Blood first, then litter, then combatants on top
        for vfx in self.marathon.vfx() {
            put(vfx.x, vfx.y, vfx.glyph, muted(vfx.color, vfx.opacity), buf);
        }
        for debris in self.marathon.debris() {
            put(debris.x, debris.y, debris.glyph, muted(debris.color, debris.opacity), buf);
        }
        for combatant in self.marathon.combatants() {
            put(
                combatant.x,
                combatant.y,
                combatant.display_glyph(),
                muted(combatant.display_color(), combatant.opacity),
                buf,
            );
        }
    }
}
