//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{Cell, CellStyle, FrameBuffer, Rgb};
use crate::types::GRID_SIZE;

const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(187, 173, 160);
const EMPTY_BG: Rgb = Rgb::new(205, 193, 180);
const DARK_TEXT: Rgb = Rgb::new(119, 110, 101);
const LIGHT_TEXT: Rgb = Rgb::new(249, 246, 242);

/// Largest tile pitch accepted by [`GameView::new`].
pub const MAX_CELL_W: u16 = 64;
pub const MAX_CELL_H: u16 = 32;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Persisted scores shown beside the board.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScorePanel<'a> {
    pub best: u64,
    /// Newest first.
    pub history: &'a [u64],
}

/// A lightweight terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile pitch in terminal columns (tile width plus one gutter column).
    cell_w: u16,
    /// Tile pitch in terminal rows (tile height plus one gutter row).
    cell_h: u16,
}

impl Default for GameView {
    fn default() -> Self {
        // 7x3 tiles look roughly square with typical glyph aspect ratios.
        Self {
            cell_w: 8,
            cell_h: 4,
        }
    }
}

impl GameView {
    /// Tile pitch is clamped to `2..=MAX_CELL_W` by `2..=MAX_CELL_H`.
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.clamp(2, MAX_CELL_W),
            cell_h: cell_h.clamp(2, MAX_CELL_H),
        }
    }

    /// Outer size of the bordered board.
    pub fn board_size(&self) -> (u16, u16) {
        let n = GRID_SIZE as u16;
        (n * self.cell_w + 3, n * self.cell_h + 3)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        panel: &ScorePanel<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(Cell::blank(CellStyle::new(SCREEN_BG, SCREEN_BG)));

        let (frame_w, frame_h) = self.board_size();
        let panel_w = 20;
        let start_x = viewport.width.saturating_sub(frame_w + panel_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        draw_border(fb, start_x, start_y, frame_w, frame_h, border);
        fb.fill_rect(
            start_x + 1,
            start_y + 1,
            frame_w - 2,
            frame_h - 2,
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );

        for (y, row) in snap.grid.iter().enumerate() {
            for (x, &value) in row.iter().enumerate() {
                self.draw_tile(fb, start_x, start_y, x as u16, y as u16, value);
            }
        }

        self.draw_side_panel(fb, snap, panel, start_x + frame_w + 2, start_y);

        if snap.game_over() {
            draw_overlay(fb, start_x, start_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, panel: &ScorePanel<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, panel, viewport, &mut fb);
        fb
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, start_x: u16, start_y: u16, x: u16, y: u16, value: u32) {
        let px = start_x + 2 + x * self.cell_w;
        let py = start_y + 2 + y * self.cell_h;
        let (w, h) = (self.cell_w - 1, self.cell_h - 1);

        if value == 0 {
            let style = CellStyle::new(BOARD_BG, EMPTY_BG);
            fb.fill_rect(px, py, w, h, ' ', style);
            fb.put_char(px + w / 2, py + h / 2, '·', style);
            return;
        }

        let (bg, fg) = tile_colors(value);
        let style = CellStyle::new(fg, bg).bold();
        fb.fill_rect(px, py, w, h, ' ', style);
        let mut digits = [0u8; 20];
        let text = crate::fb::format_u64(u64::from(value), &mut digits);
        fb.put_str_centered(px, py + h / 2, w, text, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        panel: &ScorePanel<'_>,
        x: u16,
        start_y: u16,
    ) {
        if x >= fb.width() {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);
        let dim = value.dim();

        let mut y = start_y;
        for (name, n) in [
            ("SCORE", snap.score),
            ("BEST", panel.best.max(snap.score)),
            ("MOVES", u64::from(snap.moves_made)),
        ] {
            fb.put_str(x, y, name, label);
            fb.put_u64(x, y + 1, n, value);
            y += 3;
        }

        fb.put_str(x, y, "HISTORY", label);
        y += 1;
        if panel.history.is_empty() {
            fb.put_str(x, y, "-", dim);
            y += 1;
        }
        for (i, &score) in panel.history.iter().enumerate() {
            let rank = i as u64 + 1;
            fb.put_u64(if rank < 10 { x + 1 } else { x }, y, rank, dim);
            fb.put_char(x + 2, y, '.', dim);
            fb.put_u64(x + 4, y, score, value);
            y += 1;
        }

        y += 1;
        fb.put_str(x, y, "arrows/hjkl move", dim);
        fb.put_str(x, y + 1, "r restart  q quit", dim);
    }
}

/// Background and text colors for a tile value.
pub fn tile_colors(value: u32) -> (Rgb, Rgb) {
    let bg = match value {
        2 => Rgb::new(238, 228, 218),
        4 => Rgb::new(237, 224, 200),
        8 => Rgb::new(242, 177, 121),
        16 => Rgb::new(245, 149, 99),
        32 => Rgb::new(246, 124, 95),
        64 => Rgb::new(246, 94, 59),
        128 => Rgb::new(237, 207, 114),
        256 => Rgb::new(237, 204, 97),
        512 => Rgb::new(237, 200, 80),
        1024 => Rgb::new(237, 197, 63),
        2048 => Rgb::new(237, 194, 46),
        _ => Rgb::new(60, 58, 50),
    };
    let fg = if value <= 4 { DARK_TEXT } else { LIGHT_TEXT };
    (bg, fg)
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, bottom, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(right, y + dy, '│', style);
    }
}

fn draw_overlay(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    let band = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(40, 40, 40)).bold();
    let mid = y + h / 2;
    fb.fill_rect(x + 1, mid - 1, w - 2, 3, ' ', band);
    fb.put_str_centered(x, mid - 1, w, "GAME OVER", band);
    fb.put_str_centered(x, mid + 1, w, "press r to play again", band);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::GamePhase;

    fn screen_text(fb: &FrameBuffer) -> String {
        (0..fb.height())
            .map(|y| fb.row_text(y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn snapshot(grid: [[u32; 4]; 4]) -> GameSnapshot {
        GameSnapshot {
            grid,
            score: 1234,
            ..GameSnapshot::default()
        }
    }

    #[test]
    fn renders_tile_values_and_score() {
        let snap = snapshot([[2048, 0, 0, 0], [0, 4, 0, 0], [0; 4], [0, 0, 0, 131072]]);
        let fb = GameView::default().render(&snap, &ScorePanel::default(), Viewport::new(80, 24));
        let text = screen_text(&fb);
        assert!(text.contains("2048"));
        assert!(text.contains("131072"));
        assert!(text.contains("SCORE"));
        assert!(text.contains("1234"));
        assert!(!text.contains("GAME OVER"));
    }

    #[test]
    fn renders_best_and_history() {
        let history = [512, 9876];
        let panel = ScorePanel {
            best: 9876,
            history: &history,
        };
        let fb = GameView::default().render(&snapshot([[0; 4]; 4]), &panel, Viewport::new(80, 24));
        let text = screen_text(&fb);
        assert!(text.contains("BEST"));
        assert!(text.contains("9876"));
        assert!(text.contains("1. 512"));
        assert!(text.contains("2. 9876"));
    }

    #[test]
    fn game_over_overlay() {
        let mut snap = snapshot([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);
        snap.phase = GamePhase::Finished;
        let fb = GameView::default().render(&snap, &ScorePanel::default(), Viewport::new(80, 24));
        assert!(screen_text(&fb).contains("GAME OVER"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = snapshot([[2, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let fb = GameView::default().render(&snap, &ScorePanel::default(), Viewport::new(5, 3));
        assert_eq!((fb.width(), fb.height()), (5, 3));
    }

    #[test]
    fn oversized_tile_pitch_is_clamped() {
        let view = GameView::new(20_000, 4);
        assert_eq!(view.board_size(), (4 * MAX_CELL_W + 3, 19));
        assert_eq!(GameView::new(u16::MAX, u16::MAX).board_size(), (4 * MAX_CELL_W + 3, 4 * MAX_CELL_H + 3));
        assert_eq!(GameView::new(0, 0).board_size(), (11, 11));

        let snap = snapshot([[2048, 0, 0, 0], [0; 4], [0; 4], [0; 4]]);
        let fb = view.render(&snap, &ScorePanel::default(), Viewport::new(80, 24));
        assert_eq!((fb.width(), fb.height()), (80, 24));
    }

    #[test]
    fn small_tiles_are_dark_text() {
        assert_eq!(tile_colors(2).1, DARK_TEXT);
        assert_eq!(tile_colors(8).1, LIGHT_TEXT);
        assert_eq!(tile_colors(4096), (Rgb::new(60, 58, 50), LIGHT_TEXT));
    }
}
