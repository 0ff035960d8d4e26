//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Layout, top to bottom: the match notification line, the framed tile grid
//! (side panel to its right when the viewport is wide enough), the status
//! line. The win dialog is drawn last, centered over the grid.

use crate::core::{format_time, GameSnapshot, ScoreRecord, TileFace, TileView};
use crate::fb::{text_width, CellStyle, FrameBuffer, Rgb};

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// A lightweight terminal renderer for the memory board.
pub struct GameView {
    /// Columns per tile, including the one-column gap.
    tile_w: u16,
    /// Rows per tile, including the one-row gap.
    tile_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // A 5x1 face fits "[ ? ]"-style tiles and a centered emoji.
        Self {
            tile_w: 6,
            tile_h: 2,
            anchor_y: AnchorY::Center,
        }
    }
}

const PANEL_MIN_W: u16 = 18;
const FRAME_BG: Rgb = Rgb::new(24, 24, 34);

const KEY_HELP: [&str; 6] = [
    "arrows  move",
    "enter   flip",
    "r       restart",
    "1-4     size",
    "tab     next size",
    "q       quit",
];

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(4),
            tile_h: tile_h.max(2),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Outer frame size (border included) for a board of `side`.
    pub fn frame_size(&self, side: u8) -> (u16, u16) {
        let side = side as u16;
        (side * self.tile_w + 3, side * self.tile_h + 3)
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let (frame_w, frame_h) = self.frame_size(snap.side);
        // Notification line above, status line below.
        let total_h = frame_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let top = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };
        let start_y = top + 1;

        let bg = CellStyle {
            fg: Rgb::new(80, 80, 90),
            bg: FRAME_BG,
            bold: false,
            dim: false,
        };
        let border = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };

        fb.fill_rect(start_x + 1, start_y + 1, frame_w - 2, frame_h - 2, ' ', bg);
        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (i, tile) in snap.tiles.iter().enumerate() {
            let row = (i / snap.side as usize) as u16;
            let col = (i % snap.side as usize) as u16;
            self.draw_tile(fb, start_x, start_y, row, col, *tile, i == snap.cursor);
        }

        if let Some(symbol) = snap.toast {
            self.draw_toast(fb, start_x, top, frame_w, symbol);
        }

        self.draw_status(fb, snap, start_x, start_y + frame_h, frame_w);
        self.draw_side_panel(fb, snap, viewport, start_x, start_y, frame_w);

        if snap.win_dialog {
            self.draw_win_dialog(fb, snap, viewport, start_x, start_y, frame_w, frame_h);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    /// Top-left cell of the face of tile (`row`, `col`).
    fn face_origin(&self, start_x: u16, start_y: u16, row: u16, col: u16) -> (u16, u16) {
        // Border plus one padding cell.
        (
            start_x + 2 + col * self.tile_w,
            start_y + 2 + row * self.tile_h,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_tile(
        &self,
        fb: &mut FrameBuffer,
        start_x: u16,
        start_y: u16,
        row: u16,
        col: u16,
        tile: TileView,
        under_cursor: bool,
    ) {
        let (px, py) = self.face_origin(start_x, start_y, row, col);
        let face_w = self.tile_w - 1;
        let face_h = self.tile_h - 1;

        let (fg, bg, dim) = match tile.face {
            TileFace::Hidden => (Rgb::new(200, 200, 240), Rgb::new(70, 70, 120), false),
            TileFace::Revealed => (Rgb::new(20, 20, 20), Rgb::new(235, 235, 225), false),
            TileFace::Matched => (Rgb::new(150, 200, 150), Rgb::new(35, 80, 45), true),
        };
        let style = CellStyle {
            fg,
            bg,
            bold: under_cursor,
            dim,
        };
        fb.fill_rect(px, py, face_w, face_h, ' ', style);

        let mid_y = py + face_h / 2;
        match tile.face {
            TileFace::Hidden => {
                fb.put_char(px + face_w / 2, mid_y, '?', style);
            }
            TileFace::Revealed | TileFace::Matched => {
                let glyph_w = text_width(tile.symbol.encode_utf8(&mut [0u8; 4])).max(1);
                fb.put_char(px + face_w.saturating_sub(glyph_w) / 2, mid_y, tile.symbol, style);
            }
        }

        if under_cursor {
            let cursor = CellStyle {
                fg: Rgb::new(255, 215, 0),
                bg: FRAME_BG,
                bold: true,
                dim: false,
            };
            fb.put_char(px - 1, mid_y, '[', cursor);
            fb.put_char(px + face_w, mid_y, ']', cursor);
        }
    }

    fn draw_toast(&self, fb: &mut FrameBuffer, start_x: u16, y: u16, frame_w: u16, symbol: char) {
        let style = CellStyle {
            fg: Rgb::new(255, 215, 0),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let mut glyph = [0u8; 4];
        let symbol = symbol.encode_utf8(&mut glyph);
        let w = text_width("You found ") + text_width(symbol) + 1;
        let x = start_x.saturating_add(frame_w.saturating_sub(w) / 2);

        fb.put_str(x, y, "You found ", style);
        let x = x + text_width("You found ");
        fb.put_str(x, y, symbol, style);
        fb.put_char(x + text_width(symbol), y, '!', style);
    }

    fn draw_status(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        start_x: u16,
        y: u16,
        frame_w: u16,
    ) {
        let text = snap.status.to_string();
        if text.is_empty() {
            return;
        }
        let style = CellStyle {
            fg: Rgb::new(170, 170, 170),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let x = start_x.saturating_add(frame_w.saturating_sub(text_width(&text)) / 2);
        fb.put_str(x, y, &text, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
    ) {
        let panel_x = start_x.saturating_add(frame_w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < PANEL_MIN_W {
            return;
        }

        let label = CellStyle {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: true,
            dim: false,
        };
        let value = CellStyle {
            fg: Rgb::new(200, 200, 200),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        };
        let dim = CellStyle { dim: true, ..value };

        let mut y = start_y;
        fb.put_str(panel_x, y, "DIFFICULTY", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, snap.difficulty.label(), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "TIME", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &format_time(snap.elapsed_seconds), value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "MOVES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.moves, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "BEST", label);
        y = y.saturating_add(1);
        fb.put_str(panel_x, y, &best_text(snap.best), value);
        y = y.saturating_add(2);

        for line in KEY_HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, dim);
            y = y.saturating_add(1);
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_win_dialog(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        start_x: u16,
        start_y: u16,
        frame_w: u16,
        frame_h: u16,
    ) {
        let time = format!("Time   {}", format_time(snap.elapsed_seconds));
        let moves = format!("Moves  {}", snap.moves);
        let best = format!("Best   {}", best_text(snap.best));
        let lines: [&str; 6] = [
            "YOU WIN!",
            "",
            &time,
            &moves,
            &best,
            "r restart   esc close",
        ];

        let inner_w = lines.iter().map(|l| text_width(l)).max().unwrap_or(0) + 4;
        let w = inner_w.min(viewport.width);
        let h = lines.len() as u16 + 2;

        let x = start_x.saturating_add(frame_w.saturating_sub(w) / 2);
        let y = start_y.saturating_add(frame_h.saturating_sub(h) / 2);

        let body = CellStyle {
            fg: Rgb::new(240, 240, 240),
            bg: Rgb::new(40, 40, 70),
            bold: false,
            dim: false,
        };
        fb.fill_rect(x, y, w, h, ' ', body);
        self.draw_border(fb, x, y, w, h, body);

        for (i, line) in lines.iter().enumerate() {
            let style = if i == 0 {
                CellStyle {
                    fg: Rgb::new(255, 215, 0),
                    bold: true,
                    ..body
                }
            } else {
                body
            };
            let lx = x + w.saturating_sub(text_width(line)) / 2;
            fb.put_str(lx, y + 1 + i as u16, line, style);
        }
    }
}

/// `"N moves, mm:ss"`, or `"-"` without a record.
pub fn best_text(best: Option<ScoreRecord>) -> String {
    match best {
        Some(r) => format!("{} moves, {}", r.moves, format_time(r.seconds)),
        None => "-".to_string(),
    }
}
