//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{format_u32, CellStyle, FrameBuffer, Rgb};
use crate::types::GameStatus;

/// Blank columns/rows between neighbouring tiles.
const GAP: u16 = 1;

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

/// Board frame geometry for one snapshot and viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
}

/// Terminal renderer for the 2048 board.
pub struct GameView {
    /// Tile width in terminal columns.
    tile_w: u16,
    /// Tile height in terminal rows.
    tile_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // Six columns fit a five digit tile with a space on each side.
        Self {
            tile_w: 6,
            tile_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

const FRAME_BG: Rgb = Rgb::new(0, 0, 0);
const BOARD_BG: Rgb = Rgb::new(17, 17, 20);
const BLACK: Rgb = Rgb::new(0, 0, 0);
const WHITE: Rgb = Rgb::new(255, 255, 255);

impl GameView {
    pub fn new(tile_w: u16, tile_h: u16) -> Self {
        Self {
            tile_w: tile_w.max(1),
            tile_h: tile_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, size: usize, viewport: Viewport) -> Layout {
        let n = size as u16;
        let frame_w = n * (self.tile_w + GAP) + GAP + 2;
        let frame_h = n * (self.tile_h + GAP) + GAP + 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
            AnchorY::Top => 0,
        };
        Layout {
            frame_x: viewport.width.saturating_sub(frame_w) / 2,
            frame_y,
            frame_w,
            frame_h,
        }
    }

    /// Top-left terminal cell of tile (row, col).
    pub fn tile_origin(&self, layout: &Layout, row: usize, col: usize) -> (u16, u16) {
        let x = layout.frame_x + 1 + GAP + (col as u16) * (self.tile_w + GAP);
        let y = layout.frame_y + 1 + GAP + (row as u16) * (self.tile_h + GAP);
        (x, y)
    }

    /// Render a snapshot into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let layout = self.layout(snap.size, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), FRAME_BG);

        fb.fill_rect(
            layout.frame_x + 1,
            layout.frame_y + 1,
            layout.frame_w.saturating_sub(2),
            layout.frame_h.saturating_sub(2),
            ' ',
            CellStyle::new(BOARD_BG, BOARD_BG),
        );
        self.draw_border(fb, &layout, border);

        for row in 0..snap.size {
            for col in 0..snap.size {
                let value = snap.get(row, col).unwrap_or(0);
                self.draw_tile(fb, &layout, row, col, value);
            }
        }

        self.draw_side_panel(fb, snap, viewport, &layout);

        match snap.status {
            GameStatus::Playing => {}
            GameStatus::Won => self.draw_overlay(fb, snap, &layout, "YOU WON!"),
            GameStatus::Lost => self.draw_overlay(fb, snap, &layout, "GAME OVER"),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, layout: &Layout, style: CellStyle) {
        let (x, y, w, h) = (layout.frame_x, layout.frame_y, layout.frame_w, layout.frame_h);
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

    fn draw_tile(&self, fb: &mut FrameBuffer, layout: &Layout, row: usize, col: usize, value: u32) {
        let (x, y) = self.tile_origin(layout, row, col);
        let style = tile_style(value);
        fb.fill_rect(x, y, self.tile_w, self.tile_h, ' ', style);
        if value == 0 {
            return;
        }

        let mut buf = [0u8; 10];
        let label = tile_label(value, self.tile_w as usize, &mut buf);
        fb.put_str_centered(x, y + self.tile_h / 2, self.tile_w, label, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: &Layout,
    ) {
        let panel_x = layout
            .frame_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), FRAME_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), FRAME_BG);
        let hint = value.dim();

        let mut y = layout.frame_y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("BEST TILE", snap.best_tile),
            ("MOVES", snap.moves),
            ("GOAL", snap.win_tile),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        for line in ["arrows/hjkl/wasd", "r restart", "q quit"] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y = y.saturating_add(1);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, layout: &Layout, title: &str) {
        let style = CellStyle::new(WHITE, BLACK).bold();
        let mid_y = layout.frame_y.saturating_add(layout.frame_h / 2);
        fb.put_str_centered(layout.frame_x, mid_y.saturating_sub(1), layout.frame_w, title, style);

        // "I scored <n> in 2048!", centered as one run.
        let mut buf = [0u8; 10];
        let score = format_u32(snap.score, &mut buf);
        let text_w = ("I scored ".len() + score.len() + " in 2048!".len()) as u16;
        let x = layout
            .frame_x
            .saturating_add(layout.frame_w.saturating_sub(text_w) / 2);
        let plain = CellStyle::new(WHITE, BLACK);
        let x = fb.put_str(x, mid_y.saturating_add(1), "I scored ", plain);
        let x = fb.put_str(x, mid_y.saturating_add(1), score, plain);
        fb.put_str(x, mid_y.saturating_add(1), " in 2048!", plain);
    }
}

/// Tile colour ramp: light greys for small tiles, darker with white text above 32.
pub fn tile_style(value: u32) -> CellStyle {
    let (bg, fg) = match value {
        0 => (Rgb::new(31, 41, 55), Rgb::new(31, 41, 55)),
        1..=4 => (Rgb::new(229, 231, 235), BLACK),
        5..=8 => (Rgb::new(209, 213, 219), BLACK),
        9..=16 => (Rgb::new(156, 163, 175), BLACK),
        17..=32 => (Rgb::new(107, 114, 128), BLACK),
        33..=64 => (Rgb::new(75, 85, 99), WHITE),
        65..=128 => (Rgb::new(55, 65, 81), WHITE),
        129..=256 => (Rgb::new(31, 41, 55), WHITE),
        257..=512 => (Rgb::new(17, 24, 39), WHITE),
        _ => (Rgb::new(3, 7, 18), WHITE),
    };
    let style = CellStyle::new(fg, bg);
    if value > 4 {
        style.bold()
    } else {
        style
    }
}

/// Decimal label, shortened to "<n>k" when the digits do not fit `width`.
fn tile_label(value: u32, width: usize, buf: &mut [u8; 10]) -> &str {
    let digits = value.checked_ilog10().unwrap_or(0) as usize + 1;
    if digits <= width || value < 1024 {
        return format_u32(value, buf);
    }
    let len = format_u32(value / 1024, buf).len();
    let start = buf.len() - len;
    // Shift left one byte to make room for the suffix.
    buf.copy_within(start.., start - 1);
    buf[buf.len() - 1] = b'k';
    std::str::from_utf8(&buf[start - 1..]).unwrap_or("")
}
