//! Framebuffer and style types for terminal rendering.
//!
//! Wide glyphs (emoji) take two cells: the glyph itself and a trailing
//! [`WIDE_TAIL`] cell that the renderer skips, since the terminal cursor
//! already advanced past it.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Marker for the second column of a double-width glyph.
pub const WIDE_TAIL: char = '\0';

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl Default for CellStyle {
    fn default() -> Self {
        Self {
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            bold: false,
            dim: false,
        }
    }
}

impl CellStyle {
    pub fn into_cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Cell {
    pub fn is_wide_tail(&self) -> bool {
        self.ch == WIDE_TAIL
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            style: CellStyle::default(),
        }
    }
}

/// 2D framebuffer of styled character cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer.
    ///
    /// This preserves the underlying allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    /// Raw cell write; does not maintain wide-glyph pairs.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    /// Write one glyph, returning the number of columns it occupies.
    ///
    /// A wide glyph that would not fit before the right edge is replaced by a
    /// space. Overwriting half of an existing wide glyph blanks the other half.
    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) -> u16 {
        let w = ch.width().unwrap_or(0) as u16;
        if w == 0 {
            return 0;
        }
        if w == 2 && x.saturating_add(1) >= self.width {
            self.put_narrow(x, y, ' ', style);
            return 1;
        }

        self.put_narrow(x, y, ch, style);
        if w == 2 {
            self.put_narrow(x + 1, y, WIDE_TAIL, style);
        }
        w
    }

    fn put_narrow(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        let Some(old) = self.get(x, y) else {
            return;
        };
        if old.is_wide_tail() && ch != WIDE_TAIL && x > 0 {
            if let Some(head) = self.get(x - 1, y) {
                self.set(x - 1, y, head.style.into_cell(' '));
            }
        }
        if old.ch.width() == Some(2) {
            if let Some(tail) = self.get(x + 1, y).filter(|c| c.is_wide_tail()) {
                self.set(x + 1, y, tail.style.into_cell(' '));
            }
        }
        self.set(x, y, Cell { ch, style });
    }

    /// Write a string left to right, clipped at the right edge.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            cx = cx.saturating_add(self.put_char(cx, y, ch, style));
        }
    }

    /// Write a decimal number without allocating.
    pub fn put_u32(&mut self, x: u16, y: u16, value: u32, style: CellStyle) -> u16 {
        let mut digits = [0u8; 10];
        let mut i = digits.len();
        let mut v = value;
        loop {
            i -= 1;
            digits[i] = b'0' + (v % 10) as u8;
            v /= 10;
            if v == 0 {
                break;
            }
        }
        for (k, &d) in digits[i..].iter().enumerate() {
            self.put_char(x.saturating_add(k as u16), y, d as char, style);
        }
        (digits.len() - i) as u16
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Visible text of row `y`, with wide-glyph tails removed.
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.is_wide_tail())
            .map(|c| c.ch)
            .collect()
    }

    /// Visible text of the whole buffer, one line per row.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for y in 0..self.height {
            out.push_str(&self.row_text(y));
            out.push('\n');
        }
        out
    }
}

/// Display width of `s` in terminal columns.
pub fn text_width(s: &str) -> u16 {
    s.width().min(u16::MAX as usize) as u16
}
