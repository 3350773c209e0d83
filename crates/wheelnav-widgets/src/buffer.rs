#![forbid(unsafe_code)]

//! A minimal cell grid that shells render into.
//!
//! Each [`Cell`] carries one character and a [`Tone`]. Terminal backends map
//! tones onto colors and attributes; tests read rows back with
//! [`Buffer::row_text`].
//!
//! # Invariants
//!
//! - `cells.len() == width * height`.
//! - Writes outside the buffer are dropped, never wrapped.
//! - A wide character occupies its cell plus a continuation cell; a wide
//!   character that would straddle the clip edge is not drawn.

use unicode_width::UnicodeWidthChar;
use wheelnav_core::geometry::Rect;

/// Visual weight of a cell, from most to least prominent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Tone {
    /// Highlighted item.
    Accent,
    /// Regular text.
    #[default]
    Normal,
    /// One level down.
    Muted,
    /// Barely visible.
    Faint,
    /// Not drawn.
    Hidden,
}

/// One grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub tone: Tone,
    /// Set on the trailing half of a wide character.
    pub continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self::new(' ', Tone::Normal)
    }
}

impl Cell {
    #[inline]
    pub const fn new(ch: char, tone: Tone) -> Self {
        Self {
            ch,
            tone,
            continuation: false,
        }
    }
}

/// A `width × height` grid of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    /// A blank buffer.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::default(); usize::from(width) * usize::from(height)],
        }
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The full buffer area.
    #[inline]
    pub fn area(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    fn offset(&self, x: u16, y: u16) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| usize::from(y) * usize::from(self.width) + usize::from(x))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.offset(x, y).map(|i| &self.cells[i])
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        self.offset(x, y).map(|i| &mut self.cells[i])
    }

    /// Overwrite one cell; out-of-range writes are ignored.
    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(slot) = self.get_mut(x, y) {
            *slot = cell;
        }
    }

    /// Fill `area` (clipped to the buffer) with `cell`.
    pub fn fill(&mut self, area: Rect, cell: Cell) {
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                self.set(x, y, cell);
            }
        }
    }

    /// Reset every cell to blank.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }

    /// Resize, discarding content.
    pub fn resize(&mut self, width: u16, height: u16) {
        *self = Self::new(width, height);
    }

    /// Write `text` starting at `(x, y)`, using at most `max_width` columns.
    ///
    /// Zero-width characters are skipped. Returns the columns consumed.
    pub fn set_string(&mut self, x: u16, y: u16, text: &str, tone: Tone, max_width: u16) -> u16 {
        if y >= self.height {
            return 0;
        }
        let limit = x.saturating_add(max_width).min(self.width);
        let mut col = x;
        for ch in text.chars() {
            let w = match ch.width() {
                Some(w) if w > 0 => w as u16,
                _ => continue,
            };
            if col.saturating_add(w) > limit {
                break;
            }
            self.set(col, y, Cell::new(ch, tone));
            for extra in 1..w {
                self.set(
                    col + extra,
                    y,
                    Cell {
                        ch: ' ',
                        tone,
                        continuation: true,
                    },
                );
            }
            col += w;
        }
        col - x
    }

    /// Text of row `y`; hidden cells read as spaces, continuations are skipped.
    pub fn row_text(&self, y: u16) -> String {
        if y >= self.height {
            return String::new();
        }
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|c| !c.continuation)
            .map(|c| if c.tone == Tone::Hidden { ' ' } else { c.ch })
            .collect()
    }

    /// Tone of the cell at `(x, y)`.
    pub fn tone_at(&self, x: u16, y: u16) -> Option<Tone> {
        self.get(x, y).map(|c| c.tone)
    }

    /// Iterate `(x, y, cell)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, &Cell)> {
        let width = self.width.max(1);
        self.cells.iter().enumerate().map(move |(i, c)| {
            let x = (i % usize::from(width)) as u16;
            let y = (i / usize::from(width)) as u16;
            (x, y, c)
        })
    }
}
