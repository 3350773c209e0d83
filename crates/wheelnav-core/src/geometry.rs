#![forbid(unsafe_code)]

//! Geometric primitives for layout and hit testing.

/// A rectangle in terminal cell coordinates (0-indexed, origin top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: u16,
    /// Top edge (inclusive).
    pub y: u16,
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from origin with given size.
    #[inline]
    pub const fn from_size(width: u16, height: u16) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Check if a point is inside the rectangle.
    #[inline]
    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// The single-row rectangle at `offset` rows from the top, if inside.
    pub fn row(&self, offset: u16) -> Option<Rect> {
        (offset < self.height).then(|| Rect::new(self.x, self.y.saturating_add(offset), self.width, 1))
    }

    /// Shrink horizontally by `cells` on both sides.
    pub fn inset_x(&self, cells: u16) -> Rect {
        let cells = cells.min(self.width / 2);
        Rect::new(
            self.x + cells,
            self.y,
            self.width - cells * 2,
            self.height,
        )
    }

    /// Shrink by one cell on every side (room for a border).
    pub fn inner(&self) -> Rect {
        if self.width < 2 || self.height < 2 {
            return Rect::new(self.x, self.y, 0, 0);
        }
        Rect::new(self.x + 1, self.y + 1, self.width - 2, self.height - 2)
    }

    /// Split off the top `height` rows, returning `(top, rest)`.
    pub fn split_top(&self, height: u16) -> (Rect, Rect) {
        let height = height.min(self.height);
        (
            Rect::new(self.x, self.y, self.width, height),
            Rect::new(self.x, self.y + height, self.width, self.height - height),
        )
    }

    /// Split off the right `width` columns, returning `(left, right)`.
    pub fn split_right(&self, width: u16) -> (Rect, Rect) {
        let width = width.min(self.width);
        let left = self.width - width;
        (
            Rect::new(self.x, self.y, left, self.height),
            Rect::new(self.x + left, self.y, width, self.height),
        )
    }

    /// A `width` x `height` rectangle centered in this one (clamped to fit).
    pub fn centered(&self, width: u16, height: u16) -> Rect {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in cells.
    pub width: u16,
    /// Height in cells.
    pub height: u16,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}
