#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn from_size(width: u16, height: u16) -> Self {
        Self {
            x: 0,
            y: 0,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub const fn right(&self) -> u16 {
        self.x + self.width
    }

    pub const fn bottom(&self) -> u16 {
        self.y + self.height
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Sub-region of `height` rows by `width` columns starting `y` rows and `x`
    /// columns into this one, clipped so it never extends past this region.
    pub fn inset(self, height: u16, width: u16, y: u16, x: u16) -> Self {
        let y = y.min(self.height);
        let x = x.min(self.width);
        Self {
            x: self.x.saturating_add(x),
            y: self.y.saturating_add(y),
            width: width.min(self.width - x),
            height: height.min(self.height - y),
        }
    }

    /// Split off the top `rows` rows, returning `(top, rest)`.
    pub fn split_top(self, rows: u16) -> (Self, Self) {
        let rows = rows.min(self.height);
        let top = Self::new(self.x, self.y, self.width, rows);
        let rest = Self::new(self.x, self.y + rows, self.width, self.height - rows);
        (top, rest)
    }
}
