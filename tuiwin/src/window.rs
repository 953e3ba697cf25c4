//! Rectangular drawing regions.

use crate::buffer::{Buffer, Cell};
use crate::rect::Rect;
use crate::text::char_width;
use crate::types::TextStyle;

/// A screen region with its own cell buffer and write cursor.
///
/// Writes land in the window's buffer only. Nothing reaches the terminal
/// until the window is refreshed and the [`Terminal`](crate::Terminal)
/// presents it, so windows can be drawn and inspected without a tty.
#[derive(Debug, Clone)]
pub struct Window {
    area: Rect,
    buffer: Buffer,
    cursor: (u16, u16),
    refresh_pending: bool,
}

impl Window {
    /// Create a window covering `area` in screen coordinates.
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            buffer: Buffer::new(area.width, area.height),
            cursor: (0, 0),
            refresh_pending: false,
        }
    }

    /// Create a window over a sub-region of this one.
    ///
    /// Offsets are relative to this window's origin; the result is clipped to
    /// this window's area.
    pub fn derive(&self, height: u16, width: u16, y: u16, x: u16) -> Window {
        Window::new(self.area.inset(height, width, y, x))
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn width(&self) -> u16 {
        self.area.width
    }

    pub fn height(&self) -> u16 {
        self.area.height
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    /// Move the write cursor. Positions outside the window are clamped.
    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor = (
            x.min(self.area.width.saturating_sub(1)),
            y.min(self.area.height.saturating_sub(1)),
        );
    }

    pub fn print(&mut self, text: &str) {
        self.print_styled(text, TextStyle::new());
    }

    /// Write `text` at the cursor and advance it.
    ///
    /// Output stops at the right edge; a double-width character that does
    /// not fit is dropped.
    pub fn print_styled(&mut self, text: &str, style: TextStyle) {
        let (mut x, y) = self.cursor;
        if y >= self.area.height {
            return;
        }

        for ch in text.chars() {
            let width = char_width(ch) as u16;
            if width == 0 {
                continue;
            }
            if x + width > self.area.width {
                break;
            }
            self.buffer.set(x, y, Cell::new(ch).with_style(style));
            if width == 2 {
                self.buffer.set(x + 1, y, Cell::continuation().with_style(style));
            }
            x += width;
        }

        self.cursor = (x, y);
    }

    /// Blank the rest of the cursor's row, leaving the cursor in place.
    pub fn clear_to_eol(&mut self) {
        let (x, y) = self.cursor;
        self.buffer.clear_from(x, y);
    }

    /// Blank the whole window and home the cursor.
    pub fn clear(&mut self) {
        self.buffer.clear();
        self.cursor = (0, 0);
    }

    /// Mark the window's contents ready to be presented.
    pub fn refresh(&mut self) {
        self.refresh_pending = true;
    }

    pub fn is_refresh_pending(&self) -> bool {
        self.refresh_pending
    }

    /// Consume the pending refresh flag, returning whether one was set.
    pub fn take_refresh(&mut self) -> bool {
        std::mem::take(&mut self.refresh_pending)
    }

    /// Text of row `y` with trailing blanks removed.
    pub fn line(&self, y: u16) -> String {
        let mut line = String::new();
        for x in 0..self.area.width {
            match self.buffer.get(x, y) {
                Some(cell) if !cell.wide_continuation => line.push(cell.char),
                _ => {}
            }
        }
        line.truncate(line.trim_end().len());
        line
    }
}
