use std::io::{self, Write};

use crossterm::{
    cursor, event, execute, queue,
    style::{Attribute, Color as CtColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal,
};

use crate::buffer::Buffer;
use crate::event::Input;
use crate::rect::Rect;
use crate::text::char_width;
use crate::types::{Rgb, TextStyle};
use crate::window::Window;

/// Raw-mode alternate screen that presents [`Window`]s.
///
/// Every present composes the given windows into a frame and writes only the
/// cells that differ from the previous frame.
pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)?;

        let (width, height) = terminal::size()?;
        log::info!("terminal: {}x{}", width, height);

        Ok(Self {
            stdout,
            current_buffer: Buffer::new(width, height),
            previous_buffer: Buffer::new(width, height),
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    pub fn area(&self) -> Rect {
        let (width, height) = self.size();
        Rect::from_size(width, height)
    }

    /// Block until the next input the menu layer understands.
    pub fn read_input(&self) -> io::Result<Input> {
        loop {
            if let Some(input) = Input::from_crossterm(event::read()?) {
                return Ok(input);
            }
        }
    }

    /// Compose `windows` in order (later ones on top) and flush the changes.
    ///
    /// Pending refresh flags on the windows are left for the caller; every
    /// window passed in is drawn.
    pub fn present(&mut self, windows: &[&Window]) -> io::Result<()> {
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            log::debug!("terminal: resized to {}x{}", width, height);
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
            queue!(self.stdout, terminal::Clear(terminal::ClearType::All))?;
        }

        self.current_buffer.clear();
        for window in windows {
            self.current_buffer.blit(window.buffer(), window.area());
        }

        self.flush_diff()?;
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);
        Ok(())
    }

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_x = u16::MAX;
        let mut last_y = u16::MAX;
        let mut last_char_width: u16 = 1;
        let mut last_fg = Rgb::WHITE;
        let mut last_bg = Rgb::BLACK;
        let mut last_style = TextStyle::new();

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            if cell.wide_continuation {
                continue;
            }

            if y != last_y || x != last_x.wrapping_add(last_char_width) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }

            if cell.fg != last_fg {
                queue!(self.stdout, SetForegroundColor(to_crossterm(cell.fg)))?;
                last_fg = cell.fg;
            }
            if cell.bg != last_bg {
                queue!(self.stdout, SetBackgroundColor(to_crossterm(cell.bg)))?;
                last_bg = cell.bg;
            }

            if cell.style != last_style {
                queue!(self.stdout, SetAttribute(Attribute::Reset))?;
                queue!(
                    self.stdout,
                    SetForegroundColor(to_crossterm(cell.fg)),
                    SetBackgroundColor(to_crossterm(cell.bg))
                )?;
                if cell.style.bold {
                    queue!(self.stdout, SetAttribute(Attribute::Bold))?;
                }
                if cell.style.dim {
                    queue!(self.stdout, SetAttribute(Attribute::Dim))?;
                }
                if cell.style.underline {
                    queue!(self.stdout, SetAttribute(Attribute::Underlined))?;
                }
                if cell.style.reverse {
                    queue!(self.stdout, SetAttribute(Attribute::Reverse))?;
                }
                last_style = cell.style;
            }

            write!(self.stdout, "{}", cell.char)?;

            last_x = x;
            last_y = y;
            last_char_width = char_width(cell.char).max(1) as u16;
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn to_crossterm(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(self.stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}
