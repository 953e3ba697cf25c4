use super::Cell;
use crate::rect::Rect;

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.cells[idx] = cell;
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Copy `src` into this buffer with its top-left corner at `area`'s origin,
    /// clipped to both `area` and this buffer.
    pub fn blit(&mut self, src: &Buffer, area: Rect) {
        let width = src.width.min(area.width);
        let height = src.height.min(area.height);
        for y in 0..height {
            for x in 0..width {
                if let Some(cell) = src.get(x, y) {
                    self.set(area.x.saturating_add(x), area.y.saturating_add(y), *cell);
                }
            }
        }
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    /// Reset every cell in row `y` from column `x` to the right edge.
    pub fn clear_from(&mut self, x: u16, y: u16) {
        if y >= self.height {
            return;
        }
        for col in x..self.width {
            let idx = self.index(col, y);
            self.cells[idx] = Cell::default();
        }
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }
}
