use ratatui::style::Color;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Cell {
    Empty,
    Active(Color),
    Locked(Color),
}

impl Cell {
    pub fn is_locked(&self) -> bool {
        matches!(self, Cell::Locked(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

/// The playfield. Row 0 is the top (spawn side), row `rows - 1` the bottom.
/// Cells are stored row-major in a flat buffer.
#[derive(Clone, PartialEq, Debug)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        if row < 0 || row >= self.rows as i32 || col < 0 || col >= self.cols as i32 {
            return None;
        }
        Some(row as usize * self.cols + col as usize)
    }

    /// Returns None when (row, col) is out of bounds.
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        self.index(row, col).map(|idx| self.cells[idx])
    }

    /// Out-of-bounds writes are silently skipped, so a piece entering from
    /// above row 0 can move and shift without its off-grid cells existing
    /// anywhere in the buffer.
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) {
        if let Some(idx) = self.index(row, col) {
            self.cells[idx] = cell;
        }
    }

    pub fn is_locked(&self, row: i32, col: i32) -> bool {
        matches!(self.get(row, col), Some(Cell::Locked(_)))
    }

    /// A row counts as full only when every cell is locked. Active cells
    /// belong to the falling piece and must not trigger a clear while it
    /// merely passes through.
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= self.rows {
            return false;
        }
        let start = row * self.cols;
        self.cells[start..start + self.cols]
            .iter()
            .all(|cell| cell.is_locked())
    }

    pub fn clear_row(&mut self, row: usize) {
        if row >= self.rows {
            return;
        }
        let start = row * self.cols;
        for cell in &mut self.cells[start..start + self.cols] {
            *cell = Cell::Empty;
        }
    }

    /// Removes row `row` by shifting every row above it down one step and
    /// emptying row 0. Equivalent to deleting the row and inserting a fresh
    /// empty row at the top.
    pub fn shift_down_through(&mut self, row: usize) {
        if row >= self.rows {
            return;
        }
        for r in (1..=row).rev() {
            let src = (r - 1) * self.cols;
            let dst = r * self.cols;
            self.cells.copy_within(src..src + self.cols, dst);
        }
        self.clear_row(0);
    }

    /// Game-over probe: a locked cell in the spawn row means the stack has
    /// reached the top.
    pub fn is_top_row_locked(&self) -> bool {
        self.cells[..self.cols].iter().any(|cell| cell.is_locked())
    }
}
