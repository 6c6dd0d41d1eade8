use std::collections::VecDeque;
use std::error::Error;
use std::fmt;

use crate::game::grid::{Cell, Grid};
use crate::game::piece::Piece;

/// Rejected construction parameters for a new game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigError {
    pub rows: usize,
    pub cols: usize,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid playfield size {}x{}: both dimensions must be at least 1",
            self.rows, self.cols
        )
    }
}

impl Error for ConfigError {}

/// The rule engine: playfield, falling piece, one-deep preview queue,
/// score and game-over state. Timing lives with the caller; the engine
/// only defines what happens on each move/rotate/spawn.
#[derive(Debug)]
pub struct Engine {
    pub grid: Grid,
    pub current: Option<Piece>,
    pub queue: VecDeque<Piece>,
    pub score: u32,
    pub game_over: bool,
}

impl Engine {
    pub fn new(rows: usize, cols: usize) -> Result<Self, ConfigError> {
        if rows == 0 || cols == 0 {
            return Err(ConfigError { rows, cols });
        }
        Ok(Self {
            grid: Grid::new(rows, cols),
            current: None,
            queue: VecDeque::new(),
            score: 0,
            game_over: false,
        })
    }

    /// Promotes the queue front to the falling piece and refills the queue
    /// with a fresh random piece. The very first call finds an empty queue
    /// and leaves `current` as None, so a new game must spawn twice before
    /// any move or rotate.
    pub fn spawn(&mut self) {
        let spawn_col = self.grid.cols() as i32 / 2;
        self.current = self.queue.pop_front().map(|mut piece| {
            // Entering from above: the anchor starts off-grid.
            piece.row = -1;
            piece.col = spawn_col;
            piece
        });
        self.queue
            .push_back(Piece::random(&mut rand::thread_rng()));
        self.map_in();
    }

    /// One step of movement: (-1, 0) left, (1, 0) right, (0, 1) down.
    ///
    /// Horizontal moves against a wall or a locked cell are silent no-ops.
    /// A rejected downward move settles the piece instead: its cells lock,
    /// full rows clear, and either the game ends or the next piece spawns.
    ///
    /// Panics when there is no falling piece; driving an unprimed or
    /// finished game is a caller bug.
    pub fn move_piece(&mut self, dh: i32, dv: i32) {
        debug_assert!(
            matches!((dh, dv), (-1, 0) | (1, 0) | (0, 1)),
            "unsupported move delta ({dh}, {dv})"
        );
        let Some(piece) = &self.current else {
            panic!("move_piece called with no falling piece");
        };

        if dv == 1 {
            if self.is_blocked_below(piece) {
                self.settle();
                return;
            }
        } else if self.is_blocked_beside(piece, dh) {
            return;
        }

        self.map_out();
        let piece = self.current.as_mut().unwrap();
        piece.row += dv;
        piece.col += dh;
        self.map_in();
    }

    /// Clockwise quarter turn around the anchor. All four prospective cells
    /// must land inside the grid on non-locked cells or the rotation is
    /// rejected whole; there is no partial effect and no wall kick.
    ///
    /// Panics when there is no falling piece, like `move_piece`.
    pub fn rotate(&mut self) {
        let Some(piece) = &self.current else {
            panic!("rotate called with no falling piece");
        };

        let rows = self.grid.rows() as i32;
        let cols = self.grid.cols() as i32;
        for (di, dj) in piece.rotated_cells() {
            let row = piece.row + di;
            let col = piece.col + dj;
            if row < 0 || row >= rows || col < 0 || col >= cols {
                return;
            }
            if self.grid.is_locked(row, col) {
                return;
            }
        }

        self.map_out();
        self.current.as_mut().unwrap().apply_rotation();
        self.map_in();
    }

    pub fn get_cell(&self, row: usize, col: usize) -> Cell {
        self.grid
            .get(row as i32, col as i32)
            .unwrap_or(Cell::Empty)
    }

    pub fn peek_next(&self) -> Option<&Piece> {
        self.queue.front()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    fn is_blocked_below(&self, piece: &Piece) -> bool {
        piece.blocks().iter().any(|&(row, col)| {
            let target = row + 1;
            if target >= self.grid.rows() as i32 {
                return true;
            }
            self.grid.is_locked(target, col)
        })
    }

    fn is_blocked_beside(&self, piece: &Piece, dh: i32) -> bool {
        piece.blocks().iter().any(|&(row, col)| {
            // Cells still above the grid slide freely.
            if row < 0 {
                return false;
            }
            let target = col + dh;
            if target < 0 || target >= self.grid.cols() as i32 {
                return true;
            }
            self.grid.is_locked(row, target)
        })
    }

    /// Terminal collision below: lock the footprint, clear full rows, then
    /// either end the game or spawn the next piece.
    fn settle(&mut self) {
        let piece = self.current.take().unwrap();
        for (row, col) in piece.blocks() {
            self.grid.set(row, col, Cell::Locked(piece.color));
        }

        self.clear_full_rows();

        if self.grid.is_top_row_locked() {
            self.game_over = true;
            return;
        }
        self.spawn();
    }

    /// Scores one point per full row. Full-row indices are collected in a
    /// read-only pass first; shifting through row r only moves rows above
    /// r, so the remaining collected indices stay valid when applied in
    /// ascending order.
    fn clear_full_rows(&mut self) {
        let full: Vec<usize> = (0..self.grid.rows())
            .filter(|&row| self.grid.is_row_full(row))
            .collect();
        for &row in &full {
            self.grid.shift_down_through(row);
        }
        self.score += full.len() as u32;
    }

    fn map_in(&mut self) {
        let Some(piece) = &self.current else { return };
        let color = piece.color;
        for (row, col) in piece.blocks() {
            self.grid.set(row, col, Cell::Active(color));
        }
    }

    fn map_out(&mut self) {
        let Some(piece) = &self.current else { return };
        for (row, col) in piece.blocks() {
            self.grid.set(row, col, Cell::Empty);
        }
    }
}
