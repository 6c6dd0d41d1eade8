pub mod engine;
pub mod grid;
pub mod piece;

pub use engine::{ConfigError, Engine};
pub use grid::{Cell, Grid};
pub use piece::{Piece, PieceKind};
