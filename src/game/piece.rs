use rand::Rng;
use ratatui::style::Color;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PieceKind {
    I,
    T,
    L,
    J,
    Z,
    S,
    O,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::Z,
        PieceKind::S,
        PieceKind::O,
    ];

    /// Canonical layout matrix. Only consulted at construction time to
    /// derive the relative cell offsets.
    fn layout(self) -> &'static [&'static [bool]] {
        const T: bool = true;
        const F: bool = false;
        match self {
            PieceKind::I => &[&[T, T, T, T]],
            PieceKind::T => &[&[T, T, T], &[F, T, F]],
            PieceKind::L => &[&[T, T, T], &[T, F, F]],
            PieceKind::J => &[&[T, T, T], &[F, F, T]],
            PieceKind::Z => &[&[T, T, F], &[F, T, T]],
            PieceKind::S => &[&[F, T, T], &[T, T, F]],
            PieceKind::O => &[&[T, T], &[T, T]],
        }
    }
}

const PALETTE: [Color; 7] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Red,
    Color::Blue,
    Color::LightYellow,
];

/// The falling tetromino: an anchor position plus four cell offsets
/// relative to it. Offsets are derived once by centering the layout matrix
/// (index - 1 on both axes) so rotation can pivot around the anchor.
#[derive(Clone, PartialEq, Debug)]
pub struct Piece {
    pub kind: PieceKind,
    pub row: i32,
    pub col: i32,
    pub cells: [(i32, i32); 4],
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceKind, color: Color) -> Self {
        let mut cells = [(0, 0); 4];
        let mut n = 0;
        for (i, layout_row) in kind.layout().iter().enumerate() {
            for (j, &filled) in layout_row.iter().enumerate() {
                if filled {
                    cells[n] = (i as i32 - 1, j as i32 - 1);
                    n += 1;
                }
            }
        }
        debug_assert_eq!(n, 4);

        Self {
            kind,
            row: 0,
            col: 0,
            cells,
            color,
        }
    }

    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let kind = PieceKind::ALL[rng.gen_range(0..PieceKind::ALL.len())];
        let color = PALETTE[rng.gen_range(0..PALETTE.len())];
        Self::new(kind, color)
    }

    /// Absolute grid positions of the four cells.
    pub fn blocks(&self) -> [(i32, i32); 4] {
        self.cells
            .map(|(di, dj)| (self.row + di, self.col + dj))
    }

    /// The offsets this piece would have after a clockwise quarter turn
    /// around its anchor: (di, dj) -> (dj, -di).
    pub fn rotated_cells(&self) -> [(i32, i32); 4] {
        self.cells.map(|(di, dj)| (dj, -di))
    }

    pub fn apply_rotation(&mut self) {
        self.cells = self.rotated_cells();
    }
}
