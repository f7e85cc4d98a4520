use std::fmt;

use serde::{Deserialize, Serialize};

pub const BOARD_SIZE: usize = 8;

/// Side of a piece, also used as the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opponent(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Row a pawn of this colour has to reach to promote.
    pub fn promotion_row(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => (BOARD_SIZE - 1) as u8,
        }
    }

    pub(crate) fn pawn_start_row(self) -> u8 {
        match self {
            Color::White => (BOARD_SIZE - 2) as u8,
            Color::Black => 1,
        }
    }

    /// Row delta of a single pawn step.
    pub(crate) fn forward(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceKind {
    Pawn,
    Rook,
    Knight,
    Bishop,
    Queen,
    King,
}

impl PieceKind {
    /// Kinds a pawn may be promoted to, in the order they are offered.
    pub const PROMOTION_CHOICES: [PieceKind; 4] = [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ];

    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Rook => 'R',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'R' => Some(PieceKind::Rook),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    /// Parses a one-letter label such as `"Q"` or `"n"`. Empty and longer
    /// strings are rejected.
    pub fn from_label(label: &str) -> Option<Self> {
        let mut chars = label.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_letter(c),
            _ => None,
        }
    }

    pub fn is_promotion_choice(self) -> bool {
        Self::PROMOTION_CHOICES.contains(&self)
    }
}

/// A coloured piece. Pieces carry no identity or move history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }

    /// Upper case for white, lower case for black.
    pub fn to_char(self) -> char {
        let letter = self.kind.letter();
        match self.color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        let kind = PieceKind::from_letter(c)?;
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        Some(Self { kind, color })
    }
}

/// A board coordinate. Row 0 is black's back rank, row 7 is white's.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Self> {
        if (row as usize) < BOARD_SIZE && (col as usize) < BOARD_SIZE {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// All 64 squares in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..(BOARD_SIZE * BOARD_SIZE) as u8).map(|idx| Square {
            row: idx / BOARD_SIZE as u8,
            col: idx % BOARD_SIZE as u8,
        })
    }

    /// The same square seen from the other side of the board.
    pub fn rotated(self) -> Self {
        let last = (BOARD_SIZE - 1) as u8;
        Self {
            row: last - self.row,
            col: last - self.col,
        }
    }

    pub fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Square offset by `(dr, dc)`, or `None` when it falls off the board.
    pub(crate) fn offset(self, dr: i8, dc: i8) -> Option<Self> {
        let row = self.row as i16 + dr as i16;
        let col = self.col as i16 + dc as i16;
        if row < 0 || col < 0 {
            return None;
        }
        Self::new(row as u8, col as u8)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Session settings supplied by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameOptions {
    /// Start with the board turned 180 degrees.
    pub rotated: bool,
    /// Piece the built-in chooser picks when a pawn promotes.
    pub promotion_default: PieceKind,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            rotated: false,
            promotion_default: PieceKind::Queen,
        }
    }
}

/// Label shown for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Check,
    Checkmate,
}

/// Public game state returned from WASM APIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameState {
    /// 64 cells, row-major in board coordinates: piece letter or `None`.
    pub board: Vec<Option<char>>,
    pub current_player: Color,
    pub status: GameStatus,
    pub selected: Option<Square>,
    /// Legal destinations of `selected`; empty when nothing is selected.
    pub destinations: Vec<Square>,
    /// King of the side to move when it is attacked.
    pub checked_king: Option<Square>,
    /// Square of the pawn waiting for a promotion choice.
    pub pending_promotion: Option<Square>,
    pub rotated: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piece_chars_encode_color_by_case() {
        let white_knight = Piece::new(PieceKind::Knight, Color::White);
        let black_queen = Piece::new(PieceKind::Queen, Color::Black);

        assert_eq!(white_knight.to_char(), 'N');
        assert_eq!(black_queen.to_char(), 'q');
        assert_eq!(Piece::from_char('q'), Some(black_queen));
        assert_eq!(Piece::from_char('x'), None);
    }

    #[test]
    fn piece_labels_must_be_one_letter() {
        assert_eq!(PieceKind::from_label("Q"), Some(PieceKind::Queen));
        assert_eq!(PieceKind::from_label("n"), Some(PieceKind::Knight));
        assert_eq!(PieceKind::from_label(""), None);
        assert_eq!(PieceKind::from_label("QR"), None);
        assert_eq!(PieceKind::from_label("x"), None);
    }

    #[test]
    fn square_bounds_and_rotation() {
        assert!(Square::new(7, 7).is_some());
        assert!(Square::new(8, 0).is_none());
        assert!(Square::new(0, 8).is_none());

        let sq = Square { row: 1, col: 2 };
        assert_eq!(sq.rotated(), Square { row: 6, col: 5 });
        assert_eq!(sq.rotated().rotated(), sq);
    }

    #[test]
    fn square_offset_stays_on_board() {
        let corner = Square { row: 0, col: 0 };

        assert_eq!(corner.offset(-1, 0), None);
        assert_eq!(corner.offset(2, 1), Some(Square { row: 2, col: 1 }));
        assert_eq!(Square { row: 7, col: 7 }.offset(1, 0), None);
    }

    #[test]
    fn all_squares_are_row_major() {
        let squares: Vec<Square> = Square::all().collect();

        assert_eq!(squares.len(), 64);
        assert_eq!(squares[0], Square { row: 0, col: 0 });
        assert_eq!(squares[9], Square { row: 1, col: 1 });
        assert!(squares.iter().enumerate().all(|(i, sq)| sq.index() == i));
    }

    #[test]
    fn color_and_kind_helpers() {
        assert_eq!(Color::White.opponent(), Color::Black);
        assert_eq!(Color::Black.promotion_row(), 7);
        assert!(!PieceKind::King.is_promotion_choice());
        assert!(!PieceKind::Pawn.is_promotion_choice());
    }
}
