use std::fmt;

use once_cell::sync::Lazy;
use thiserror::Error;

use crate::types::{BOARD_SIZE, Color, Piece, PieceKind, Square};

const NUM_SQUARES: usize = BOARD_SIZE * BOARD_SIZE;
const STARTING_ROWS: [&str; BOARD_SIZE] = [
    "rnbqkbnr",
    "pppppppp",
    "........",
    "........",
    "........",
    "........",
    "PPPPPPPP",
    "RNBQKBNR",
];

static STARTING_BOARD: Lazy<Board> = Lazy::new(|| match Board::from_rows(STARTING_ROWS) {
    Ok(board) => board,
    Err(err) => unreachable!("starting layout is malformed: {err}"),
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardParseError {
    #[error("row {row} has {len} squares, expected 8")]
    RowLength { row: usize, len: usize },
    #[error("row {row} col {col}: unknown piece character {found:?}")]
    UnknownPiece { row: usize, col: usize, found: char },
}

/// Chess board as an 8x8 grid of optional pieces.
///
/// `Board` is `Copy`: passing it by value is a full snapshot, so rule
/// checks can simulate moves without touching the caller's board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl Board {
    /// Creates the standard starting layout, white on rows 6 and 7.
    pub fn new() -> Self {
        *STARTING_BOARD
    }

    pub fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Parses eight rows of eight characters, row 0 first.
    /// `.` is an empty square, upper case letters are white, lower case black.
    pub fn from_rows(rows: [&str; BOARD_SIZE]) -> Result<Self, BoardParseError> {
        let mut board = Self::empty();
        for (row, line) in rows.iter().enumerate() {
            let len = line.chars().count();
            if len != BOARD_SIZE {
                return Err(BoardParseError::RowLength { row, len });
            }
            for (col, c) in line.chars().enumerate() {
                if c == '.' {
                    continue;
                }
                let piece = Piece::from_char(c).ok_or(BoardParseError::UnknownPiece {
                    row,
                    col,
                    found: c,
                })?;
                board.cells[row][col] = Some(piece);
            }
        }
        Ok(board)
    }

    pub fn get(&self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize]
    }

    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.cells[square.row as usize][square.col as usize] = piece;
    }

    pub fn take(&mut self, square: Square) -> Option<Piece> {
        self.cells[square.row as usize][square.col as usize].take()
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.get(square).is_none()
    }

    /// Moves whatever stands on `from` to `to` without any rule check.
    /// Returns the piece previously standing on `to`.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.take(from);
        let captured = self.get(to);
        self.set(to, moving);
        captured
    }

    /// Linear scan for the first king of `color`.
    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Occupied squares holding a piece of `color`, row-major.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| {
            self.get(square)
                .filter(|piece| piece.color == color)
                .map(|piece| (square, piece))
        })
    }

    /// Flattens the board to row-major cells of piece characters.
    pub fn to_array(&self) -> [Option<char>; NUM_SQUARES] {
        let mut board = [None; NUM_SQUARES];
        for (square, cell) in Square::all().zip(board.iter_mut()) {
            *cell = self.get(square).map(Piece::to_char);
        }
        board
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell.map_or('.', |piece| piece.to_char()))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(row: u8, col: u8) -> Square {
        Square { row, col }
    }

    #[test]
    fn initial_layout_has_back_ranks_and_pawns() {
        let board = Board::new();

        assert_eq!(
            board.get(sq(7, 4)),
            Some(Piece::new(PieceKind::King, Color::White))
        );
        assert_eq!(
            board.get(sq(0, 3)),
            Some(Piece::new(PieceKind::Queen, Color::Black))
        );
        assert_eq!(
            board.get(sq(0, 1)),
            Some(Piece::new(PieceKind::Knight, Color::Black))
        );
        for col in 0..8 {
            assert_eq!(
                board.get(sq(6, col)),
                Some(Piece::new(PieceKind::Pawn, Color::White))
            );
            assert_eq!(
                board.get(sq(1, col)),
                Some(Piece::new(PieceKind::Pawn, Color::Black))
            );
            for row in 2..6 {
                assert!(board.is_empty(sq(row, col)));
            }
        }
        assert_eq!(board.pieces(Color::White).count(), 16);
        assert_eq!(board.pieces(Color::Black).count(), 16);
    }

    #[test]
    fn display_prints_rows_top_down() {
        let text = Board::new().to_string();
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows, STARTING_ROWS.to_vec());
    }

    #[test]
    fn from_rows_rejects_malformed_input() {
        let mut rows = ["........"; 8];
        rows[3] = "....";
        assert_eq!(
            Board::from_rows(rows),
            Err(BoardParseError::RowLength { row: 3, len: 4 })
        );

        rows[3] = "...x....";
        assert_eq!(
            Board::from_rows(rows),
            Err(BoardParseError::UnknownPiece {
                row: 3,
                col: 3,
                found: 'x'
            })
        );
    }

    #[test]
    fn move_piece_returns_captured_and_clears_origin() {
        let mut board = Board::from_rows([
            "....k...",
            "........",
            "........",
            "...p....",
            "........",
            "........",
            "........",
            "...QK...",
        ])
        .unwrap();

        let captured = board.move_piece(sq(7, 3), sq(3, 3));

        assert_eq!(captured, Some(Piece::new(PieceKind::Pawn, Color::Black)));
        assert!(board.is_empty(sq(7, 3)));
        assert_eq!(
            board.get(sq(3, 3)),
            Some(Piece::new(PieceKind::Queen, Color::White))
        );
    }

    #[test]
    fn find_king_scans_for_color() {
        let board = Board::new();

        assert_eq!(board.find_king(Color::White), Some(sq(7, 4)));
        assert_eq!(board.find_king(Color::Black), Some(sq(0, 4)));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn to_array_is_row_major() {
        let cells = Board::new().to_array();

        assert_eq!(cells[0], Some('r'));
        assert_eq!(cells[4], Some('k'));
        assert_eq!(cells[60], Some('K'));
        assert_eq!(cells[32], None);
    }
}
