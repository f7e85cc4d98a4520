use crate::board::Board;
use crate::rules::check::is_in_check;
use crate::rules::legality::is_legal;
use crate::types::{Color, Square};

/// Every square the piece on `from` can legally reach, row-major.
pub fn legal_destinations(board: &Board, from: Square) -> Vec<Square> {
    Square::all().filter(|&to| is_legal(board, from, to)).collect()
}

/// Whether `color` has at least one legal move. Stops at the first one found.
pub fn has_any_legal_move(board: &Board, color: Color) -> bool {
    board
        .pieces(color)
        .any(|(from, _)| Square::all().any(|to| is_legal(board, from, to)))
}

/// In check with no legal move.
///
/// A side without moves that is not in check is not reported here; there is
/// no separate stalemate result.
pub fn is_checkmate(board: &Board, color: Color) -> bool {
    is_in_check(board, color) && !has_any_legal_move(board, color)
}
