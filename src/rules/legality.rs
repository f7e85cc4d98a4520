use crate::board::Board;
use crate::rules::check::is_in_check;
use crate::rules::movement::is_pseudo_legal;
use crate::types::Square;

/// Returns whether the piece on `from` may legally move to `to`.
///
/// The move is played on a copy of `board`; it is legal when it is
/// pseudo-legal and the mover's king is not in check afterwards. This one
/// condition covers both escaping an existing check and not walking into a
/// new one.
pub fn is_legal(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };
    if !is_pseudo_legal(board, from, to) {
        return false;
    }

    let mut after = *board;
    after.move_piece(from, to);
    !is_in_check(&after, piece.color)
}
