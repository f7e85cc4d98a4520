use crate::board::Board;
use crate::rules::movement::is_pseudo_legal;
use crate::types::{Color, Square};

/// Whether the king of `color` is attacked by any opposing piece.
///
/// A board without a king of that colour is never in check, which keeps
/// partial positions usable as fixtures.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.find_king(color) {
        Some(king) => is_attacked(board, king, color.opponent()),
        None => false,
    }
}

/// Whether any piece of `attacker` can reach `target` under the movement
/// rules.
pub fn is_attacked(board: &Board, target: Square, attacker: Color) -> bool {
    board
        .pieces(attacker)
        .any(|(from, _)| is_pseudo_legal(board, from, target))
}
