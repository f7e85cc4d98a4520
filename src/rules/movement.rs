use crate::board::Board;
use crate::types::{Piece, PieceKind, Square};

/// Returns whether `from -> to` follows the moving piece's shape and path
/// rules, ignoring whether the mover's own king is left in check.
///
/// An empty origin, a same-colour destination or a null move all yield
/// `false`.
pub fn is_pseudo_legal(board: &Board, from: Square, to: Square) -> bool {
    let Some(piece) = board.get(from) else {
        return false;
    };
    if let Some(target) = board.get(to)
        && target.color == piece.color
    {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_move(board, piece, from, to),
        PieceKind::Rook => rook_move(board, from, to),
        PieceKind::Bishop => bishop_move(board, from, to),
        PieceKind::Queen => rook_move(board, from, to) || bishop_move(board, from, to),
        PieceKind::King => king_move(from, to),
        PieceKind::Knight => knight_move(from, to),
    }
}

fn deltas(from: Square, to: Square) -> (i8, i8) {
    (
        to.row as i8 - from.row as i8,
        to.col as i8 - from.col as i8,
    )
}

fn pawn_move(board: &Board, pawn: Piece, from: Square, to: Square) -> bool {
    let forward = pawn.color.forward();
    let (dr, dc) = deltas(from, to);

    if dc == 0 {
        if dr == forward {
            return board.is_empty(to);
        }
        if dr == 2 * forward && from.row == pawn.color.pawn_start_row() {
            return from
                .offset(forward, 0)
                .is_some_and(|mid| board.is_empty(mid))
                && board.is_empty(to);
        }
        return false;
    }

    // Diagonal steps only capture; no en passant.
    dc.abs() == 1 && dr == forward && board.get(to).is_some_and(|t| t.color != pawn.color)
}

fn rook_move(board: &Board, from: Square, to: Square) -> bool {
    if from.row != to.row && from.col != to.col {
        return false;
    }
    path_is_clear(board, from, to)
}

fn bishop_move(board: &Board, from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    if dr.abs() != dc.abs() {
        return false;
    }
    path_is_clear(board, from, to)
}

fn king_move(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    dr.abs() <= 1 && dc.abs() <= 1 && (dr, dc) != (0, 0)
}

fn knight_move(from: Square, to: Square) -> bool {
    let (dr, dc) = deltas(from, to);
    matches!((dr.abs(), dc.abs()), (2, 1) | (1, 2))
}

/// Squares strictly between `from` and `to` along a rank, file or diagonal
/// must all be empty. Callers guarantee the two squares are aligned.
fn path_is_clear(board: &Board, from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let (dr, dc) = deltas(from, to);
    let (step_r, step_c) = (dr.signum(), dc.signum());

    let mut current = from;
    loop {
        let Some(next) = current.offset(step_r, step_c) else {
            return false;
        };
        if next == to {
            return true;
        }
        if !board.is_empty(next) {
            return false;
        }
        current = next;
    }
}
