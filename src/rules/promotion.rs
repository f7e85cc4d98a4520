use crate::board::Board;
use crate::types::{Color, Piece, PieceKind, Square};

/// True when the piece on `to` is a pawn standing on its promotion row.
pub fn needs_promotion(board: &Board, to: Square) -> bool {
    board
        .get(to)
        .is_some_and(|piece| piece.kind == PieceKind::Pawn && to.row == piece.color.promotion_row())
}

/// Replaces whatever stands on `square` with `kind` of `color`.
///
/// The kind is not checked here; callers restrict it to
/// [`PieceKind::PROMOTION_CHOICES`].
pub fn apply_promotion(board: &mut Board, square: Square, kind: PieceKind, color: Color) {
    board.set(square, Some(Piece::new(kind, color)));
}
