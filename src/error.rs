use thiserror::Error;

use crate::types::{PieceKind, Square};

/// Rejections from the game session. Rule queries never fail; only
/// requests that cannot be applied to the current session end up here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("game is already over")]
    GameOver,
    #[error("row/col out of range: ({row}, {col})")]
    OutOfRange { row: u8, col: u8 },
    #[error("a promotion choice is pending")]
    PromotionPending,
    #[error("no promotion is pending")]
    NoPendingPromotion,
    #[error("cannot promote to {0:?}")]
    InvalidPromotion(PieceKind),
    #[error("illegal move {from} -> {to}")]
    IllegalMove { from: Square, to: Square },
}
