//! Chess move legality over a [`Board`](crate::board::Board) snapshot.
//!
//! Every function here is total: nonsensical origin/destination pairs answer
//! `false` or an empty list. Only [`apply_promotion`] writes to the board.

pub mod check;
pub mod legality;
pub mod movegen;
pub mod movement;
pub mod promotion;

pub use check::{is_attacked, is_in_check};
pub use legality::is_legal;
pub use movegen::{has_any_legal_move, is_checkmate, legal_destinations};
pub use movement::is_pseudo_legal;
pub use promotion::{apply_promotion, needs_promotion};
