use serde::Serialize;
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::error::GameError;
use crate::rules;
use crate::types::{Color, GameOptions, GameState, GameStatus, PieceKind, Square};

/// Supplies the replacement piece when a pawn reaches the far rank.
/// Returning `None` withdraws the pawn move.
pub trait PromotionChooser: Send + Sync {
    fn choose(&self, board: &Board, square: Square, color: Color) -> Option<PieceKind>;
}

/// Always picks the same piece.
#[derive(Debug, Clone, Copy)]
pub struct FixedPromotionChooser {
    pub kind: PieceKind,
}

impl Default for FixedPromotionChooser {
    fn default() -> Self {
        Self {
            kind: PieceKind::Queen,
        }
    }
}

impl PromotionChooser for FixedPromotionChooser {
    fn choose(&self, _board: &Board, _square: Square, _color: Color) -> Option<PieceKind> {
        Some(self.kind)
    }
}

/// What a click on the board did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum ClickOutcome {
    /// A piece of the side to move was selected.
    Selected { destinations: Vec<Square> },
    /// The click did not hit a cached destination; selection dropped.
    Deselected,
    /// Nothing selected and the square holds no piece of the side to move.
    Ignored,
    Moved,
    /// A pawn reached the far rank; waiting for `complete_promotion`.
    PromotionPending { square: Square },
}

/// Result of [`GameInstance::play`] and
/// [`GameInstance::complete_promotion_with_chooser`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Moved,
    Promoted(PieceKind),
    /// The chooser declined; the board is as it was before the move.
    Withdrawn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Selection {
    square: Square,
    destinations: Vec<Square>,
}

#[derive(Debug, Clone, Copy)]
struct PendingPromotion {
    before: Board,
    square: Square,
    color: Color,
}

/// One game session. The session is the only writer of its board; rule
/// queries get a shared reference.
pub struct GameInstance {
    board: Board,
    pub current_player: Color,
    pub is_game_over: bool,
    pub rotated: bool,
    selection: Option<Selection>,
    pending: Option<PendingPromotion>,
    chooser: Box<dyn PromotionChooser>,
}

impl GameInstance {
    pub fn new(options: GameOptions, chooser: Box<dyn PromotionChooser>) -> Self {
        Self {
            board: Board::new(),
            current_player: Color::White,
            is_game_over: false,
            rotated: options.rotated,
            selection: None,
            pending: None,
            chooser,
        }
    }

    pub fn with_options(options: GameOptions) -> Self {
        let chooser = FixedPromotionChooser {
            kind: options.promotion_default,
        };
        Self::new(options, Box::new(chooser))
    }

    pub fn new_with_default_chooser() -> Self {
        Self::with_options(GameOptions::default())
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Status label for the side to move.
    pub fn status(&self) -> GameStatus {
        if self.is_game_over {
            GameStatus::Checkmate
        } else if rules::is_in_check(&self.board, self.current_player) {
            GameStatus::Check
        } else {
            GameStatus::Playing
        }
    }

    /// Handles a click on a board square.
    ///
    /// Without a selection, a piece of the side to move becomes selected.
    /// With one, a cached destination plays the move and anything else
    /// deselects.
    pub fn click(&mut self, square: Square) -> Result<ClickOutcome, GameError> {
        self.ensure_accepting_moves()?;

        if let Some(selection) = self.selection.take() {
            if !selection.destinations.contains(&square) {
                debug!(from = %selection.square, to = %square, "not a legal destination, deselecting");
                return Ok(ClickOutcome::Deselected);
            }
            return if self.apply_move(selection.square, square)? {
                Ok(ClickOutcome::PromotionPending { square })
            } else {
                Ok(ClickOutcome::Moved)
            };
        }

        match self.board.get(square) {
            Some(piece) if piece.color == self.current_player => {
                let destinations = rules::legal_destinations(&self.board, square);
                debug!(
                    %square,
                    piece = %piece.to_char(),
                    count = destinations.len(),
                    "piece selected"
                );
                self.selection = Some(Selection {
                    square,
                    destinations: destinations.clone(),
                });
                Ok(ClickOutcome::Selected { destinations })
            }
            Some(piece) => {
                debug!(%square, piece = %piece.to_char(), "piece does not belong to the side to move");
                Ok(ClickOutcome::Ignored)
            }
            None => Ok(ClickOutcome::Ignored),
        }
    }

    /// Same as [`click`](Self::click) with screen coordinates.
    pub fn click_view(&mut self, row: u8, col: u8) -> Result<ClickOutcome, GameError> {
        let square = self.view_to_square(row, col)?;
        self.click(square)
    }

    /// Plays `from -> to` in one call. A promotion is resolved through the
    /// session's [`PromotionChooser`].
    pub fn play(&mut self, from: Square, to: Square) -> Result<PlayOutcome, GameError> {
        self.ensure_accepting_moves()?;

        self.apply_move(from, to)?;
        self.selection = None;
        if self.pending.is_none() {
            return Ok(PlayOutcome::Moved);
        }
        self.complete_promotion_with_chooser()
    }

    /// Finishes a pending promotion with the session's [`PromotionChooser`].
    /// A rejected choice takes the pawn move back before the error is
    /// returned.
    pub fn complete_promotion_with_chooser(&mut self) -> Result<PlayOutcome, GameError> {
        let pending = self.pending.ok_or(GameError::NoPendingPromotion)?;

        let choice = self.chooser.choose(&self.board, pending.square, pending.color);
        if let Err(err) = self.complete_promotion(choice) {
            self.complete_promotion(None)?;
            return Err(err);
        }
        Ok(match choice {
            Some(kind) => PlayOutcome::Promoted(kind),
            None => PlayOutcome::Withdrawn,
        })
    }

    /// Finishes a pending promotion. `None` takes the pawn move back and
    /// keeps the turn with the same side.
    pub fn complete_promotion(&mut self, choice: Option<PieceKind>) -> Result<(), GameError> {
        let pending = self.pending.take().ok_or(GameError::NoPendingPromotion)?;

        match choice {
            Some(kind) if kind.is_promotion_choice() => {
                rules::apply_promotion(&mut self.board, pending.square, kind, pending.color);
                info!(square = %pending.square, ?kind, "pawn promoted");
                self.finish_turn();
                Ok(())
            }
            Some(kind) => {
                warn!(?kind, "rejected promotion choice");
                self.pending = Some(pending);
                Err(GameError::InvalidPromotion(kind))
            }
            None => {
                self.board = pending.before;
                info!(square = %pending.square, "promotion withdrawn, move taken back");
                Ok(())
            }
        }
    }

    /// Legal destinations of the piece on `square` if it belongs to the
    /// side to move.
    pub fn legal_moves(&self, square: Square) -> Vec<Square> {
        match self.board.get(square) {
            Some(piece) if piece.color == self.current_player && self.pending.is_none() => {
                rules::legal_destinations(&self.board, square)
            }
            _ => Vec::new(),
        }
    }

    pub fn has_legal_moves_for_current(&self) -> bool {
        rules::has_any_legal_move(&self.board, self.current_player)
    }

    pub fn rotate(&mut self) {
        self.rotated = !self.rotated;
        debug!(rotated = self.rotated, "board rotated");
    }

    /// Board square under screen cell `(row, col)`.
    pub fn view_to_square(&self, row: u8, col: u8) -> Result<Square, GameError> {
        let square = Square::new(row, col).ok_or(GameError::OutOfRange { row, col })?;
        Ok(if self.rotated { square.rotated() } else { square })
    }

    /// Screen cell showing board square `square`.
    pub fn square_to_view(&self, square: Square) -> Square {
        if self.rotated { square.rotated() } else { square }
    }

    pub fn to_game_state(&self) -> GameState {
        let status = self.status();
        let checked_king = match status {
            GameStatus::Playing => None,
            GameStatus::Check | GameStatus::Checkmate => self.board.find_king(self.current_player),
        };
        let (selected, destinations) = match &self.selection {
            Some(selection) => (Some(selection.square), selection.destinations.clone()),
            None => (None, Vec::new()),
        };

        GameState {
            board: self.board.to_array().to_vec(),
            current_player: self.current_player,
            status,
            selected,
            destinations,
            checked_king,
            pending_promotion: self.pending.map(|pending| pending.square),
            rotated: self.rotated,
        }
    }

    fn ensure_accepting_moves(&self) -> Result<(), GameError> {
        if self.is_game_over {
            warn!("move attempted after checkmate");
            return Err(GameError::GameOver);
        }
        if self.pending.is_some() {
            warn!("move attempted while a promotion is pending");
            return Err(GameError::PromotionPending);
        }
        Ok(())
    }

    /// Plays a validated move on the session board.
    /// Returns `true` when the move now waits for a promotion choice.
    fn apply_move(&mut self, from: Square, to: Square) -> Result<bool, GameError> {
        let Some(piece) = self.board.get(from).filter(|p| p.color == self.current_player) else {
            return Err(GameError::IllegalMove { from, to });
        };
        let legal = rules::is_legal(&self.board, from, to);
        debug!(piece = %piece.to_char(), %from, %to, legal, "move attempted");
        if !legal {
            return Err(GameError::IllegalMove { from, to });
        }

        let before = self.board;
        self.board.move_piece(from, to);

        if rules::needs_promotion(&self.board, to) {
            self.pending = Some(PendingPromotion {
                before,
                square: to,
                color: piece.color,
            });
            return Ok(true);
        }

        self.finish_turn();
        Ok(false)
    }

    fn finish_turn(&mut self) {
        self.current_player = self.current_player.opponent();
        info!(to_move = ?self.current_player, "move completed");

        if rules::is_checkmate(&self.board, self.current_player) {
            info!(loser = ?self.current_player, "checkmate");
            self.is_game_over = true;
        }
    }

    #[cfg(test)]
    fn set_board_for_test(&mut self, board: Board, current_player: Color) {
        self.board = board;
        self.current_player = current_player;
        self.is_game_over = rules::is_checkmate(&board, current_player);
        self.selection = None;
        self.pending = None;
    }
}
