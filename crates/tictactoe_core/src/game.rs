//! Game engine for tic-tac-toe real play.

use tracing::instrument;

use super::action::{Move, MoveError};
use super::rules;
use super::types::{Board, GameStatus, Player, Square};

/// Tic-tac-toe game engine.
///
/// Owns the board for real play and validates every move before applying
/// it. Hypothetical exploration never goes through `Game`; the solver
/// works on board snapshots directly.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Player,
    status: GameStatus,
}

impl Game {
    /// Creates a new game with an empty board and X to move.
    #[instrument]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            to_move: Player::X,
            status: GameStatus::InProgress,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the player to move next.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Returns the game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Applies a validated move and returns the resulting status.
    ///
    /// # Errors
    ///
    /// Returns `MoveError::GameOver` if the game already ended,
    /// `MoveError::WrongPlayer` if it is not the moving player's turn, and
    /// `MoveError::SquareOccupied` if the target square is not empty.
    #[instrument(skip(self), fields(position = ?mov.position, player = ?mov.player))]
    pub fn make_move(&mut self, mov: Move) -> Result<GameStatus, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if mov.player != self.to_move {
            return Err(MoveError::WrongPlayer(mov.player));
        }
        if !self.board.is_empty(mov.position) {
            return Err(MoveError::SquareOccupied(mov.position));
        }

        self.board.set(mov.position, Square::Occupied(mov.player));
        self.to_move = mov.player.opponent();
        self.status = rules::status(&self.board);
        Ok(self.status)
    }

    /// Resets the game to an empty board with X to move.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.board = Board::new();
        self.to_move = Player::X;
        self.status = GameStatus::InProgress;
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
