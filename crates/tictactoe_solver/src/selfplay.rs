//! Perfect-vs-perfect self-play driver.
//!
//! Plays two solvers against each other from the empty board. Used by the
//! analysis CLI and by the optimality tests: with both sides playing
//! exactly, tic-tac-toe is a draw, and a solver that can lose such a game
//! is broken.

use tictactoe_core::{Board, GameStatus, Player, Position, Square, rules};
use tracing::instrument;

use crate::search::{SolveError, Solver};

/// One applied move of a playout, with the probability reported for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayedMove {
    /// The side that moved.
    pub player: Player,
    /// The position played.
    pub position: Position,
    /// The win probability the mover reported for its own position.
    pub probability: f64,
}

/// A completed self-play game.
#[derive(Debug, Clone)]
pub struct Playout {
    /// The moves in the order they were applied.
    pub moves: Vec<PlayedMove>,
    /// The terminal status of the game.
    pub status: GameStatus,
    /// The final board.
    pub board: Board,
}

/// Plays `x` against `o` from the empty board to a terminal status.
///
/// `x` moves first. Each solver is consulted only on its own turn, so the
/// two arguments are expected to be an X-side and an O-side solver.
///
/// # Errors
///
/// Propagates [`SolveError`] from the solvers; this cannot happen from the
/// empty board because a move is only requested in non-terminal positions.
#[instrument(skip(x, o))]
pub fn play_out(x: &Solver, o: &Solver) -> Result<Playout, SolveError> {
    let mut board = Board::new();
    let mut to_move = Player::X;
    let mut moves = Vec::new();

    loop {
        let status = rules::status(&board);
        if status.is_terminal() {
            return Ok(Playout {
                moves,
                status,
                board,
            });
        }

        let solver = match to_move {
            Player::X => x,
            Player::O => o,
        };
        let decision = solver.choose_move(&board)?;
        board.set(decision.position, Square::Occupied(to_move));
        moves.push(PlayedMove {
            player: to_move,
            position: decision.position,
            probability: decision.probability,
        });
        to_move = to_move.opponent();
    }
}
