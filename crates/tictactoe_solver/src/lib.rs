//! Exact minimax solver for tic-tac-toe.
//!
//! Given any legal board position, the solver computes the game-theoretic
//! value of every available move by exhaustive minimax search with
//! alpha-beta pruning, selects the best move for its side, and derives a
//! win-probability estimate from the set of candidate outcomes.
//!
//! The search is exact: it always recurses to true terminal states and
//! never scores a non-terminal leaf heuristically. Pruning only skips
//! branches that cannot change the result.
//!
//! # Example
//!
//! ```
//! use tictactoe_core::{Board, Player};
//! use tictactoe_solver::Solver;
//!
//! let board: Board = "XX.OO....".parse()?;
//! let decision = Solver::new(Player::X).choose_move(&board)?;
//! // Completing the top row wins outright.
//! assert_eq!(decision.position.to_index(), 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod score;
mod search;
pub mod selfplay;

pub use score::score_for;
pub use search::{Decision, SolveError, Solver};
