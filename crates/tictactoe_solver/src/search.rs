//! Minimax search with alpha-beta pruning and the move-selection driver.

use serde::Serialize;
use tictactoe_core::{Board, Player, Position, Square, rules};
use tracing::{debug, instrument};

use crate::score::score_for;

/// Alpha-beta window sentinel, beyond any reachable score.
const INF: i32 = 999;

/// Exact solver for one side of the game.
///
/// The solver is stateless apart from the side it plays for: every call
/// recomputes the full remaining game tree (at most 9 plies), so there is
/// nothing to cache or invalidate between positions.
#[derive(Debug, Clone, Copy)]
pub struct Solver {
    side: Player,
}

/// A chosen move together with the solver's win-probability estimate.
///
/// The probability is the fraction of immediately available moves that
/// lead to a won or drawn position under optimal play, with draws weighted
/// at half value. It is a breadth-of-good-options signal for display, not
/// the true outcome probability of the position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Decision {
    /// The selected position.
    pub position: Position,
    /// Win-probability estimate in `[0.0, 1.0]`.
    pub probability: f64,
}

/// Error that can occur when asking the solver for a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SolveError {
    /// The board has no empty square to move to.
    #[display("No available moves on the board")]
    NoAvailableMoves,
}

impl std::error::Error for SolveError {}

impl Solver {
    /// Creates a solver playing for the given side.
    pub fn new(side: Player) -> Self {
        Self { side }
    }

    /// Returns the side this solver plays for.
    pub fn side(&self) -> Player {
        self.side
    }

    /// Scores every available move of the solver's side on `board`.
    ///
    /// Each candidate is applied provisionally, evaluated by exhaustive
    /// minimax with the opponent to move, and retracted. Results are in
    /// ascending position-index order. The passed board is left untouched;
    /// exploration happens on an internal copy.
    #[instrument(skip(self, board), fields(side = ?self.side))]
    pub fn score_moves(&self, board: &Board) -> Vec<(Position, i32)> {
        let mut work = board.clone();
        Position::valid_moves(board)
            .into_iter()
            .map(|pos| {
                work.set(pos, Square::Occupied(self.side));
                let (score, _) = self.search(&mut work, self.side.opponent(), false, -INF, INF);
                work.set(pos, Square::Empty);
                (pos, score)
            })
            .collect()
    }

    /// Chooses the best move for the solver's side and estimates a win
    /// probability from the set of candidate outcomes.
    ///
    /// Ties are broken by the first candidate in ascending index order
    /// reaching the best score.
    ///
    /// # Errors
    ///
    /// Returns [`SolveError::NoAvailableMoves`] if the board has no empty
    /// square; callers must not ask for a move in a terminal position.
    #[instrument(skip(self, board), fields(side = ?self.side))]
    pub fn choose_move(&self, board: &Board) -> Result<Decision, SolveError> {
        let scored = self.score_moves(board);
        if scored.is_empty() {
            return Err(SolveError::NoAvailableMoves);
        }

        let total = scored.len();
        let wins = scored.iter().filter(|(_, score)| *score == 1).count();
        let draws = scored.iter().filter(|(_, score)| *score == 0).count();
        let probability = (wins as f64 + 0.5 * draws as f64) / total as f64;

        let mut best = scored[0];
        for &(position, score) in &scored[1..] {
            if score > best.1 {
                best = (position, score);
            }
        }

        debug!(
            position = ?best.0,
            score = best.1,
            probability,
            candidates = total,
            "move selected"
        );
        Ok(Decision {
            position: best.0,
            probability,
        })
    }

    /// Recursive minimax with alpha-beta pruning.
    ///
    /// Returns the exact value of `board` with `to_move` to play, scored
    /// from the solver side's perspective, plus the move achieving it at
    /// non-terminal nodes. Candidate moves are explored in ascending index
    /// order; ties keep the first move found. Every provisional mutation
    /// is retracted before the next sibling is examined, including on the
    /// pruning exit.
    fn search(
        &self,
        board: &mut Board,
        to_move: Player,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> (i32, Option<Position>) {
        let status = rules::status(board);
        if status.is_terminal() {
            return (score_for(self.side, status), None);
        }

        let mut best_move = None;
        if maximizing {
            let mut best = -INF;
            for pos in Position::valid_moves(board) {
                board.set(pos, Square::Occupied(to_move));
                let (value, _) = self.search(board, to_move.opponent(), false, alpha, beta);
                board.set(pos, Square::Empty);
                if value > best {
                    best = value;
                    best_move = Some(pos);
                }
                alpha = alpha.max(value);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_move)
        } else {
            let mut best = INF;
            for pos in Position::valid_moves(board) {
                board.set(pos, Square::Occupied(to_move));
                let (value, _) = self.search(board, to_move.opponent(), true, alpha, beta);
                board.set(pos, Square::Empty);
                if value < best {
                    best = value;
                    best_move = Some(pos);
                }
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
            (best, best_move)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Unpruned minimax with the same tie-break rules as `search`.
    /// Reference implementation for the pruning-equivalence check.
    fn plain_minimax(
        solver_side: Player,
        board: &mut Board,
        to_move: Player,
        maximizing: bool,
    ) -> (i32, Option<Position>) {
        let status = rules::status(board);
        if status.is_terminal() {
            return (score_for(solver_side, status), None);
        }

        let mut best = if maximizing { -INF } else { INF };
        let mut best_move = None;
        for pos in Position::valid_moves(board) {
            board.set(pos, Square::Occupied(to_move));
            let (value, _) = plain_minimax(solver_side, board, to_move.opponent(), !maximizing);
            board.set(pos, Square::Empty);
            let improves = if maximizing { value > best } else { value < best };
            if improves {
                best = value;
                best_move = Some(pos);
            }
        }
        (best, best_move)
    }

    #[test]
    fn test_takes_immediate_win() {
        // X X . / O O . / . . .  with X to move: completing the top row
        // wins outright. Of the five candidates, only that one wins; the
        // block at 5 draws and the rest lose to O's reply at 5.
        let board: Board = "XX.OO....".parse().unwrap();
        let decision = Solver::new(Player::X).choose_move(&board).unwrap();
        assert_eq!(decision.position, Position::TopRight);
        assert_eq!(decision.probability, (1.0 + 0.5 * 1.0) / 5.0);
    }

    #[test]
    fn test_blocks_immediate_threat() {
        // O O . / . X . / . . X  with X to move: every move except the
        // block at 2 loses to O completing the top row. The block also
        // forks via 2-4-6 and 2-5-8, so it scores a forced win.
        let board: Board = "OO..X...X".parse().unwrap();
        let scored = Solver::new(Player::X).score_moves(&board);
        let expected = [(2, 1), (3, -1), (5, -1), (6, -1), (7, -1)];
        let scored_indices: Vec<_> = scored
            .iter()
            .map(|(pos, score)| (pos.to_index(), *score))
            .collect();
        assert_eq!(scored_indices, expected);

        let decision = Solver::new(Player::X).choose_move(&board).unwrap();
        assert_eq!(decision.position, Position::TopRight);
        assert!(decision.probability < 1.0);
    }

    #[test]
    fn test_empty_board_probability() {
        // Every opening move leads to a draw under optimal play, so the
        // aggregate is exactly half: nine draws at half weight each.
        let board = Board::new();
        let decision = Solver::new(Player::X).choose_move(&board).unwrap();
        assert_eq!(decision.probability, (0.5 * 9.0) / 9.0);
        // All nine candidates tie at zero; the first one is reported.
        assert_eq!(decision.position, Position::TopLeft);
    }

    #[test]
    fn test_full_board_is_an_error() {
        let board: Board = "XOXOXXOXO".parse().unwrap();
        assert_eq!(
            Solver::new(Player::X).choose_move(&board),
            Err(SolveError::NoAvailableMoves)
        );
    }

    #[test]
    fn test_search_reports_winning_move() {
        let mut board: Board = "XX.OO....".parse().unwrap();
        let solver = Solver::new(Player::X);
        let (value, best) = solver.search(&mut board, Player::X, true, -INF, INF);
        assert_eq!(value, 1);
        assert_eq!(best, Some(Position::TopRight));
    }

    #[test]
    fn test_choose_move_is_idempotent_and_restores_board() {
        let board: Board = "X...O....".parse().unwrap();
        let snapshot = board.clone();
        let solver = Solver::new(Player::X);

        let first = solver.choose_move(&board).unwrap();
        assert_eq!(board, snapshot);
        let second = solver.choose_move(&board).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_search_restores_board() {
        let mut board: Board = "X.X.O....".parse().unwrap();
        let snapshot = board.clone();
        let solver = Solver::new(Player::O);
        let first = solver.search(&mut board, Player::O, true, -INF, INF);
        assert_eq!(board, snapshot);
        let second = solver.search(&mut board, Player::O, true, -INF, INF);
        assert_eq!(first, second);
    }

    /// Alpha-beta with the full window must agree with unpruned minimax in
    /// both value and reported move, on every position reachable within
    /// the first three plies.
    #[test]
    fn test_pruning_equivalence_with_plain_minimax() {
        fn check(board: &mut Board, to_move: Player, depth: usize, checked: &mut usize) {
            let solver = Solver::new(Player::X);
            let maximizing = to_move == Player::X;
            let pruned = solver.search(board, to_move, maximizing, -INF, INF);
            let plain = plain_minimax(Player::X, board, to_move, maximizing);
            assert_eq!(pruned, plain, "divergence at {}", board.label());
            *checked += 1;

            if depth == 0 || rules::status(board).is_terminal() {
                return;
            }
            for pos in Position::valid_moves(board) {
                board.set(pos, Square::Occupied(to_move));
                check(board, to_move.opponent(), depth - 1, checked);
                board.set(pos, Square::Empty);
            }
        }

        let mut board = Board::new();
        let mut checked = 0;
        check(&mut board, Player::X, 3, &mut checked);
        assert_eq!(checked, 1 + 9 + 9 * 8 + 9 * 8 * 7);
    }
}
