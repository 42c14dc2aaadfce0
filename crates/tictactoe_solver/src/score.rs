//! Terminal outcome scoring.

use tictactoe_core::{GameStatus, Player};

/// Maps a game status to a score from `reference`'s perspective.
///
/// A win for `reference` scores +1, a win for the opponent -1, and a draw
/// scores 0. An in-progress status also maps to 0: the search never scores
/// non-terminal nodes directly, but the neutral mapping keeps the lookup
/// total. This is a pure lookup, not a search.
pub fn score_for(reference: Player, status: GameStatus) -> i32 {
    match status {
        GameStatus::Won(winner) => {
            if winner == reference {
                1
            } else {
                -1
            }
        }
        GameStatus::Draw | GameStatus::InProgress => 0,
    }
}
