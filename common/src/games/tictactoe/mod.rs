mod board;
mod bot_controller;
mod difficulty;
mod error;
mod game_state;
mod move_rng;
mod patterns;
mod session;
mod settings;
mod types;
mod win_detector;

pub use board::Board;
pub use bot_controller::{BotInput, calculate_move, choose_best};
pub use difficulty::{Difficulty, DifficultyLevel};
pub use error::PlaceError;
pub use game_state::GameState;
pub use move_rng::MoveRng;
pub use patterns::{Pattern, matches};
pub use session::TicTacToeSession;
pub use settings::TicTacToeSessionSettings;
pub use types::{
    CELL_COUNT, CENTER, CORNERS, EDGES, FirstPlayerMode, GameStatus, Mark, MatchStatus, Position,
    WinningLine,
};
pub use win_detector::{WIN_LINES, is_draw, is_full, is_terminal, winner, winning_line};

/// Entry point for collaborators: the bot's move for `mark` on `board`, or
/// `None` when the board is already full or won.
pub fn choose_move<R: MoveRng>(
    board: &Board,
    mark: Mark,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<usize> {
    let input = BotInput {
        board: *board,
        current_mark: mark,
        difficulty,
    };
    calculate_move(&input, rng)
}
