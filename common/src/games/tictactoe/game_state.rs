use super::board::Board;
use super::error::PlaceError;
use super::types::{GameStatus, Mark, WinningLine};
use super::win_detector::{is_draw, winner, winning_line};

/// Board plus the mark to move. Every move produces a new value; nothing
/// flips the turn behind the caller's back.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    turn: Mark,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Mark::X,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Mark {
        self.turn
    }

    /// Places the mark to move at `index` and hands the turn over.
    pub fn place(self, index: usize) -> Result<GameState, PlaceError> {
        if self.status().is_over() {
            return Err(PlaceError::GameOver);
        }

        let mut board = self.board;
        board.set_cell(index, self.turn)?;

        Ok(Self {
            board,
            turn: self.turn.opponent().unwrap_or(Mark::X),
        })
    }

    pub fn clear(self) -> GameState {
        Self::new()
    }

    pub fn status(&self) -> GameStatus {
        match winner(&self.board) {
            Mark::X => GameStatus::XWon,
            Mark::O => GameStatus::OWon,
            Mark::Empty if is_draw(&self.board) => GameStatus::Draw,
            Mark::Empty => GameStatus::InProgress,
        }
    }

    pub fn winning_line(&self) -> Option<WinningLine> {
        winning_line(&self.board)
    }
}
