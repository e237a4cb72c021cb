use super::board::Board;
use super::types::{Mark, WinningLine};

/// Rows, then columns, then the two diagonals.
pub const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the completed line, if any. When several lines are complete the
/// last one in `WIN_LINES` order is reported.
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    WIN_LINES
        .iter()
        .filter_map(|&line| {
            let mark = board[line[0]];
            if mark != Mark::Empty && board[line[1]] == mark && board[line[2]] == mark {
                Some(WinningLine::new(mark, line))
            } else {
                None
            }
        })
        .last()
}

pub fn winner(board: &Board) -> Mark {
    winning_line(board).map_or(Mark::Empty, |line| line.mark)
}

pub fn is_full(board: &Board) -> bool {
    board.is_full()
}

pub fn is_terminal(board: &Board) -> bool {
    is_full(board) || winner(board) != Mark::Empty
}

pub fn is_draw(board: &Board) -> bool {
    is_full(board) && winner(board) == Mark::Empty
}
