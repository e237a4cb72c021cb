use tictactoe_common::games::tictactoe::{Board, CELL_COUNT, Mark, Position, WinningLine};

#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Place(usize),
    Restart,
    Quit,
    Help,
}

/// Accepts a cell number `1`-`9`, a `row col` pair (both `1`-`3`), or one
/// of `restart`, `quit`, `help`.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    match line.to_ascii_lowercase().as_str() {
        "q" | "quit" | "exit" => return Ok(Command::Quit),
        "r" | "restart" => return Ok(Command::Restart),
        "h" | "help" | "?" => return Ok(Command::Help),
        _ => {}
    }

    let numbers: Vec<usize> = line
        .split([' ', ',', '\t'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<usize>()
                .map_err(|_| format!("'{}' is not a number", part))
        })
        .collect::<Result<_, _>>()?;

    match numbers.as_slice() {
        [cell] if (1..=CELL_COUNT).contains(cell) => Ok(Command::Place(cell - 1)),
        [row, col] if (1..=3).contains(row) && (1..=3).contains(col) => {
            Ok(Command::Place(Position::new(col - 1, row - 1).index()))
        }
        _ => Err(format!(
            "Expected a cell 1-{} or 'row col' with values 1-3",
            CELL_COUNT
        )),
    }
}

/// Draws the board with free cells numbered, highlighting a winning line
/// with brackets.
pub fn render_board(board: &Board, winning_line: Option<WinningLine>) -> String {
    let highlighted = |index: usize| winning_line.is_some_and(|line| line.cells.contains(&index));

    let rows: Vec<String> = (0..3)
        .map(|y| {
            let cells: Vec<String> = (0..3)
                .map(|x| {
                    let index = Position::new(x, y).index();
                    match board[index] {
                        Mark::Empty => format!(" {} ", index + 1),
                        mark if highlighted(index) => format!("[{}]", mark),
                        mark => format!(" {} ", mark),
                    }
                })
                .collect();
            cells.join("|")
        })
        .collect();

    rows.join("\n---+---+---\n")
}

/// Names the ends of a winning line in 1-based `row col` form.
pub fn describe_winning_line(line: &WinningLine) -> String {
    let (start, end) = (line.start(), line.end());
    format!(
        "Three in a row for {}: {} {} to {} {}.",
        line.mark,
        start.y + 1,
        start.x + 1,
        end.y + 1,
        end.x + 1
    )
}

pub const HELP: &str = "Enter a cell number 1-9 (left to right, top to bottom) or 'row col'.\n\
Commands: restart, quit, help.";
