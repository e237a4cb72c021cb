use super::board::Board;
use super::difficulty::Difficulty;
use super::move_rng::MoveRng;
use super::patterns::{OPENING, completing, extending, matches};
use super::types::{CENTER, CORNERS, EDGES, Mark};
use super::win_detector::is_terminal;

pub struct BotInput {
    pub board: Board,
    pub current_mark: Mark,
    pub difficulty: Difficulty,
}

/// Picks a cell for `input.current_mark`, or `None` when the board is
/// already decided.
///
/// Stages run in a fixed order and the first one producing a cell wins:
/// complete an own line, block the opponent's line, open in a corner on an
/// empty board, set up a fork, break the opponent's fork, take the center,
/// a corner, an edge. Blocking and fork breaking are each behind their own
/// difficulty gate.
pub fn calculate_move<R: MoveRng>(input: &BotInput, rng: &mut R) -> Option<usize> {
    let board = &input.board;
    let bot_mark = input.current_mark;
    let opponent_mark = bot_mark.opponent()?;

    if is_terminal(board) {
        return None;
    }

    if let Some(index) = find_winning_move(board, bot_mark) {
        return Some(index);
    }

    if input.difficulty.gate(rng)
        && let Some(index) = find_winning_move(board, opponent_mark)
    {
        return Some(index);
    }

    if board.is_empty()
        && rng.coin()
        && let Some(index) = find_corner_move(board, bot_mark, rng)
    {
        return Some(index);
    }

    if let Some(index) = find_fork_move(board, bot_mark) {
        return Some(index);
    }

    if input.difficulty.gate(rng)
        && let Some(index) = find_fork_block_move(board, bot_mark, rng)
    {
        return Some(index);
    }

    if board[CENTER] == Mark::Empty {
        return Some(CENTER);
    }

    if let Some(index) = find_corner_move(board, bot_mark, rng) {
        return Some(index);
    }

    find_edge_move(board, bot_mark, rng)
}

fn find_winning_move(board: &Board, mark: Mark) -> Option<usize> {
    matches(board, &board.available_moves(), &completing(mark))
        .first()
        .copied()
}

fn find_corner_move<R: MoveRng>(board: &Board, mark: Mark, rng: &mut R) -> Option<usize> {
    choose_best(board, mark, &board.empty_among(CORNERS), rng)
}

fn find_edge_move<R: MoveRng>(board: &Board, mark: Mark, rng: &mut R) -> Option<usize> {
    choose_best(board, mark, &board.empty_among(EDGES), rng)
}

/// Weighted pick among `candidates`: prefer cells that line up with one of
/// our marks, then cells opening a fresh line, then anything. Within a tier
/// each candidate counts once per qualifying line.
pub fn choose_best<R: MoveRng>(
    board: &Board,
    mark: Mark,
    candidates: &[usize],
    rng: &mut R,
) -> Option<usize> {
    match candidates {
        [] => return None,
        [only] => return Some(*only),
        _ => {}
    }

    let extending_moves: Vec<usize> = extending(mark)
        .iter()
        .flat_map(|pattern| matches(board, candidates, pattern))
        .collect();
    if !extending_moves.is_empty() {
        return Some(extending_moves[rng.pick(extending_moves.len())]);
    }

    let opening_moves = matches(board, candidates, &OPENING);
    if !opening_moves.is_empty() {
        return Some(opening_moves[rng.pick(opening_moves.len())]);
    }

    Some(candidates[rng.pick(candidates.len())])
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ForkReply {
    Cell(usize),
    BestEdge,
}

/// A fixed arrangement: cells held by the mover, cells held by the
/// opponent, cells that must be empty, and what to play when it fits.
struct ForkShape {
    own: &'static [usize],
    opponent: &'static [usize],
    empty: &'static [usize],
    reply: ForkReply,
}

impl ForkShape {
    fn fits(&self, board: &Board, mark: Mark, opponent_mark: Mark) -> bool {
        self.own.iter().all(|&index| board[index] == mark)
            && self.opponent.iter().all(|&index| board[index] == opponent_mark)
            && self.empty.iter().all(|&index| board[index] == Mark::Empty)
    }
}

const fn shape(
    own: &'static [usize],
    opponent: &'static [usize],
    empty: &'static [usize],
    reply: ForkReply,
) -> ForkShape {
    ForkShape {
        own,
        opponent,
        empty,
        reply,
    }
}

/// Opponent took the center against our corner: the opposite corner sets
/// up two lines at once.
const FORK_SHAPES: [ForkShape; 4] = [
    shape(&[0], &[CENTER], &[1, 2, 3, 5, 6, 7, 8], ForkReply::Cell(8)),
    shape(&[2], &[CENTER], &[0, 1, 3, 5, 6, 7, 8], ForkReply::Cell(6)),
    shape(&[6], &[CENTER], &[0, 1, 2, 3, 5, 7, 8], ForkReply::Cell(2)),
    shape(&[8], &[CENTER], &[0, 1, 2, 3, 5, 6, 7], ForkReply::Cell(0)),
];

/// We hold the center and the opponent is one move from a fork. Checked
/// top to bottom; the first fit decides.
const FORK_BLOCK_SHAPES: [ForkShape; 10] = [
    // Opposite corners: answer on an edge.
    shape(&[CENTER], &[0, 8], &[1, 2, 3, 5, 6, 7], ForkReply::BestEdge),
    shape(&[CENTER], &[2, 6], &[0, 1, 3, 5, 7, 8], ForkReply::BestEdge),
    // Two adjacent edges around an empty corner ring.
    shape(&[CENTER], &[1, 5], &[0, 2, 3, 6, 7, 8], ForkReply::Cell(2)),
    shape(&[CENTER], &[5, 7], &[0, 1, 2, 3, 6, 8], ForkReply::Cell(8)),
    shape(&[CENTER], &[3, 7], &[0, 1, 2, 5, 6, 8], ForkReply::Cell(6)),
    shape(&[CENTER], &[1, 3], &[0, 2, 5, 6, 7, 8], ForkReply::Cell(0)),
    // A corner plus the far edge.
    shape(&[CENTER], &[0, 5], &[1, 2, 3, 6, 7, 8], ForkReply::Cell(2)),
    shape(&[CENTER], &[2, 7], &[0, 1, 3, 5, 6, 8], ForkReply::Cell(8)),
    shape(&[CENTER], &[3, 8], &[0, 1, 2, 5, 6, 7], ForkReply::Cell(6)),
    shape(&[CENTER], &[1, 6], &[0, 2, 3, 5, 7, 8], ForkReply::Cell(0)),
];

fn find_fork_move(board: &Board, mark: Mark) -> Option<usize> {
    let opponent_mark = mark.opponent()?;
    FORK_SHAPES
        .iter()
        .find(|shape| shape.fits(board, mark, opponent_mark))
        .and_then(|shape| match shape.reply {
            ForkReply::Cell(index) => Some(index),
            ForkReply::BestEdge => None,
        })
}

fn find_fork_block_move<R: MoveRng>(board: &Board, mark: Mark, rng: &mut R) -> Option<usize> {
    let opponent_mark = mark.opponent()?;
    let shape = FORK_BLOCK_SHAPES
        .iter()
        .find(|shape| shape.fits(board, mark, opponent_mark))?;

    match shape.reply {
        ForkReply::Cell(index) => Some(index),
        ForkReply::BestEdge => find_edge_move(board, mark, rng),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::SessionRng;
    use crate::games::tictactoe::move_rng::scripted::ScriptedRng;
    use crate::games::tictactoe::types::CELL_COUNT;
    use crate::games::tictactoe::win_detector::winner;

    const E: Mark = Mark::Empty;
    const X: Mark = Mark::X;
    const O: Mark = Mark::O;

    fn input(cells: [Mark; CELL_COUNT], current_mark: Mark, difficulty: i32) -> BotInput {
        BotInput {
            board: Board::from_cells(cells),
            current_mark,
            difficulty: Difficulty::new(difficulty),
        }
    }

    fn all_boards() -> impl Iterator<Item = Board> {
        (0..3usize.pow(CELL_COUNT as u32)).map(|code| {
            let mut cells = [E; CELL_COUNT];
            let mut rest = code;
            for cell in cells.iter_mut() {
                *cell = [E, X, O][rest % 3];
                rest /= 3;
            }
            Board::from_cells(cells)
        })
    }

    /// Reachable positions that are still in play, with the side to move.
    fn playable_boards() -> Vec<(Board, Mark)> {
        all_boards()
            .filter(|board| !is_terminal(board))
            .filter_map(|board| {
                let (xs, os) = (board.count(X), board.count(O));
                if xs == os {
                    Some((board, X))
                } else if xs == os + 1 {
                    Some((board, O))
                } else {
                    None
                }
            })
            .collect()
    }

    fn winning_cells(board: &Board, mark: Mark) -> Vec<usize> {
        board
            .available_moves()
            .into_iter()
            .filter(|&index| {
                let mut next = *board;
                next.set_cell(index, mark).is_ok() && winner(&next) == mark
            })
            .collect()
    }

    #[test]
    fn test_completes_top_row() {
        let input = input([X, X, E, E, E, E, E, E, E], X, 10);
        let mut rng = SessionRng::new(42);
        assert_eq!(calculate_move(&input, &mut rng), Some(2));
    }

    #[test]
    fn test_never_misses_a_win() {
        let mut rng = SessionRng::new(42);
        for difficulty in [0, 5, 10] {
            for (board, mark) in playable_boards() {
                let wins = winning_cells(&board, mark);
                if wins.is_empty() {
                    continue;
                }
                let input = BotInput {
                    board,
                    current_mark: mark,
                    difficulty: Difficulty::new(difficulty),
                };
                let chosen = calculate_move(&input, &mut rng);
                assert!(
                    chosen.is_some_and(|index| wins.contains(&index)),
                    "missed win on\n{}\nchose {:?}",
                    board,
                    chosen
                );
            }
        }
    }

    #[test]
    fn test_always_blocks_at_strongest() {
        let mut rng = SessionRng::new(42);
        for (board, mark) in playable_boards() {
            let Some(opponent) = mark.opponent() else {
                continue;
            };
            let threats = winning_cells(&board, opponent);
            if threats.is_empty() || !winning_cells(&board, mark).is_empty() {
                continue;
            }
            let input = BotInput {
                board,
                current_mark: mark,
                difficulty: Difficulty::STRONGEST,
            };
            let chosen = calculate_move(&input, &mut rng);
            assert!(
                chosen.is_some_and(|index| threats.contains(&index)),
                "missed block on\n{}\nchose {:?}",
                board,
                chosen
            );
        }
    }

    #[test]
    fn test_terminal_boards_have_no_move() {
        let mut rng = SessionRng::new(42);
        for board in all_boards().filter(is_terminal) {
            for mark in [X, O] {
                let input = BotInput {
                    board,
                    current_mark: mark,
                    difficulty: Difficulty::STRONGEST,
                };
                assert_eq!(calculate_move(&input, &mut rng), None);
            }
        }
    }

    #[test]
    fn test_drawn_board_has_no_move() {
        let input = input([X, O, X, X, O, O, O, X, O], X, 0);
        let mut rng = SessionRng::new(42);
        assert_eq!(calculate_move(&input, &mut rng), None);
    }

    #[test]
    fn test_empty_mark_has_no_move() {
        let input = input([E; CELL_COUNT], E, 0);
        let mut rng = SessionRng::new(42);
        assert_eq!(calculate_move(&input, &mut rng), None);
    }

    #[test]
    fn test_moves_are_always_legal() {
        let mut rng = SessionRng::new(7);
        for difficulty in [0, 5, 10] {
            for (board, mark) in playable_boards() {
                let input = BotInput {
                    board,
                    current_mark: mark,
                    difficulty: Difficulty::new(difficulty),
                };
                let index = calculate_move(&input, &mut rng);
                assert!(index.is_some_and(|index| board[index] == E));
            }
        }
    }

    #[test]
    fn test_empty_board_opens_in_corner_on_heads() {
        let input = input([E; CELL_COUNT], X, 0);
        // Every corner sits on three open lines: [0,0,0,2,2,2,6,6,6,8,8,8].
        let mut rng = ScriptedRng::new().with_coins(&[true]).with_picks(&[4]);
        assert_eq!(calculate_move(&input, &mut rng), Some(2));
    }

    #[test]
    fn test_empty_board_takes_center_on_tails() {
        let input = input([E; CELL_COUNT], X, 0);
        let mut rng = ScriptedRng::new().with_coins(&[false]);
        assert_eq!(calculate_move(&input, &mut rng), Some(CENTER));
    }

    #[test]
    fn test_empty_board_opening_is_corner_or_center() {
        let input = input([E; CELL_COUNT], X, 10);
        for seed in 0..50 {
            let mut rng = SessionRng::new(seed);
            let index = calculate_move(&input, &mut rng);
            assert!(matches!(index, Some(0 | 2 | 4 | 6 | 8)));
        }
    }

    #[test]
    fn test_block_is_skipped_at_weakest() {
        let cells = [O, O, E, E, X, E, E, E, X];
        // Corner candidates weighted [2, 6, 6, 2]; pick 1 lands on 6.
        let mut rng = ScriptedRng::new().with_picks(&[1]);
        assert_eq!(calculate_move(&input(cells, X, 10), &mut rng), Some(6));

        let mut rng = ScriptedRng::new().with_picks(&[1]);
        assert_eq!(calculate_move(&input(cells, X, 0), &mut rng), Some(2));
    }

    #[test]
    fn test_block_follows_gate_draw() {
        let cells = [O, O, E, E, X, E, E, E, X];
        let mut rng = ScriptedRng::new().with_gate_draws(&[5]).with_picks(&[1]);
        assert_eq!(calculate_move(&input(cells, X, 5), &mut rng), Some(2));

        let mut rng = ScriptedRng::new().with_gate_draws(&[4, 4]).with_picks(&[1]);
        assert_eq!(calculate_move(&input(cells, X, 5), &mut rng), Some(6));
    }

    #[test]
    fn test_builds_fork_from_corner_against_center() {
        for (own, reply) in [(0, 8), (2, 6), (6, 2), (8, 0)] {
            let mut cells = [E; CELL_COUNT];
            cells[own] = X;
            cells[CENTER] = O;
            let mut rng = ScriptedRng::new();
            assert_eq!(calculate_move(&input(cells, X, 10), &mut rng), Some(reply));
        }
    }

    #[test]
    fn test_fork_build_needs_quiet_edges() {
        let cells = [X, E, E, E, O, E, E, E, E];
        assert_eq!(find_fork_move(&Board::from_cells(cells), X), Some(8));

        let cells = [X, E, E, E, O, E, E, X, E];
        assert_eq!(find_fork_move(&Board::from_cells(cells), X), None);
    }

    #[test]
    fn test_opposite_corners_answered_with_edge() {
        let cells = [X, E, E, E, O, E, E, E, X];
        for seed in 0..20 {
            let mut rng = SessionRng::new(seed);
            let index = calculate_move(&input(cells, O, 0), &mut rng);
            assert!(index.is_some_and(|index| EDGES.contains(&index)));
        }
    }

    #[test]
    fn test_opposite_corners_without_fork_block_takes_corner() {
        let cells = [E, E, X, E, O, E, X, E, E];
        let mut rng = ScriptedRng::new().default_gate_draw(0);
        let index = calculate_move(&input(cells, O, 10), &mut rng);
        assert!(matches!(index, Some(0 | 8)));
    }

    #[test]
    fn test_fork_block_shapes() {
        let cases = [
            ([E, X, E, E, O, X, E, E, E], 2),
            ([E, E, E, E, O, X, E, X, E], 8),
            ([E, E, E, X, O, E, E, X, E], 6),
            ([E, X, E, X, O, E, E, E, E], 0),
            ([X, E, E, E, O, X, E, E, E], 2),
            ([E, E, X, E, O, E, E, X, E], 8),
            ([E, E, E, X, O, E, E, E, X], 6),
            ([E, X, E, E, O, E, X, E, E], 0),
        ];
        for (cells, reply) in cases {
            let mut rng = ScriptedRng::new();
            assert_eq!(
                calculate_move(&input(cells, O, 0), &mut rng),
                Some(reply),
                "on\n{}",
                Board::from_cells(cells)
            );
        }
    }

    #[test]
    fn test_blocks_diagonal_fork_threat() {
        let cells = [X, E, E, E, X, E, E, E, O];
        for seed in 0..20 {
            let mut rng = SessionRng::new(seed);
            let index = calculate_move(&input(cells, O, 0), &mut rng);
            assert!(matches!(index, Some(2 | 6)));
        }
        let mut rng = ScriptedRng::new().with_picks(&[1]);
        assert_eq!(calculate_move(&input(cells, O, 0), &mut rng), Some(6));
    }

    #[test]
    fn test_takes_center_when_free() {
        let cells = [X, E, E, E, E, E, E, E, E];
        let mut rng = ScriptedRng::new().default_gate_draw(9);
        assert_eq!(calculate_move(&input(cells, O, 0), &mut rng), Some(CENTER));
    }

    #[test]
    fn test_falls_back_to_edges() {
        let cells = [O, E, X, E, X, E, O, E, O];
        let mut rng = ScriptedRng::new();
        let index = calculate_move(&input(cells, X, 10), &mut rng);
        assert!(index.is_some_and(|index| EDGES.contains(&index)));
    }

    #[test]
    fn test_choose_best_single_candidate_skips_draw() {
        let board = Board::new();
        let mut rng = ScriptedRng::new().with_picks(&[3]);
        assert_eq!(choose_best(&board, X, &[5], &mut rng), Some(5));
        assert_eq!(rng.pick(4), 3);
    }

    #[test]
    fn test_choose_best_no_candidates() {
        let mut rng = ScriptedRng::new();
        assert_eq!(choose_best(&Board::new(), X, &[], &mut rng), None);
    }

    #[test]
    fn test_choose_best_prefers_extending_lines() {
        let board = Board::from_cells([X, E, E, E, O, E, E, E, E]);
        // 2 and 6 both pair with X at 0; 8 only sees the O at 4.
        for pick in 0..4 {
            let mut rng = ScriptedRng::new().with_picks(&[pick]);
            let index = choose_best(&board, X, &[2, 6, 8], &mut rng);
            assert!(matches!(index, Some(2 | 6)));
        }
    }

    #[test]
    fn test_choose_best_falls_back_to_any_candidate() {
        // Neither edge shares a line with an X or an open line.
        let board = Board::from_cells([O, E, E, E, O, E, E, E, E]);
        let mut rng = ScriptedRng::new().with_picks(&[1]);
        assert_eq!(choose_best(&board, X, &[1, 3], &mut rng), Some(3));
    }
}
