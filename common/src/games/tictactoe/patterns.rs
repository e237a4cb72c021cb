use super::board::Board;
use super::types::Mark;
use super::win_detector::WIN_LINES;

/// Marks required in the three cells of a line, read starting at the
/// candidate cell and continuing cyclically through the line.
pub type Pattern = [Mark; 3];

pub fn completing(mark: Mark) -> Pattern {
    [Mark::Empty, mark, mark]
}

pub fn extending(mark: Mark) -> [Pattern; 2] {
    [
        [Mark::Empty, Mark::Empty, mark],
        [Mark::Empty, mark, Mark::Empty],
    ]
}

pub const OPENING: Pattern = [Mark::Empty, Mark::Empty, Mark::Empty];

/// Collects every candidate that fits `pattern` on some win line through it.
///
/// A candidate is reported once per matching line, so a cell sitting on
/// three open lines appears three times. Callers drawing uniformly from the
/// result rely on that weighting. Order is candidate order, then line order.
pub fn matches(board: &Board, candidates: &[usize], pattern: &Pattern) -> Vec<usize> {
    let mut result = Vec::new();

    for &candidate in candidates {
        for line in WIN_LINES.iter() {
            for slot in 0..3 {
                if line[slot] != candidate {
                    continue;
                }

                let rotated = [line[slot], line[(slot + 1) % 3], line[(slot + 2) % 3]];
                if rotated
                    .iter()
                    .zip(pattern.iter())
                    .all(|(&index, &required)| board[index] == required)
                {
                    result.push(candidate);
                }
            }
        }
    }

    result
}
