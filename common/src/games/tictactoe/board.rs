use std::fmt;

use super::error::PlaceError;
use super::types::{BOARD_SIZE, CELL_COUNT, Mark};

/// The nine cells of a 3x3 board, indexed row by row:
///
/// ```text
/// 0 1 2
/// 3 4 5
/// 6 7 8
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [Mark; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Mark; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn get_cell(&self, index: usize) -> Result<Mark, PlaceError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(PlaceError::InvalidPosition(index))
    }

    /// Writes `mark` into an empty cell. Occupied cells are never overwritten.
    pub fn set_cell(&mut self, index: usize, mark: Mark) -> Result<(), PlaceError> {
        if mark == Mark::Empty {
            return Err(PlaceError::EmptyMark);
        }
        match self.get_cell(index)? {
            Mark::Empty => {
                self.cells[index] = mark;
                Ok(())
            }
            _ => Err(PlaceError::CellOccupied(index)),
        }
    }

    pub fn clear(&mut self) {
        self.cells = [Mark::Empty; CELL_COUNT];
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| cell == Mark::Empty)
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|&cell| cell != Mark::Empty)
    }

    pub fn count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&cell| cell == mark).count()
    }

    pub fn available_moves(&self) -> Vec<usize> {
        self.empty_among(0..CELL_COUNT)
    }

    /// Keeps the empty cells of `indices`, preserving their order.
    pub fn empty_among(&self, indices: impl IntoIterator<Item = usize>) -> Vec<usize> {
        indices
            .into_iter()
            .filter(|&index| self.cells.get(index) == Some(&Mark::Empty))
            .collect()
    }
}

impl std::ops::Index<usize> for Board {
    type Output = Mark;

    fn index(&self, index: usize) -> &Mark {
        &self.cells[index]
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.cells.chunks(BOARD_SIZE).enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            let line: Vec<String> = row.iter().map(Mark::to_string).collect();
            write!(f, "{}", line.join(" "))?;
        }
        Ok(())
    }
}
