use core::ops::Index;
use serde::{Deserialize, Serialize};

use crate::*;

/// Every line that wins a round, in the order they are checked.
pub const WINNING_LINES: [Line; 8] = [
    // rows
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // columns
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // diagonals
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoundStatus {
    InProgress,
    Won { winner: Player, line: Line },
    Draw,
}

impl RoundStatus {
    pub const fn is_finished(self) -> bool {
        !matches!(self, Self::InProgress)
    }
}

/// Immutable snapshot of the 3×3 grid.
///
/// Moves never touch a board in place, [`Board::with_mark`] hands back the next snapshot instead.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; CELL_COUNT],
}

impl Board {
    pub fn validate_index(&self, index: CellIndex) -> Result<CellIndex> {
        if usize::from(index) < CELL_COUNT {
            Ok(index)
        } else {
            Err(GameError::InvalidIndex)
        }
    }

    pub fn cell_at(&self, index: CellIndex) -> Result<Cell> {
        self.validate_index(index).map(|index| self[index])
    }

    /// Returns a copy of this board with `player` placed at `index`.
    ///
    /// The caller is responsible for checking that the cell is empty.
    pub fn with_mark(&self, index: CellIndex, player: Player) -> Result<Self> {
        let index = self.validate_index(index)?;
        let mut cells = self.cells;
        cells[usize::from(index)] = Cell::Taken(player);
        Ok(Self { cells })
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|cell| cell.is_empty())
    }

    pub fn is_full(&self) -> bool {
        !self.cells.iter().any(|cell| cell.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, Cell)> + '_ {
        (0..).zip(self.cells.iter().copied())
    }

    /// First winning line in [`WINNING_LINES`] order, with its owner.
    pub fn winning_line(&self) -> Option<(Player, Line)> {
        WINNING_LINES.iter().find_map(|&line| {
            let [a, b, c] = line.map(|index| self[index].owner());
            match (a, b, c) {
                (Some(a), Some(b), Some(c)) if a == b && b == c => Some((a, line)),
                _ => None,
            }
        })
    }

    pub fn status(&self) -> RoundStatus {
        if let Some((winner, line)) = self.winning_line() {
            RoundStatus::Won { winner, line }
        } else if self.is_full() {
            RoundStatus::Draw
        } else {
            RoundStatus::InProgress
        }
    }
}

impl Index<CellIndex> for Board {
    type Output = Cell;

    fn index(&self, index: CellIndex) -> &Self::Output {
        &self.cells[usize::from(index)]
    }
}
