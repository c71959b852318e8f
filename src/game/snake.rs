use ratatui::layout::Position;
use std::collections::VecDeque;

/// Snake state.  Snate.
///
/// All positions are relative to the top-left corner of the grid.  The
/// head is the first cell and the tail the last; no cell appears twice
/// while the snake is alive.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    pub(super) cells: VecDeque<Position>,
}

impl Snake {
    /// Create a single-cell snake at `head`
    pub(crate) fn new(head: Position) -> Snake {
        Snake {
            cells: VecDeque::from([head]),
        }
    }

    pub(crate) fn head(&self) -> Position {
        // A snake always has at least one cell.
        self.cells.front().copied().unwrap_or(Position::ORIGIN)
    }

    pub(crate) fn len(&self) -> usize {
        self.cells.len()
    }

    /// Iterate over the cells from head to tail
    pub(crate) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.cells.iter().copied()
    }

    /// Does any part of the snake, tail included, occupy `pos`?
    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    /// Add a new head at `pos`.  The tail stays where it is.
    pub(super) fn push_head(&mut self, pos: Position) {
        self.cells.push_front(pos);
    }

    /// Remove the last cell of the tail, unless it is also the head
    pub(super) fn drop_tail(&mut self) {
        if self.cells.len() > 1 {
            let _ = self.cells.pop_back();
        }
    }
}

#[cfg(test)]
impl FromIterator<Position> for Snake {
    fn from_iter<I: IntoIterator<Item = Position>>(iter: I) -> Snake {
        Snake {
            cells: iter.into_iter().collect(),
        }
    }
}
