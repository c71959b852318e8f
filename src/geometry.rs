//! Grid sizing derived from the viewport
use crate::consts;
use ratatui::layout::{Position, Positions, Rect, Size};

/// Cell size and grid dimensions for a given viewport width.
///
/// The canvas is square: `min(viewport_width - 40, 400)` pixels, but never
/// smaller than one pixel per grid division.  The cell size is the canvas
/// size divided by [`consts::GRID_DIVISIONS`], rounded down (and at least
/// one pixel), and the grid holds as many whole cells as fit in the canvas.
/// The canvas is then trimmed to exactly `grid_cells * cell_size` pixels so
/// that there is never a partial cell along the right or bottom edge.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Geometry {
    pub(crate) cell_size: u32,
    pub(crate) grid_cells: u16,
    pub(crate) canvas_size: u32,
}

impl Geometry {
    pub(crate) fn for_viewport(viewport_width: u32) -> Geometry {
        let divisions = u32::from(consts::GRID_DIVISIONS);
        let canvas = viewport_width
            .saturating_sub(consts::VIEWPORT_MARGIN)
            .min(consts::MAX_CANVAS_SIZE)
            .max(divisions);
        let cell_size = (canvas / divisions).max(1);
        // `canvas` is at most MAX_CANVAS_SIZE, so this always fits.
        let grid_cells = u16::try_from(canvas / cell_size).unwrap_or(u16::MAX);
        Geometry {
            cell_size,
            grid_cells,
            canvas_size: u32::from(grid_cells) * cell_size,
        }
    }

    /// Compute the geometry for a terminal that is `columns` characters wide
    pub(crate) fn for_terminal(columns: u16) -> Geometry {
        Geometry::for_viewport(u32::from(columns) * consts::PIXELS_PER_COLUMN)
    }

    pub(crate) fn bounds(self) -> Bounds {
        Bounds {
            width: self.grid_cells,
            height: self.grid_cells,
        }
    }
}

/// The extent of the playing field, in cells
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Bounds {
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl Bounds {
    pub(crate) fn size(self) -> Size {
        Size {
            width: self.width,
            height: self.height,
        }
    }

    pub(crate) fn contains(self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// The cell at the center of the field
    pub(crate) fn center(self) -> Position {
        Position::new(self.width / 2, self.height / 2)
    }

    /// All cells in which food may be placed.  This excludes the last column
    /// and the last row of the field.
    pub(crate) fn food_positions(self) -> Positions {
        let size = Size {
            width: self.width.saturating_sub(1),
            height: self.height.saturating_sub(1),
        };
        let area = Rect::from((Position::ORIGIN, size));
        if area.is_empty() {
            Rect::ZERO.positions()
        } else {
            area.positions()
        }
    }
}

impl From<Size> for Bounds {
    fn from(size: Size) -> Bounds {
        Bounds {
            width: size.width,
            height: size.height,
        }
    }
}
