//! Cell coordinate mapping
//!
//! Maps linear cell indices to grid positions and grid positions to
//! rectangles in PDF space. Row 0 is the top row even though the PDF y axis
//! grows upward.

use super::{CellPosition, LayoutConstants, Rect};

// =============================================================================
// Index Mapping
// =============================================================================

/// Row-major position of a cell index (cell 0 is top-left).
pub fn cell_position(cell_index: usize, cols: usize) -> CellPosition {
    CellPosition::new(cell_index / cols, cell_index % cols)
}

/// Reflect a column for long-edge duplex binding.
pub fn mirror_column(col: usize, cols: usize) -> usize {
    (cols - 1) - col
}

/// Position of the back cell behind a front cell.
///
/// Only the column is reflected, and only when `mirror` is set.
pub fn back_position(front: CellPosition, cols: usize, mirror: bool) -> CellPosition {
    if mirror {
        CellPosition::new(front.row, mirror_column(front.col, cols))
    } else {
        front
    }
}

/// Global card index of a cell on a sheet.
pub fn global_card_index(sheet_index: usize, cell_index: usize, cells_per_sheet: usize) -> usize {
    sheet_index * cells_per_sheet + cell_index
}

// =============================================================================
// Cell Geometry
// =============================================================================

/// Calculate the bounds of a cell at the given grid position.
pub fn cell_bounds(constants: &LayoutConstants, pos: CellPosition) -> Rect {
    let card = constants.card;
    let x = constants.margins.x + pos.col as f32 * card.width;
    let y = constants.sheet.height - constants.margins.y - (pos.row + 1) as f32 * card.height;

    Rect::new(x, y, card.width, card.height)
}

// =============================================================================
// Sheet Slots
// =============================================================================

/// One cell of one sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardSlot {
    pub sheet_index: usize,
    pub cell_index: usize,
    pub front: CellPosition,
    pub back: CellPosition,
    /// Index into the front source, `None` for an unfilled cell
    pub card_index: Option<usize>,
}

/// All cells of one sheet, in row-major order.
pub fn sheet_slots(
    constants: &LayoutConstants,
    sheet_index: usize,
    card_count: usize,
    mirror: bool,
) -> Vec<CardSlot> {
    let cols = constants.grid.cols;
    (0..constants.cells_per_sheet)
        .map(|cell_index| {
            let front = cell_position(cell_index, cols);
            let card_index = global_card_index(sheet_index, cell_index, constants.cells_per_sheet);
            CardSlot {
                sheet_index,
                cell_index,
                front,
                back: back_position(front, cols, mirror),
                card_index: (card_index < card_count).then_some(card_index),
            }
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================
