//! Cut guide rendering for card sheets
//!
//! Generates PDF content stream operations for the grid lines drawn along
//! every cell boundary. Lines have a fixed width and gray level.

use crate::constants::{GRID_LINE_GRAY, GRID_LINE_WIDTH};
use crate::layout::LayoutConstants;

/// A straight line segment in sheet space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLine {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

/// Compute the cut lines: `cols + 1` vertical, then `rows + 1` horizontal.
pub fn grid_lines(constants: &LayoutConstants) -> Vec<GridLine> {
    let grid = constants.grid;
    let left = constants.margins.x;
    let right = left + constants.grid_width;
    let top = constants.sheet.height - constants.margins.y;
    let bottom = top - constants.grid_height;

    let vertical = (0..=grid.cols).map(|col| {
        let x = left + col as f32 * constants.card.width;
        GridLine {
            x1: x,
            y1: top,
            x2: x,
            y2: bottom,
        }
    });

    let horizontal = (0..=grid.rows).map(|row| {
        let y = top - row as f32 * constants.card.height;
        GridLine {
            x1: left,
            y1: y,
            x2: right,
            y2: y,
        }
    });

    vertical.chain(horizontal).collect()
}

/// Generate the grid lines as PDF content stream operations
pub fn generate_grid_lines(constants: &LayoutConstants) -> String {
    let mut ops = String::new();

    // Save graphics state
    ops.push_str("q\n");
    ops.push_str(&format!(
        "{} {} {} RG\n",
        GRID_LINE_GRAY, GRID_LINE_GRAY, GRID_LINE_GRAY
    ));
    ops.push_str(&format!("{} w\n", GRID_LINE_WIDTH));
    ops.push_str("[] 0 d\n");

    for line in grid_lines(constants) {
        ops.push_str(&format!(
            "{} {} m {} {} l S\n",
            line.x1, line.y1, line.x2, line.y2
        ));
    }

    // Restore graphics state
    ops.push_str("Q\n");

    ops
}
