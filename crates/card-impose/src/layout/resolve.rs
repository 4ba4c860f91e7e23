//! Layout constant resolution
//!
//! Turns the configured sheet, card and grid into the constants used by every
//! sheet of a run.

use crate::constants::LAYOUT_EPSILON_PT;
use crate::types::{ImposeError, Result};

use super::{Grid, LayoutConfig, LayoutConstants, Margins};

/// Resolve grid, grid size and margins for a configuration.
///
/// Fails with [`ImposeError::Config`] if any dimension is not a positive
/// finite number, if the grid is empty, or if the grid does not fit on the
/// sheet.
pub fn resolve_layout(config: &LayoutConfig) -> Result<LayoutConstants> {
    let sheet = config.sheet;
    let card = config.card;

    check_dimension("sheet width", sheet.width)?;
    check_dimension("sheet height", sheet.height)?;
    check_dimension("card width", card.width)?;
    check_dimension("card height", card.height)?;

    let grid = config.grid.unwrap_or_else(|| Grid::derive(&sheet, &card));
    if grid.cols == 0 || grid.rows == 0 {
        return Err(ImposeError::Config(format!(
            "Grid {}x{} has no cells; a {}x{} pt card does not fit on a {}x{} pt sheet",
            grid.cols, grid.rows, card.width, card.height, sheet.width, sheet.height
        )));
    }

    let grid_width = grid.cols as f32 * card.width;
    let grid_height = grid.rows as f32 * card.height;

    if grid_width > sheet.width + LAYOUT_EPSILON_PT {
        return Err(ImposeError::Config(format!(
            "{} columns of {} pt need {} pt, sheet is only {} pt wide",
            grid.cols, card.width, grid_width, sheet.width
        )));
    }
    if grid_height > sheet.height + LAYOUT_EPSILON_PT {
        return Err(ImposeError::Config(format!(
            "{} rows of {} pt need {} pt, sheet is only {} pt high",
            grid.rows, card.height, grid_height, sheet.height
        )));
    }

    let margins = Margins {
        x: ((sheet.width - grid_width) / 2.0).max(0.0),
        y: ((sheet.height - grid_height) / 2.0).max(0.0),
    };

    Ok(LayoutConstants {
        sheet,
        card,
        grid,
        cells_per_sheet: grid.cell_count(),
        grid_width,
        grid_height,
        margins,
    })
}

fn check_dimension(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ImposeError::Config(format!(
            "{} must be a positive number of points, got {}",
            name, value
        )))
    }
}

// =============================================================================
// Tests
// =============================================================================
