//! Scale-to-fit placement of source pages inside card cells
//!
//! Pages are scaled uniformly so the whole page fits the cell (never cropped)
//! and then centered in it.

use crate::types::{ImposeError, Result, SourceSide};

use super::{CardFormat, FittedPage, PlacementRect, Rect};

/// Compute the uniform scale and centering offsets for a page.
///
/// Returns `None` when the source size is zero, negative or not finite, or so
/// small that the scale itself overflows.
pub fn fit_to_cell(source_width: f32, source_height: f32, card: &CardFormat) -> Option<FittedPage> {
    if !is_valid_extent(source_width) || !is_valid_extent(source_height) {
        return None;
    }

    let scale = (card.width / source_width).min(card.height / source_height);
    if !scale.is_finite() || scale <= 0.0 {
        return None;
    }

    // Clamp so rounding never pushes the page past the cut line
    let scaled_width = (source_width * scale).min(card.width);
    let scaled_height = (source_height * scale).min(card.height);

    Some(FittedPage {
        scale,
        scaled_width,
        scaled_height,
        x_offset: (card.width - scaled_width) / 2.0,
        y_offset: (card.height - scaled_height) / 2.0,
    })
}

/// Fit a page from one of the input documents, reporting degenerate sizes.
///
/// `page_index` is 0-based; the error carries the 1-based page number.
pub fn fit_source_page(
    side: SourceSide,
    page_index: usize,
    (width, height): (f32, f32),
    card: &CardFormat,
) -> Result<FittedPage> {
    fit_to_cell(width, height, card).ok_or(ImposeError::MalformedSource {
        side,
        page: page_index + 1,
        width,
        height,
    })
}

/// Final rectangle of a fitted page inside a cell.
pub fn place_in_cell(cell: &Rect, fit: &FittedPage) -> PlacementRect {
    Rect::new(
        cell.x + fit.x_offset,
        cell.y + fit.y_offset,
        fit.scaled_width,
        fit.scaled_height,
    )
}

fn is_valid_extent(value: f32) -> bool {
    value.is_finite() && value > 0.0
}

// =============================================================================
// Tests
// =============================================================================
