//! Shared constants for card imposition
//!
//! Default formats and the fixed visual constants of the cut guides.

// =============================================================================
// Unit Conversion
// =============================================================================

/// Points per millimeter. Every sheet uses this exact value so cut lines line
/// up between independently generated documents.
pub const MM_TO_PT: f32 = 2.83465;

/// Convert millimeters to points
#[inline]
pub fn mm_to_pt(mm: f32) -> f32 {
    mm * MM_TO_PT
}

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt / MM_TO_PT
}

// =============================================================================
// Default Formats
// =============================================================================

/// Landscape A4 width in points (297mm)
pub const A4_LANDSCAPE_WIDTH_PT: f32 = 841.89;

/// Landscape A4 height in points (210mm)
pub const A4_LANDSCAPE_HEIGHT_PT: f32 = 595.28;

/// Standard trading card width (63mm)
pub const CARD_WIDTH_MM: f32 = 63.0;

/// Standard trading card height (88mm)
pub const CARD_HEIGHT_MM: f32 = 88.0;

/// Default grid for landscape A4 with standard cards
pub const DEFAULT_GRID_COLS: usize = 4;
pub const DEFAULT_GRID_ROWS: usize = 2;

/// Slack allowed when comparing the grid against the sheet
pub const LAYOUT_EPSILON_PT: f32 = 1e-3;

// =============================================================================
// Cut Guides
// =============================================================================

/// Line width for grid lines (points)
pub const GRID_LINE_WIDTH: f32 = 0.5;

/// Gray level for grid lines (light gray)
pub const GRID_LINE_GRAY: f32 = 0.8;

// =============================================================================
// Output Document
// =============================================================================

/// PDF version written to output documents
pub const OUTPUT_PDF_VERSION: &str = "1.7";

// =============================================================================
// Source Pages
// =============================================================================

/// Page size assumed when a source page has no MediaBox (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

/// Deepest `/Parent` chain followed when looking up inherited page attributes
pub const MAX_PAGE_TREE_DEPTH: usize = 64;
