//! Layout data types for card imposition
//!
//! These types sit between the configuration and PDF rendering: the resolver
//! turns a [`LayoutConfig`] into [`LayoutConstants`], and the placement
//! functions turn those into rectangles on a sheet.

use crate::constants::{
    A4_LANDSCAPE_HEIGHT_PT, A4_LANDSCAPE_WIDTH_PT, CARD_HEIGHT_MM, CARD_WIDTH_MM,
    DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS, mm_to_pt,
};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Output page size in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SheetFormat {
    pub width: f32,
    pub height: f32,
}

impl SheetFormat {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_mm(width_mm: f32, height_mm: f32) -> Self {
        Self::new(mm_to_pt(width_mm), mm_to_pt(height_mm))
    }

    /// 297mm x 210mm
    pub fn landscape_a4() -> Self {
        Self::new(A4_LANDSCAPE_WIDTH_PT, A4_LANDSCAPE_HEIGHT_PT)
    }
}

impl Default for SheetFormat {
    fn default() -> Self {
        Self::landscape_a4()
    }
}

/// Size of one card cell in points
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CardFormat {
    pub width: f32,
    pub height: f32,
}

impl CardFormat {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn from_mm(width_mm: f32, height_mm: f32) -> Self {
        Self::new(mm_to_pt(width_mm), mm_to_pt(height_mm))
    }

    /// 63mm x 88mm trading card
    pub fn standard_card() -> Self {
        Self::from_mm(CARD_WIDTH_MM, CARD_HEIGHT_MM)
    }
}

impl Default for CardFormat {
    fn default() -> Self {
        Self::standard_card()
    }
}

/// Cell grid of a sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Grid {
    pub cols: usize,
    pub rows: usize,
}

impl Grid {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self { cols, rows }
    }

    /// Largest grid of whole cards that fits on the sheet
    pub fn derive(sheet: &SheetFormat, card: &CardFormat) -> Self {
        let cols = (sheet.width / card.width).floor();
        let rows = (sheet.height / card.height).floor();
        Self {
            cols: if cols.is_finite() && cols > 0.0 { cols as usize } else { 0 },
            rows: if rows.is_finite() && rows > 0.0 { rows as usize } else { 0 },
        }
    }

    pub fn cell_count(&self) -> usize {
        self.cols * self.rows
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_COLS, DEFAULT_GRID_ROWS)
    }
}

/// Geometry configuration for one run
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LayoutConfig {
    pub sheet: SheetFormat,
    pub card: CardFormat,
    /// Fixed grid; `None` derives the largest grid that fits
    pub grid: Option<Grid>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            sheet: SheetFormat::default(),
            card: CardFormat::default(),
            grid: Some(Grid::default()),
        }
    }
}

/// Symmetric space between the sheet edge and the grid
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub x: f32,
    pub y: f32,
}

/// Resolved geometry shared by every sheet of a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutConstants {
    pub sheet: SheetFormat,
    pub card: CardFormat,
    pub grid: Grid,
    pub cells_per_sheet: usize,
    /// Width of all columns together
    pub grid_width: f32,
    /// Height of all rows together
    pub grid_height: f32,
    pub margins: Margins,
}

impl LayoutConstants {
    /// Number of sheets needed for `card_count` cards
    pub fn total_sheets(&self, card_count: usize) -> usize {
        card_count.div_ceil(self.cells_per_sheet)
    }
}

/// Position within the grid (row, column)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellPosition {
    /// Row index (0 = top row)
    pub row: usize,
    /// Column index (0 = leftmost column)
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A rectangular area in points, origin bottom-left
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X position (left edge)
    pub x: f32,
    /// Y position (bottom edge)
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge x coordinate
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Top edge y coordinate
    pub fn top(&self) -> f32 {
        self.y + self.height
    }

    /// Whether `other` lies inside this rect, allowing for float slack
    pub fn contains(&self, other: &Rect, tolerance: f32) -> bool {
        other.x >= self.x - tolerance
            && other.y >= self.y - tolerance
            && other.right() <= self.right() + tolerance
            && other.top() <= self.top() + tolerance
    }
}

/// Where a scaled page lands on the sheet
pub type PlacementRect = Rect;

/// Uniform scale of a source page into a cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedPage {
    pub scale: f32,
    pub scaled_width: f32,
    pub scaled_height: f32,
    /// Horizontal centering offset inside the cell
    pub x_offset: f32,
    /// Vertical centering offset inside the cell
    pub y_offset: f32,
}
