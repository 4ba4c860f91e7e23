use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Failed to decode {side} PDF: {reason}")]
    SourceDecode { side: SourceSide, reason: String },
    #[error("Malformed {side} page {page}: degenerate size {width} x {height} pt")]
    MalformedSource {
        side: SourceSide,
        /// 1-based page number within the source document
        page: usize,
        width: f32,
        height: f32,
    },
    #[error("card {card} {stage} failed: {source}")]
    Placement {
        /// 1-based card number
        card: usize,
        stage: PlacementStage,
        #[source]
        source: Box<ImposeError>,
    },
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ImposeError>;

impl ImposeError {
    /// Attach card context to a failure inside the population loop.
    ///
    /// Degenerate page sizes keep their own variant so callers can match on them.
    pub(crate) fn at_card(self, card_index: usize, stage: PlacementStage) -> Self {
        match self {
            err @ ImposeError::MalformedSource { .. } => err,
            err => ImposeError::Placement {
                card: card_index + 1,
                stage,
                source: Box::new(err),
            },
        }
    }
}

/// Which input document a page came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceSide {
    Front,
    Back,
}

impl fmt::Display for SourceSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceSide::Front => f.write_str("front"),
            SourceSide::Back => f.write_str("back"),
        }
    }
}

/// Step of the per-card pipeline that was running when a placement failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementStage {
    /// Reading the page size from the source document
    Measuring,
    /// Copying the page into the output as a Form XObject
    Embedding,
}

impl fmt::Display for PlacementStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementStage::Measuring => f.write_str("measuring"),
            PlacementStage::Embedding => f.write_str("embedding"),
        }
    }
}

/// How front and back sheets are split across output documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OutputMode {
    /// Two PDFs (fronts, backs) with backs in the same grid positions
    SeparateFrontBack,
    /// One PDF alternating front sheet, back sheet, mirrored for long-edge duplex
    #[default]
    MergedAlternating,
    /// Two PDFs with the back columns mirrored for long-edge duplex
    SeparateFrontBackMirrored,
}

impl OutputMode {
    /// Whether back sheets reflect their columns
    pub fn mirrors_backs(self) -> bool {
        matches!(
            self,
            OutputMode::MergedAlternating | OutputMode::SeparateFrontBackMirrored
        )
    }

    /// Whether fronts and backs go to separate documents
    pub fn is_split(self) -> bool {
        !matches!(self, OutputMode::MergedAlternating)
    }
}

/// What to draw in cells that have no front card on the last sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BlankCellPolicy {
    /// Cover both the front and back cell with a white rectangle
    #[default]
    FillWhite,
    /// Leave the front cell empty and still print the shared back
    ReplicateBack,
}

/// Serialized result of one generation run
#[derive(Debug, Clone, PartialEq)]
pub enum OutputResult {
    /// Separate front-only and back-only documents
    Split { front: Vec<u8>, back: Vec<u8> },
    /// One document with front and back sheets interleaved
    Merged(Vec<u8>),
}

/// Statistics about the imposition
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionStatistics {
    /// Number of front pages (cards)
    pub cards: usize,
    /// Cells in one sheet grid
    pub cells_per_sheet: usize,
    /// Number of physical sheets
    pub sheets: usize,
    /// Number of PDF documents produced (1 merged, 2 split)
    pub output_documents: usize,
    /// Pages in each produced document
    pub pages_per_document: usize,
    /// Unfilled cells on the final sheet
    pub blank_cells: usize,
}
