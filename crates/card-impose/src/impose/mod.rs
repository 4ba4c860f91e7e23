//! Card sheet imposition
//!
//! This module orchestrates one generation run:
//! 1. Decode the front and back sources
//! 2. Resolve the sheet layout
//! 3. Populate front and back sheets cell by cell
//! 4. Serialize the output document(s)

mod io;
mod sheet;

pub use io::{decode_source, load_pdf, load_source_file, save_output};

use crate::layout::LayoutConstants;
use crate::options::ImpositionOptions;
use crate::types::*;
use lopdf::Document;
use sheet::populate_sheets;

/// Generate card sheets from raw front and back PDF bytes
pub async fn generate(
    front: Vec<u8>,
    back: Vec<u8>,
    options: &ImpositionOptions,
) -> Result<OutputResult> {
    options.validate()?;

    let options = options.clone();

    tokio::task::spawn_blocking(move || generate_blocking(&front, &back, &options)).await?
}

/// Synchronous version of [`generate`]
pub fn generate_blocking(
    front: &[u8],
    back: &[u8],
    options: &ImpositionOptions,
) -> Result<OutputResult> {
    let front = decode_source(SourceSide::Front, front)?;
    let back = decode_source(SourceSide::Back, back)?;
    impose_documents(&front, &back, options)
}

/// Impose already decoded documents
pub fn impose_documents(
    front: &Document,
    back: &Document,
    options: &ImpositionOptions,
) -> Result<OutputResult> {
    impose_limited(front, back, options, None)
}

/// Impose at most `max_sheets` sheets when a limit is given
pub(crate) fn impose_limited(
    front: &Document,
    back: &Document,
    options: &ImpositionOptions,
    max_sheets: Option<usize>,
) -> Result<OutputResult> {
    let constants = options.validate()?;
    check_back_source(back)?;

    let card_count = limit_cards(front.get_pages().len(), &constants, max_sheets);
    log::debug!(
        "Imposing {} cards on a {}x{} grid ({:?})",
        card_count,
        constants.grid.cols,
        constants.grid.rows,
        options.mode
    );

    populate_sheets(front, back, card_count, &constants, options)?.into_result()
}

fn check_back_source(back: &Document) -> Result<()> {
    let back_pages = back.get_pages().len();
    if back_pages == 0 {
        return Err(ImposeError::SourceDecode {
            side: SourceSide::Back,
            reason: "document has no pages".to_string(),
        });
    }
    if back_pages > 1 {
        log::debug!("Back document has {} pages; using page 1", back_pages);
    }
    Ok(())
}

/// Cards that fit on the first `max_sheets` sheets
pub(crate) fn limit_cards(
    card_count: usize,
    constants: &LayoutConstants,
    max_sheets: Option<usize>,
) -> usize {
    match max_sheets {
        Some(sheets) => card_count.min(sheets.saturating_mul(constants.cells_per_sheet)),
        None => card_count,
    }
}
